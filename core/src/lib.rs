pub mod context;
pub mod entity;
pub mod error;
pub mod events;
pub mod numeric;
pub mod pipeline;
pub mod report;
pub mod session_log;

// Re-exports for convenience
pub use context::{ConfigError, PipelineConfig};
pub use entity::{EntityIndex, EntitySummary, IndexKey, build_entity_index, total_movement};
pub use error::{Result, StatsError};
pub use events::{
    EventBucket, EventIndex, EventRecord, EventType, NormalizedEvent, aggregate_events,
    extract_events,
};
pub use report::{
    CohortStats, CohortSummary, MergedEntityRecord, MissionInfo, Report, ReportOptions,
    ReportSummary, build_report, write_report,
};
pub use session_log::{EntityId, PositionSample, RawEntity, RawEvent, SessionLog, load_session_log};

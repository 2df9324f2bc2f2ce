//! Hit/kill extraction and per-source aggregation.

mod aggregator;
mod extractor;

pub use aggregator::{EventBucket, EventIndex, aggregate_events};
pub use extractor::{EventRecord, EventType, NormalizedEvent, extract_events};

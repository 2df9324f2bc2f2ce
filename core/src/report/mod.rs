//! Final report: per-entity stats split into player/ai cohorts plus mission
//! metadata.

mod mission;
mod summary;
mod writer;

pub use mission::{DEFAULT_TIME_FORMAT, MissionInfo, build_mission, format_mission_time};
pub use summary::{CohortSummary, ReportSummary};
pub use writer::{to_pretty_json, write_report};

use serde::{Deserialize, Serialize};

use crate::entity::{EntityIndex, EntitySummary, IndexKey, build_entity_index};
use crate::error::Result;
use crate::events::{EventBucket, EventIndex, EventRecord, aggregate_events, extract_events};
use crate::numeric::round_metric;
use crate::session_log::{EntityId, RawEntity, SessionLog, key_of};

/// One entity's row in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedEntityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_player: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    pub total_movement: u64,
    pub shots_fired: u64,
    pub hits: u64,
    pub avg_hit_distance: u64,
    pub kills: u64,
    /// Percent of shots that hit. Not clamped: hits can outnumber recorded
    /// shots (grenades, vehicle weapons).
    pub accuracy: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit: Option<Vec<EventRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killed: Option<Vec<EventRecord>>,
}

impl MergedEntityRecord {
    /// Join a source's events with its summary. A source with no summary
    /// keeps only the computed counters.
    pub fn merge(summary: Option<&EntitySummary>, events: &EventBucket) -> Self {
        let shots_fired = summary.map_or(0, |s| s.shots_fired);
        let hits = events.hits().len() as u64;

        Self {
            id: summary.and_then(|s| s.id.clone()),
            name: summary.and_then(|s| s.name.clone()),
            is_player: summary.map(|s| s.is_player),
            side: summary.and_then(|s| s.side.clone()),
            entity_type: summary.and_then(|s| s.entity_type.clone()),
            total_movement: summary.map_or(0, |s| s.total_movement),
            shots_fired,
            hits,
            avg_hit_distance: average_hit_distance(events),
            kills: events.kills().len() as u64,
            accuracy: accuracy(hits, shots_fired),
            hit: events.hit.clone(),
            killed: events.killed.clone(),
        }
    }

    pub fn is_player(&self) -> bool {
        self.is_player.unwrap_or(false)
    }
}

/// Whole-number hit percentage; 0 when nothing was fired.
pub fn accuracy(hits: u64, shots_fired: u64) -> u64 {
    if shots_fired == 0 {
        return 0;
    }
    round_metric(hits as f64 / shots_fired as f64 * 100.0)
}

/// Mean distance over the source's hits. Kill-only sources have no hit
/// list and report 0.
pub fn average_hit_distance(events: &EventBucket) -> u64 {
    let Some(hits) = &events.hit else {
        return 0;
    };
    let total = hits.iter().fold(0.0, |acc, record| acc + record.distance());
    round_metric(total / hits.len().max(1) as f64)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CohortStats {
    pub ai: Vec<MergedEntityRecord>,
    pub player: Vec<MergedEntityRecord>,
}

impl CohortStats {
    pub fn push(&mut self, record: MergedEntityRecord) {
        if record.is_player() {
            self.player.push(record);
        } else {
            self.ai.push(record);
        }
    }

    pub fn len(&self) -> usize {
        self.ai.len() + self.player.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> impl Iterator<Item = &MergedEntityRecord> {
        self.ai.iter().chain(self.player.iter())
    }
}

/// One record per event source, in the order sources first appeared.
pub fn build_stats(events: &EventIndex, entities: &EntityIndex) -> CohortStats {
    let mut stats = CohortStats::default();
    for (key, bucket) in events.iter() {
        let summary = entities.get(key);
        if summary.is_none() {
            tracing::debug!(source = key, "Event source has no entity record");
        }
        stats.push(MergedEntityRecord::merge(summary, bucket));
    }
    stats
}

/// Append entities that never shot anyone, in input order, with zeroed
/// counters.
pub fn append_idle_entities(
    stats: &mut CohortStats,
    raw: &[RawEntity],
    events: &EventIndex,
    entities: &EntityIndex,
) {
    let mut seen = hashbrown::HashSet::new();
    for entity in raw {
        let key = key_of(entity.id.as_ref());
        if events.contains_key(&key) || !seen.insert(key.clone()) {
            continue;
        }
        if let Some(summary) = entities.get(&key) {
            stats.push(MergedEntityRecord::merge(Some(summary), &EventBucket::default()));
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub stats: CohortStats,
    pub mission: MissionInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub time_format: String,
    pub include_idle_entities: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            include_idle_entities: false,
        }
    }
}

/// Run every transformation stage over a loaded session.
pub fn build_report(log: &SessionLog, options: &ReportOptions) -> Result<Report> {
    let raw_entities = log.entities()?;
    let entities = build_entity_index(raw_entities, IndexKey::Id)?;
    let events = aggregate_events(&extract_events(log.events()?)?);

    let mut stats = build_stats(&events, &entities);
    if options.include_idle_entities {
        append_idle_entities(&mut stats, raw_entities, &events, &entities);
    }
    let mission = build_mission(log, &options.time_format)?;

    tracing::debug!(
        entities = entities.len(),
        sources = events.len(),
        player = stats.player.len(),
        ai = stats.ai.len(),
        "Built report"
    );
    Ok(Report { stats, mission })
}

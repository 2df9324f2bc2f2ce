//! Cohort-level aggregates for a quick look at a report without plotting it.

use serde::Serialize;
use std::fmt;

use super::{CohortStats, MergedEntityRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortSummary {
    pub entities: usize,
    pub total_movement: u64,
    pub shots_fired: u64,
    pub hits: u64,
    pub kills: u64,
    pub mean_accuracy: f64,
    pub mean_avg_hit_distance: f64,
}

impl CohortSummary {
    pub fn from_records(records: &[MergedEntityRecord]) -> Self {
        let mut summary = Self {
            entities: records.len(),
            ..Self::default()
        };
        if records.is_empty() {
            return summary;
        }

        let mut accuracy_sum = 0;
        let mut distance_sum = 0;
        for record in records {
            summary.total_movement += record.total_movement;
            summary.shots_fired += record.shots_fired;
            summary.hits += record.hits;
            summary.kills += record.kills;
            accuracy_sum += record.accuracy;
            distance_sum += record.avg_hit_distance;
        }
        summary.mean_accuracy = accuracy_sum as f64 / records.len() as f64;
        summary.mean_avg_hit_distance = distance_sum as f64 / records.len() as f64;
        summary
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportSummary {
    pub ai: CohortSummary,
    pub player: CohortSummary,
}

impl ReportSummary {
    pub fn from_stats(stats: &CohortStats) -> Self {
        Self {
            ai: CohortSummary::from_records(&stats.ai),
            player: CohortSummary::from_records(&stats.player),
        }
    }
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<8} {:>8} {:>10} {:>8} {:>8} {:>8} {:>9} {:>12}",
            "Cohort", "Entities", "Movement", "Shots", "Hits", "Kills", "Accuracy", "Avg Hit Dist"
        )?;
        writeln!(f, "{}", "-".repeat(80))?;
        for (label, cohort) in [("player", &self.player), ("ai", &self.ai)] {
            writeln!(
                f,
                "{:<8} {:>8} {:>10} {:>8} {:>8} {:>8} {:>8.1}% {:>12.1}",
                label,
                cohort.entities,
                cohort.total_movement,
                cohort.shots_fired,
                cohort.hits,
                cohort.kills,
                cohort.mean_accuracy,
                cohort.mean_avg_hit_distance,
            )?;
        }
        Ok(())
    }
}

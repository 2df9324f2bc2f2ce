use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::context::ConfigError;
use crate::error::{Result, StatsError};
use crate::session_log::SessionLog;

/// en-US locale style, e.g. `5/12/2023, 7:35:19 PM`.
pub const DEFAULT_TIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub world_name: Option<String>,
    pub time: String,
}

pub fn build_mission(log: &SessionLog, time_format: &str) -> Result<MissionInfo> {
    Ok(MissionInfo {
        name: log.mission_name.clone(),
        author: log.mission_author.clone(),
        world_name: log.world_name.clone(),
        time: format_mission_time(log.start_time()?, time_format)?,
    })
}

/// Render the recorder's UTC timestamp. Timestamps carrying an offset are
/// shifted to UTC first; bare ones are taken as UTC already, so `%z` and `%Z`
/// render as `+0000` and `UTC`.
pub fn format_mission_time(raw: &str, format: &str) -> Result<String> {
    let invalid_format = || {
        StatsError::from(ConfigError::TimeFormat {
            format: format.to_string(),
        })
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid_format());
    }

    let time = parse_utc(raw)
        .ok_or_else(|| StatsError::malformed(format!("unrecognised mission time '{raw}'")))?;

    // Rendering can still fail for items the value cannot supply
    let mut rendered = String::new();
    write!(rendered, "{}", time.format_with_items(items.into_iter()))
        .map_err(|_| invalid_format())?;
    Ok(rendered)
}

fn parse_utc(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

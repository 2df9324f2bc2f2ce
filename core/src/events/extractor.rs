use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use crate::error::{Result, StatsError};
use crate::session_log::{EntityId, RawEvent};

/// The only event kinds that feed the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Hit,
    Killed,
}

impl EventType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "hit" => Some(EventType::Hit),
            "killed" => Some(EventType::Killed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Hit => "hit",
            EventType::Killed => "killed",
        }
    }
}

/// A hit or kill with its shooter resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    pub event_type: EventType,
    pub victim: Option<Value>,
    /// `None` for environmental damage and other unattributed events.
    pub source: Option<EntityId>,
    pub distance: Number,
}

impl NormalizedEvent {
    /// Returns `Ok(None)` for event kinds the report does not use.
    pub fn from_raw(raw: &RawEvent) -> Result<Option<Self>> {
        let Some(event_type) = raw.event_type().and_then(EventType::from_name) else {
            return Ok(None);
        };

        let source = match raw.killer_info() {
            Value::Null => None,
            Value::Array(info) => match info.first() {
                Some(first) => EntityId::from_value(first)?,
                None => None,
            },
            other => {
                return Err(StatsError::malformed(format!(
                    "{} event has killer info {other}, expected an array",
                    event_type.as_str()
                )));
            }
        };

        let distance = raw.distance().cloned().ok_or_else(|| {
            StatsError::missing("distance", format!("{} event {:?}", event_type.as_str(), raw.0))
        })?;
        if distance.as_f64().is_some_and(|d| d < 0.0) {
            return Err(StatsError::malformed(format!(
                "{} event has negative distance {distance}",
                event_type.as_str()
            )));
        }

        Ok(Some(Self {
            event_type,
            victim: raw.victim().cloned(),
            source,
            distance,
        }))
    }

    pub fn record(&self) -> EventRecord {
        EventRecord {
            victim: self.victim.clone(),
            distance: self.distance.clone(),
        }
    }
}

/// Victim/distance pair kept per source in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub victim: Option<Value>,
    pub distance: Number,
}

// Keeps an explicit `null` victim distinct from a missing one.
fn present_value<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl EventRecord {
    pub fn distance(&self) -> f64 {
        self.distance.as_f64().unwrap_or_default()
    }
}

/// Keep hits and kills, drop everything else. Order is preserved.
pub fn extract_events(raw: &[RawEvent]) -> Result<Vec<NormalizedEvent>> {
    let mut events = Vec::new();
    for event in raw {
        if let Some(normalized) = NormalizedEvent::from_raw(event)? {
            events.push(normalized);
        }
    }

    tracing::debug!(
        raw = raw.len(),
        kept = events.len(),
        "Extracted hit/killed events"
    );
    Ok(events)
}

use serde::de::{Deserializer, Error as _};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

use crate::error::{Result, StatsError};

/// Key used for anything that has no identifier (no id on the entity, no
/// killer on the event).
pub const UNDEFINED_KEY: &str = "undefined";

/// Entity identifier as it appears in the log. Recorders write numbers, but
/// strings are accepted too. Serializes back to its original form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(Number),
    Text(String),
}

impl EntityId {
    /// Lookup key shared by the entity index and the event index.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Reads an id out of an arbitrary JSON value. `null` means "no id".
    pub fn from_value(value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => Ok(Some(EntityId::Number(n.clone()))),
            Value::String(s) => Ok(Some(EntityId::Text(s.clone()))),
            other => Err(StatsError::malformed(format!(
                "expected an entity id, found {other}"
            ))),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Text(s) => f.write_str(s),
            EntityId::Number(n) => {
                if let Some(i) = n.as_i64() {
                    write!(f, "{i}")
                } else if let Some(u) = n.as_u64() {
                    write!(f, "{u}")
                } else {
                    // f64 Display drops a zero fraction, so 7.0 keys as "7"
                    write!(f, "{}", n.as_f64().unwrap_or_default())
                }
            }
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Number(value.into())
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::Text(value.to_string())
    }
}

/// Key for an optional id, falling back to [`UNDEFINED_KEY`].
pub fn key_of(id: Option<&EntityId>) -> String {
    id.map(EntityId::key)
        .unwrap_or_else(|| UNDEFINED_KEY.to_string())
}

/// One recorded position. The recorder stores `[[x, y, z], dir, alive, ...]`;
/// only the leading coordinate vector is kept. 2D vectors get `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionSample {
    pub coords: [f64; 3],
}

impl PositionSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { coords: [x, y, z] }
    }

    pub fn distance_to(&self, other: &PositionSample) -> f64 {
        let [cx, cy, cz] = self.coords;
        let [px, py, pz] = other.coords;
        let (dx, dy, dz) = (cx - px, cy - py, cz - pz);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl<'de> Deserialize<'de> for PositionSample {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let sample = Vec::<Value>::deserialize(deserializer)?;
        let vector = sample
            .first()
            .and_then(Value::as_array)
            .ok_or_else(|| {
                D::Error::custom("position sample must start with a coordinate vector")
            })?;

        if !(2..=3).contains(&vector.len()) {
            return Err(D::Error::custom(format!(
                "coordinate vector must have 2 or 3 components, found {}",
                vector.len()
            )));
        }

        let mut coords = [0.0; 3];
        for (slot, component) in coords.iter_mut().zip(vector) {
            *slot = component
                .as_f64()
                .ok_or_else(|| D::Error::custom(format!("non-numeric coordinate {component}")))?;
        }
        Ok(PositionSample { coords })
    }
}

/// Entity record as written by the recorder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntity {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub name: Option<String>,
    /// Recorders write 0/1 here as often as booleans.
    #[serde(default)]
    pub is_player: Value,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default, rename = "type")]
    pub entity_type: Option<String>,
    #[serde(default)]
    pub positions: Option<Vec<PositionSample>>,
    #[serde(default)]
    pub frames_fired: Option<Vec<Value>>,
}

impl RawEntity {
    pub fn is_player(&self) -> bool {
        is_truthy(&self.is_player)
    }

    pub fn positions(&self) -> &[PositionSample] {
        self.positions.as_deref().unwrap_or_default()
    }

    /// Human readable label for error messages.
    pub fn describe(&self) -> String {
        match (&self.id, &self.name) {
            (Some(id), Some(name)) => format!("entity {id} ({name})"),
            (Some(id), None) => format!("entity {id}"),
            (None, Some(name)) => format!("entity '{name}'"),
            (None, None) => "entity without id".to_string(),
        }
    }
}

/// Event record, read positionally as
/// `[timestamp, eventType, victim, killerInfo, distance]`.
///
/// Records are free-form arrays: `connected`/`disconnected` events carry
/// fewer elements, so nothing is checked until a field is asked for.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawEvent(pub Vec<Value>);

impl RawEvent {
    pub fn timestamp(&self) -> Option<&Value> {
        self.0.first()
    }

    pub fn event_type(&self) -> Option<&str> {
        self.0.get(1).and_then(Value::as_str)
    }

    /// `None` when the record is too short to carry a victim at all.
    pub fn victim(&self) -> Option<&Value> {
        self.0.get(2)
    }

    pub fn killer_info(&self) -> &Value {
        self.0.get(3).unwrap_or(&Value::Null)
    }

    pub fn distance(&self) -> Option<&Number> {
        match self.0.get(4) {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MissionTime {
    #[serde(default, rename = "systemTimeUTC")]
    pub system_time_utc: Option<String>,
}

/// Whole recorded session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionLog {
    #[serde(default)]
    pub entities: Option<Vec<RawEntity>>,
    #[serde(default)]
    pub events: Option<Vec<RawEvent>>,
    #[serde(default)]
    pub mission_name: Option<String>,
    #[serde(default)]
    pub mission_author: Option<String>,
    #[serde(default)]
    pub world_name: Option<String>,
    #[serde(default)]
    pub times: Vec<MissionTime>,
}

impl SessionLog {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| StatsError::malformed(e.to_string()))
    }

    pub fn entities(&self) -> Result<&[RawEntity]> {
        self.entities
            .as_deref()
            .ok_or_else(|| StatsError::missing("entities", "session log"))
    }

    pub fn events(&self) -> Result<&[RawEvent]> {
        self.events
            .as_deref()
            .ok_or_else(|| StatsError::missing("events", "session log"))
    }

    /// Wall-clock start of the mission (`times[0].systemTimeUTC`).
    pub fn start_time(&self) -> Result<&str> {
        self.times
            .first()
            .and_then(|t| t.system_time_utc.as_deref())
            .ok_or_else(|| StatsError::missing("times[0].systemTimeUTC", "session log"))
    }
}

/// JavaScript-style truthiness for loosely typed recorder flags.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use serde::{Deserialize, Serialize};

use super::{EventRecord, EventType, NormalizedEvent};
use crate::session_log::key_of;

/// Everything one source did, split by event kind. A present list is never
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBucket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit: Option<Vec<EventRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killed: Option<Vec<EventRecord>>,
}

impl EventBucket {
    pub fn push(&mut self, event_type: EventType, record: EventRecord) {
        let list = match event_type {
            EventType::Hit => &mut self.hit,
            EventType::Killed => &mut self.killed,
        };
        list.get_or_insert_with(Vec::new).push(record);
    }

    pub fn hits(&self) -> &[EventRecord] {
        self.hit.as_deref().unwrap_or_default()
    }

    pub fn kills(&self) -> &[EventRecord] {
        self.killed.as_deref().unwrap_or_default()
    }
}

/// Buckets keyed by source, iterated in the order sources first appeared.
#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    order: Vec<String>,
    buckets: HashMap<String, EventBucket>,
}

impl EventIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bucket for `key`, created (and appended to the iteration order) on
    /// first use.
    pub fn bucket_mut(&mut self, key: String) -> &mut EventBucket {
        match self.buckets.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.order.push(entry.key().clone());
                entry.insert(EventBucket::default())
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&EventBucket> {
        self.buckets.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.buckets.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EventBucket)> {
        self.order
            .iter()
            .filter_map(|key| self.buckets.get(key).map(|bucket| (key.as_str(), bucket)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Group events by source (unattributed ones under `"undefined"`), then by
/// kind, keeping input order inside each list.
pub fn aggregate_events(events: &[NormalizedEvent]) -> EventIndex {
    let mut index = EventIndex::new();
    for event in events {
        index
            .bucket_mut(key_of(event.source.as_ref()))
            .push(event.event_type, event.record());
    }

    tracing::debug!(sources = index.len(), "Aggregated events by source");
    index
}

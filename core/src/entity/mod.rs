//! Per-entity summaries built from the raw entity list.

use hashbrown::HashMap;

use crate::error::{Result, StatsError};
use crate::numeric::round_metric;
use crate::session_log::{EntityId, PositionSample, RawEntity, UNDEFINED_KEY, key_of};

/// Which entity field keys the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexKey {
    #[default]
    Id,
    /// Used for lookups by display name, e.g. matching player slots.
    Name,
}

impl IndexKey {
    fn key_for(self, entity: &RawEntity) -> String {
        match self {
            IndexKey::Id => key_of(entity.id.as_ref()),
            IndexKey::Name => entity
                .name
                .clone()
                .unwrap_or_else(|| UNDEFINED_KEY.to_string()),
        }
    }
}

/// Identity plus derived movement and shot count for one entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntitySummary {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub is_player: bool,
    pub side: Option<String>,
    pub entity_type: Option<String>,
    pub total_movement: u64,
    pub shots_fired: u64,
}

impl EntitySummary {
    pub fn from_raw(entity: &RawEntity) -> Result<Self> {
        let frames_fired = entity
            .frames_fired
            .as_ref()
            .ok_or_else(|| StatsError::missing("framesFired", entity.describe()))?;

        Ok(Self {
            id: entity.id.clone(),
            name: entity.name.clone(),
            is_player: entity.is_player(),
            side: entity.side.clone(),
            entity_type: entity.entity_type.clone(),
            total_movement: round_metric(total_movement(entity.positions())),
            shots_fired: frames_fired.len() as u64,
        })
    }
}

/// Path length over consecutive samples. Fewer than two samples is no movement.
pub fn total_movement(positions: &[PositionSample]) -> f64 {
    positions
        .windows(2)
        .map(|pair| pair[1].distance_to(&pair[0]))
        .sum()
}

pub type EntityIndex = HashMap<String, EntitySummary>;

/// Summarize every entity, keyed by `key`. A later entity with the same key
/// replaces the earlier one.
pub fn build_entity_index(entities: &[RawEntity], key: IndexKey) -> Result<EntityIndex> {
    let mut index = EntityIndex::with_capacity(entities.len());
    for entity in entities {
        let summary = EntitySummary::from_raw(entity)?;
        if index.insert(key.key_for(entity), summary).is_some() {
            tracing::debug!(entity = %entity.describe(), ?key, "Duplicate entity key, keeping latest");
        }
    }
    Ok(index)
}

//! Live entity storage
//!
//! Entities are kept in spawn order. Resolution marks them consumed in place;
//! `purge_consumed` drops them afterwards so no pass ever skips a neighbour.

use serde::{Deserialize, Serialize};

use super::state::{Entity, EntityKind};
use crate::consts::DESPAWN_Z;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityStore {
    entities: Vec<Entity>,
    next_id: u32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Create an entity at the spawn line and return its ID
    pub fn spawn(&mut self, kind: EntityKind, lane: Option<u8>, speed: f32) -> u32 {
        let id = self.next_entity_id();
        self.entities.push(Entity::spawn(id, kind, lane, speed));
        id
    }

    /// Insert a pre-built entity (tests and scripted scenarios)
    pub fn insert(&mut self, mut entity: Entity) -> u32 {
        entity.id = self.next_entity_id();
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    /// Move everything toward the player and cull what has passed.
    /// Returns the number of entities culled.
    pub fn advance(&mut self, move_distance: f32) -> usize {
        for entity in &mut self.entities {
            entity.pos.z -= move_distance;
        }
        let before = self.entities.len();
        self.entities.retain(|e| e.pos.z >= DESPAWN_Z);
        before - self.entities.len()
    }

    /// Drop every consumed entity. Returns how many were removed.
    pub fn purge_consumed(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !e.consumed);
        before - self.entities.len()
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn get(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count_of(&self, pred: impl Fn(&EntityKind) -> bool) -> usize {
        self.entities.iter().filter(|e| pred(&e.kind)).count()
    }
}

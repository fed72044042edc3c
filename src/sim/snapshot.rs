//! Per-tick view handed to the renderer/UI

use serde::{Deserialize, Serialize};

use super::collision::SimEvent;
use super::state::{CarModel, EntityKind, GameState, RunPhase};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub lane: Option<u8>,
    pub x: f32,
    pub z: f32,
    pub consumed: bool,
    pub fall_speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player_lane: u8,
    pub player_x: f32,
    pub player_z: f32,
    pub shield_active: bool,
    pub shield_remaining_ms: f32,
    pub distance: f32,
    pub carry_currency: u32,
    pub banked_currency: u32,
    pub speed: f32,
    pub entities: Vec<EntityView>,
    pub phase: RunPhase,
    pub car: CarModel,
    /// What happened during the tick that produced this snapshot
    pub events: Vec<SimEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState, events: Vec<SimEvent>) -> Self {
        let player = &state.player;
        let pos = player.pos();
        Self {
            player_lane: player.lane,
            player_x: pos.x,
            player_z: pos.z,
            shield_active: player.shield_active(),
            shield_remaining_ms: player.shield_remaining_ms,
            distance: player.distance,
            carry_currency: player.carry_currency,
            banked_currency: player.banked_currency,
            speed: state.run.speed,
            entities: state
                .entities
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    kind: e.kind,
                    lane: e.lane,
                    x: e.pos.x,
                    z: e.pos.z,
                    consumed: e.consumed,
                    fall_speed: e.fall_speed,
                })
                .collect(),
            phase: state.run.phase,
            car: state.run.car,
            events,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

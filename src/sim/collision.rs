//! Collision detection and resolution
//!
//! Overlap is a plain axis-aligned box test on the road plane (lateral x,
//! longitudinal z). Height is carried on the boxes but never compared:
//! everything sits on the road.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entities::EntityStore;
use super::state::{Entity, EntityKind, PlayerState, RunPhase};
use crate::consts::{CHECKPOINT_RANGE, PLAYER_Z};

/// Something the front end may want to react to (sound, flash, counter bump)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    CoinCollected { value: u32 },
    ShieldCollected,
    /// Shield soaked up an obstacle hit
    ShieldAbsorbed,
    CheckpointBanked { amount: u32 },
    /// Unshielded crash; `lost` is the carry that was never banked
    Crashed { lost: u32 },
}

/// Box overlap on the x/z plane. `size` is full extents.
#[inline]
pub fn overlaps(a_pos: Vec3, a_size: Vec3, b_pos: Vec3, b_size: Vec3) -> bool {
    let dx = (a_pos.x - b_pos.x).abs();
    let dz = (a_pos.z - b_pos.z).abs();
    dx < (a_size.x + b_size.x) / 2.0 && dz < (a_size.z + b_size.z) / 2.0
}

/// Checkpoints bank by longitudinal proximity alone, whatever the lane
#[inline]
pub fn checkpoint_in_range(checkpoint_z: f32) -> bool {
    (checkpoint_z - PLAYER_Z).abs() < CHECKPOINT_RANGE
}

/// Whether this entity is touching the player right now
pub fn touches_player(player: &PlayerState, entity: &Entity) -> bool {
    match entity.kind {
        EntityKind::Checkpoint => checkpoint_in_range(entity.pos.z),
        _ => overlaps(player.pos(), player.size(), entity.pos, entity.size),
    }
}

/// Outcome of resolving one entity against the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Not touching, or already consumed
    None,
    /// Entity consumed; keep going
    Consumed(SimEvent),
    /// Run is over; stop processing this tick
    GameOver(SimEvent),
}

/// Apply the effect of the player touching `entity`.
///
/// A consumed entity is a no-op, so calling this twice for the same contact
/// changes nothing the second time.
pub fn resolve(player: &mut PlayerState, entity: &mut Entity, shield_ms: f32) -> Resolution {
    if entity.consumed || !touches_player(player, entity) {
        return Resolution::None;
    }

    let event = match entity.kind {
        EntityKind::Coin { value } => {
            player.carry_currency = player.carry_currency.saturating_add(value);
            SimEvent::CoinCollected { value }
        }
        EntityKind::Shield => {
            player.shield_remaining_ms = shield_ms;
            SimEvent::ShieldCollected
        }
        EntityKind::Cone | EntityKind::Truck => {
            if !player.shield_active() {
                // The obstacle stays on the road under the wreck
                return Resolution::GameOver(SimEvent::Crashed {
                    lost: player.carry_currency,
                });
            }
            player.shield_remaining_ms = 0.0;
            SimEvent::ShieldAbsorbed
        }
        EntityKind::Checkpoint => {
            let amount = player.carry_currency;
            player.banked_currency = player.banked_currency.saturating_add(amount);
            player.carry_currency = 0;
            SimEvent::CheckpointBanked { amount }
        }
    };
    entity.consume();
    Resolution::Consumed(event)
}

/// Resolve every live entity against the player in store order.
///
/// Consumed entities are purged before returning. A crash flips `phase` to
/// `GameOver` and skips whatever was left to check this tick.
pub fn resolve_all(
    player: &mut PlayerState,
    store: &mut EntityStore,
    phase: &mut RunPhase,
    shield_ms: f32,
    events: &mut Vec<SimEvent>,
) {
    for entity in store.iter_mut() {
        match resolve(player, entity, shield_ms) {
            Resolution::None => {}
            Resolution::Consumed(event) => {
                match event {
                    SimEvent::CheckpointBanked { amount } => {
                        log::info!(
                            "Checkpoint: banked {} (total {})",
                            amount,
                            player.banked_currency
                        );
                    }
                    other => log::debug!("{:?}", other),
                }
                events.push(event);
            }
            Resolution::GameOver(event) => {
                *phase = RunPhase::GameOver;
                events.push(event);
                break;
            }
        }
    }
    store.purge_consumed();
}

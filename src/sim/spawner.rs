//! Spawn scheduling
//!
//! Random obstacles/pickups on a speed-scaled timer, plus distance-driven
//! checkpoints that never depend on the dice.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entities::EntityStore;
use super::state::{EntityKind, RunState};
use crate::consts::LANE_COUNT;
use crate::tuning::{SpawnWeights, Tuning};

/// Seeded source of spawn decisions
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Count down the spawn timer and roll a new entity when it expires.
    /// Returns the spawned kind, if any.
    pub fn update(
        &mut self,
        run: &mut RunState,
        store: &mut EntityStore,
        tuning: &Tuning,
        delta_ms: f32,
    ) -> Option<EntityKind> {
        run.next_spawn_in_ms -= delta_ms;
        if run.next_spawn_in_ms > 0.0 {
            return None;
        }

        run.next_spawn_in_ms = self.roll_interval(tuning, run.speed);
        let kind = pick_kind(&tuning.spawn_weights, tuning.coin_value, self.rng.random());
        let lane = self.rng.random_range(0..LANE_COUNT);
        let id = store.spawn(kind, Some(lane), run.speed);
        log::debug!("Spawned {:?} #{} in lane {}", kind, id, lane);
        Some(kind)
    }

    /// Time until the next random spawn. Faster runs spawn more often.
    fn roll_interval(&mut self, tuning: &Tuning, speed: f32) -> f32 {
        let base = if tuning.spawn_interval_max_ms > tuning.spawn_interval_min_ms {
            self.rng
                .random_range(tuning.spawn_interval_min_ms..tuning.spawn_interval_max_ms)
        } else {
            tuning.spawn_interval_min_ms
        };
        base / (speed / tuning.base_speed).max(f32::EPSILON)
    }
}

/// Spawn a checkpoint once `distance` reaches the scheduled mark.
/// Returns true if one was created.
pub fn update_checkpoint(
    run: &mut RunState,
    store: &mut EntityStore,
    tuning: &Tuning,
    distance: f32,
) -> bool {
    if distance < run.next_checkpoint_distance {
        return false;
    }
    store.spawn(EntityKind::Checkpoint, None, run.speed);
    run.next_checkpoint_distance += tuning.checkpoint_gap(distance);
    log::debug!(
        "Checkpoint spawned at {:.0} m, next at {:.0} m",
        distance,
        run.next_checkpoint_distance
    );
    true
}

/// Map a uniform roll in [0, 1) onto the weighted kind table.
/// Anything past the last threshold (float slop) falls back to a coin.
pub fn pick_kind(weights: &SpawnWeights, coin_value: u32, roll: f32) -> EntityKind {
    let total = weights.total();
    let thresholds = [
        (weights.coin, EntityKind::Coin { value: coin_value }),
        (weights.cone, EntityKind::Cone),
        (weights.truck, EntityKind::Truck),
        (weights.shield, EntityKind::Shield),
    ];

    let mut cumulative = 0.0;
    for (weight, kind) in thresholds {
        cumulative += weight / total;
        if roll < cumulative {
            return kind;
        }
    }
    EntityKind::Coin { value: coin_value }
}

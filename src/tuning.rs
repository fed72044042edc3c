//! Data-driven game balance
//!
//! Every number the simulation uses to pace a run lives here so a front end
//! can ship a JSON override without rebuilding. Defaults match `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Relative spawn weights for the random roll
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnWeights {
    pub coin: f32,
    pub cone: f32,
    pub truck: f32,
    pub shield: f32,
}

impl Default for SpawnWeights {
    fn default() -> Self {
        Self {
            coin: 0.55,
            cone: 0.25,
            truck: 0.15,
            shield: 0.05,
        }
    }
}

impl SpawnWeights {
    pub fn total(&self) -> f32 {
        self.coin + self.cone + self.truck + self.shield
    }
}

/// Tunable run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub base_speed: f32,
    pub ramp_window_ms: f32,
    pub acceleration: f32,
    pub movement_scale: f32,
    pub distance_scale: f32,

    pub spawn_interval_min_ms: f32,
    pub spawn_interval_max_ms: f32,
    pub spawn_weights: SpawnWeights,

    pub first_checkpoint: f32,
    pub checkpoint_base_gap: f32,
    pub checkpoint_gap_per_metre: f32,
    pub checkpoint_max_bonus: f32,

    pub shield_ms: f32,
    pub coin_value: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_speed: BASE_SPEED,
            ramp_window_ms: RAMP_WINDOW_MS,
            acceleration: ACCELERATION,
            movement_scale: MOVEMENT_SCALE,
            distance_scale: DISTANCE_SCALE,

            spawn_interval_min_ms: SPAWN_INTERVAL_MIN_MS,
            spawn_interval_max_ms: SPAWN_INTERVAL_MAX_MS,
            spawn_weights: SpawnWeights::default(),

            first_checkpoint: FIRST_CHECKPOINT,
            checkpoint_base_gap: CHECKPOINT_BASE_GAP,
            checkpoint_gap_per_metre: CHECKPOINT_GAP_PER_METRE,
            checkpoint_max_bonus: CHECKPOINT_MAX_BONUS,

            shield_ms: SHIELD_MS,
            coin_value: COIN_VALUE,
        }
    }
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error(transparent)]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("spawn weights must sum to a positive total")]
    EmptySpawnWeights,

    #[error("spawn interval is inverted: min {min} > max {max}")]
    InvertedSpawnInterval { min: f32, max: f32 },
}

impl Tuning {
    /// Parse and validate a JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let all = [
            ("base_speed", self.base_speed),
            ("ramp_window_ms", self.ramp_window_ms),
            ("acceleration", self.acceleration),
            ("movement_scale", self.movement_scale),
            ("distance_scale", self.distance_scale),
            ("spawn_interval_min_ms", self.spawn_interval_min_ms),
            ("spawn_interval_max_ms", self.spawn_interval_max_ms),
            ("spawn_weights.coin", self.spawn_weights.coin),
            ("spawn_weights.cone", self.spawn_weights.cone),
            ("spawn_weights.truck", self.spawn_weights.truck),
            ("spawn_weights.shield", self.spawn_weights.shield),
            ("first_checkpoint", self.first_checkpoint),
            ("checkpoint_base_gap", self.checkpoint_base_gap),
            ("checkpoint_gap_per_metre", self.checkpoint_gap_per_metre),
            ("checkpoint_max_bonus", self.checkpoint_max_bonus),
            ("shield_ms", self.shield_ms),
        ];
        for (field, value) in all {
            // JSON overflow like 1e300 deserializes to infinity
            if !value.is_finite() {
                return Err(TuningError::NonFinite { field, value });
            }
        }

        let positive = [
            ("base_speed", self.base_speed),
            ("ramp_window_ms", self.ramp_window_ms),
            ("movement_scale", self.movement_scale),
            ("spawn_interval_min_ms", self.spawn_interval_min_ms),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let non_negative = [
            ("acceleration", self.acceleration),
            ("distance_scale", self.distance_scale),
            ("first_checkpoint", self.first_checkpoint),
            ("checkpoint_base_gap", self.checkpoint_base_gap),
            ("checkpoint_gap_per_metre", self.checkpoint_gap_per_metre),
            ("checkpoint_max_bonus", self.checkpoint_max_bonus),
            ("shield_ms", self.shield_ms),
            ("spawn_weights.coin", self.spawn_weights.coin),
            ("spawn_weights.cone", self.spawn_weights.cone),
            ("spawn_weights.truck", self.spawn_weights.truck),
            ("spawn_weights.shield", self.spawn_weights.shield),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }

        if self.spawn_weights.total() <= 0.0 {
            return Err(TuningError::EmptySpawnWeights);
        }

        if self.spawn_interval_min_ms > self.spawn_interval_max_ms {
            return Err(TuningError::InvertedSpawnInterval {
                min: self.spawn_interval_min_ms,
                max: self.spawn_interval_max_ms,
            });
        }

        Ok(())
    }

    /// Speed cap at a given run time. Grows without bound.
    pub fn speed_cap(&self, elapsed_ms: f32) -> f32 {
        self.base_speed * (1.0 + elapsed_ms / self.ramp_window_ms)
    }

    /// Gap to the next checkpoint after one spawns at `distance`
    pub fn checkpoint_gap(&self, distance: f32) -> f32 {
        self.checkpoint_base_gap + (distance * self.checkpoint_gap_per_metre).min(self.checkpoint_max_bonus)
    }
}

//! Lane Dash - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Headless simulation (spawning, movement, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser bindings for a JS front end

pub mod platform;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Maximum simulated time per tick (ms) so a backgrounded tab can't jump the world
    pub const MAX_TICK_MS: f32 = 50.0;
    /// Nominal frame time used by headless drivers (60 Hz)
    pub const FRAME_MS: f32 = 1000.0 / 60.0;

    /// Road dimensions
    pub const ROAD_WIDTH: f32 = 15.0;
    pub const LANE_COUNT: u8 = 3;
    pub const LANE_WIDTH: f32 = ROAD_WIDTH / LANE_COUNT as f32;
    /// Lane the player starts in (middle)
    pub const START_LANE: u8 = 1;

    /// Player car sits near the far end of the road; entities travel toward it
    pub const PLAYER_Z: f32 = -7.0;
    pub const PLAYER_WIDTH: f32 = 1.4;
    pub const PLAYER_HEIGHT: f32 = 0.8;
    pub const PLAYER_DEPTH: f32 = 2.6;
    /// Fraction of the remaining lateral gap closed per 60 Hz frame
    pub const LANE_EASE: f32 = 0.15;

    /// Entities appear here...
    pub const SPAWN_Z: f32 = 30.0;
    /// ...and are culled once they pass here
    pub const DESPAWN_Z: f32 = -15.0;

    /// Speed ramp
    pub const BASE_SPEED: f32 = 2.0;
    /// Time for the speed cap to grow by one base speed
    pub const RAMP_WINDOW_MS: f32 = 40_000.0;
    /// Speed gained per millisecond
    pub const ACCELERATION: f32 = 0.002;
    /// World units moved per unit of speed per second
    pub const MOVEMENT_SCALE: f32 = 6.0;
    /// Metres of distance credited per world unit moved
    pub const DISTANCE_SCALE: f32 = 2.5;

    /// Random spawn interval at base speed (ms)
    pub const SPAWN_INTERVAL_MIN_MS: f32 = 600.0;
    pub const SPAWN_INTERVAL_MAX_MS: f32 = 1200.0;

    /// Checkpoint scheduling
    pub const FIRST_CHECKPOINT: f32 = 400.0;
    pub const CHECKPOINT_BASE_GAP: f32 = 500.0;
    pub const CHECKPOINT_GAP_PER_METRE: f32 = 0.1;
    pub const CHECKPOINT_MAX_BONUS: f32 = 1000.0;
    /// Longitudinal distance at which a checkpoint banks carried coins
    pub const CHECKPOINT_RANGE: f32 = 1.5;

    /// Shield duration after pickup (ms)
    pub const SHIELD_MS: f32 = 3000.0;
    /// Currency granted per coin
    pub const COIN_VALUE: u32 = 1;
    /// Extra fall speed for coins so they read as "zippier" than obstacles
    pub const COIN_FALL_BONUS: f32 = 2.0;
    pub const FALL_SPEED_FACTOR: f32 = 0.7;
}

/// Lateral centre of a lane (lane 0 is leftmost)
#[inline]
pub fn lane_to_x(lane: u8) -> f32 {
    use consts::{LANE_WIDTH, ROAD_WIDTH};
    -ROAD_WIDTH / 2.0 + LANE_WIDTH / 2.0 + lane as f32 * LANE_WIDTH
}

/// Clamp a frame delta into the range a single tick may simulate
#[inline]
pub fn bounded_delta(delta_ms: f32) -> f32 {
    if delta_ms.is_nan() {
        return 0.0;
    }
    delta_ms.clamp(0.0, consts::MAX_TICK_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_centres() {
        assert!((lane_to_x(0) + 5.0).abs() < 1e-5);
        assert!(lane_to_x(1).abs() < 1e-5);
        assert!((lane_to_x(2) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounded_delta() {
        assert_eq!(bounded_delta(16.0), 16.0);
        assert_eq!(bounded_delta(5_000.0), consts::MAX_TICK_MS);
        assert_eq!(bounded_delta(-3.0), 0.0);
        assert_eq!(bounded_delta(f32::NAN), 0.0);
    }
}

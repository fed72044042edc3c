//! Speed ramp
//!
//! Speed creeps up every tick toward a cap that itself grows linearly with
//! run time. The cap has no ceiling, so late runs keep getting harder.

use crate::tuning::Tuning;

/// Speed after one tick, and the cap it was clamped to
pub fn ramp_speed(tuning: &Tuning, speed: f32, elapsed_ms: f32, delta_ms: f32) -> (f32, f32) {
    let cap = tuning.speed_cap(elapsed_ms);
    // Never slow down, even if a retuned cap dips below the current speed
    let next = (speed + tuning.acceleration * delta_ms).min(cap).max(speed);
    (next, cap)
}

/// World units covered this tick at `speed`
#[inline]
pub fn move_distance(tuning: &Tuning, speed: f32, delta_ms: f32) -> f32 {
    speed * delta_ms / 1000.0 * tuning.movement_scale
}

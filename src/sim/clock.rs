//! Wall-clock to simulation delta
//!
//! Front ends hand us raw frame timestamps; the simulation only ever sees a
//! delta clamped to `MAX_TICK_MS`.

use crate::bounded_delta;

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounded delta since the previous frame. The first frame yields zero.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) => (now_ms - last) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        bounded_delta(delta)
    }

    /// Forget the last timestamp (e.g. after the tab was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

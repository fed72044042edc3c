//! Browser binding
//!
//! The JS side owns the canvas, overlays and the animation frame; it forwards
//! key/pointer events here and reads back a JSON snapshot each frame.

use wasm_bindgen::prelude::*;

use crate::sim::{CarModel, FrameClock, GameState, LaneChange, TickInput, tick};
use crate::tuning::Tuning;

/// Install logging and the panic hook. Safe to call more than once.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        // A logger is already installed; route the notice through it
        log::warn!("console_log not installed: {}", e);
    }
}

#[wasm_bindgen]
pub struct WebRunner {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
}

#[wasm_bindgen]
impl WebRunner {
    /// New runner. `tuning_json` may be empty to use the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(car: &str, tuning_json: &str) -> Result<WebRunner, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let car = CarModel::from_str(car).unwrap_or_default();
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        log::info!("WebRunner created (seed {})", seed);
        Ok(Self {
            state: GameState::with_tuning(seed, car, tuning),
            clock: FrameClock::new(),
            input: TickInput::default(),
        })
    }

    pub fn start(&mut self) {
        self.input.start = true;
    }

    pub fn pause(&mut self) {
        self.input.pause = true;
    }

    pub fn resume(&mut self) {
        // Don't count the time spent behind the overlay
        self.clock.reset();
        self.input.resume = true;
    }

    pub fn restart(&mut self) {
        self.input.restart = true;
    }

    pub fn left(&mut self) {
        self.input.lane_change = Some(LaneChange::Left);
    }

    pub fn right(&mut self) {
        self.input.lane_change = Some(LaneChange::Right);
    }

    pub fn set_car(&mut self, car: &str) {
        if let Some(car) = CarModel::from_str(car) {
            self.state.set_car(car);
        }
    }

    pub fn set_idle_mode(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Advance one frame and return the snapshot as JSON
    pub fn frame(&mut self, now_ms: f64) -> Result<String, JsValue> {
        let delta = self.clock.delta(now_ms);
        let snapshot = tick(&mut self.state, &self.input, delta);

        // One-shot inputs are consumed by the tick
        let idle_mode = self.input.idle_mode;
        self.input = TickInput {
            idle_mode,
            ..Default::default()
        };

        snapshot
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Game-over report as JSON
    pub fn summary(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.state.summary()).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

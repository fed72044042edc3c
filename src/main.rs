//! Lane Dash headless driver
//!
//! Runs a single autopilot game at a fixed 60 Hz cadence and prints the
//! game-over report as JSON. Usage: `lane-dash [seed] [max_ticks] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::process::ExitCode;

    use lane_dash::Tuning;
    use lane_dash::consts::FRAME_MS;
    use lane_dash::sim::{CarModel, GameState, RunPhase, TickInput, tick};

    const DEFAULT_SEED: u64 = 12345;
    /// Ten simulated minutes
    const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 10;

    fn load_tuning(path: Option<&str>) -> Result<Tuning, String> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
        Tuning::from_json(&json).map_err(|e| format!("{path}: {e}"))
    }

    pub fn run() -> ExitCode {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args: Vec<String> = std::env::args().skip(1).collect();
        let seed = args
            .first()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SEED);
        let max_ticks = args
            .get(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_TICKS);
        let tuning = match load_tuning(args.get(2).map(String::as_str)) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Invalid tuning: {}", e);
                return ExitCode::FAILURE;
            }
        };

        match tuning.to_json() {
            Ok(json) => log::debug!("Tuning: {}", json),
            Err(e) => log::warn!("Failed to encode tuning: {}", e),
        }

        let mut state = GameState::with_tuning(seed, CarModel::default(), tuning);
        let start = TickInput {
            start: true,
            idle_mode: true,
            ..Default::default()
        };
        let autopilot = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        log::info!("Seed {}, up to {} ticks", seed, max_ticks);
        let mut snapshot = tick(&mut state, &start, FRAME_MS);
        while snapshot.phase == RunPhase::Running && state.run.tick_count < max_ticks {
            snapshot = tick(&mut state, &autopilot, FRAME_MS);
        }

        if snapshot.phase != RunPhase::GameOver {
            log::info!("Tick limit reached at {:.0} m", state.player.distance);
        }

        match serde_json::to_string_pretty(&state.summary()) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("Failed to encode summary: {}", e);
                ExitCode::FAILURE
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is `platform::web::init`
}

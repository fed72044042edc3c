//! Simulation tick
//!
//! One call advances the world by one rendered frame, in a fixed order:
//! speed ramp, lane input, movement, spawning, collisions, distance.

use super::autopilot::choose_lane_change;
use super::collision::{SimEvent, resolve_all};
use super::difficulty::{move_distance, ramp_speed};
use super::snapshot::Snapshot;
use super::spawner::update_checkpoint;
use super::state::{GameState, LaneChange, RunPhase};
use crate::bounded_delta;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Lane change intent (arrow keys / screen halves)
    pub lane_change: Option<LaneChange>,
    /// Leave the start screen
    pub start: bool,
    pub pause: bool,
    pub resume: bool,
    pub restart: bool,
    /// Idle/demo mode - autopilot steers
    pub idle_mode: bool,
}

/// Apply control inputs (phase changes and lane intents)
fn apply_controls(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
    }
    if input.start {
        state.start();
    }
    if input.pause {
        state.pause();
    }
    if input.resume {
        state.resume();
    }
    if let Some(change) = input.lane_change {
        state.request_lane_change(change);
    }
}

/// Advance the game state by one frame and return what the renderer should show
pub fn tick(state: &mut GameState, input: &TickInput, delta_ms: f32) -> Snapshot {
    apply_controls(state, input);

    // Frozen phases still emit a snapshot so the front end can keep drawing
    if !state.run.phase.is_live() {
        return Snapshot::capture(state, Vec::new());
    }

    let delta_ms = bounded_delta(delta_ms);
    state.run.tick_count += 1;
    state.run.elapsed_ms += delta_ms;

    // --- DIFFICULTY ---
    let (speed, _cap) =
        ramp_speed(&state.tuning, state.run.speed, state.run.elapsed_ms, delta_ms);
    state.run.speed = speed;

    // --- PLAYER ---
    if input.idle_mode && state.player.pending_lane_change.is_none() {
        state.player.pending_lane_change = choose_lane_change(state);
    }
    let GameState {
        tuning,
        run,
        player,
        entities,
        spawner,
    } = state;
    player.commit_lane_change();
    player.ease_toward_lane(delta_ms);
    player.tick_shield(delta_ms);

    // --- MOVEMENT ---
    let step = move_distance(tuning, run.speed, delta_ms);
    entities.advance(step);

    // --- SPAWNING ---
    spawner.update(run, entities, tuning, delta_ms);
    update_checkpoint(run, entities, tuning, player.distance);

    // --- COLLISIONS ---
    let mut events: Vec<SimEvent> = Vec::new();
    resolve_all(player, entities, &mut run.phase, tuning.shield_ms, &mut events);
    if run.phase == RunPhase::GameOver {
        let summary = state.summary();
        log::info!(
            "Game over: {} m, banked {}, lost {}",
            summary.distance_m,
            summary.banked,
            summary.lost
        );
        return Snapshot::capture(state, events);
    }

    // --- DISTANCE ---
    player.distance += step * tuning.distance_scale;

    Snapshot::capture(state, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::lane_to_x;
    use crate::sim::state::{Entity, EntityKind};
    use proptest::prelude::*;

    const DT: f32 = FRAME_MS;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    /// Put an entity where it will sit on the player after this tick's movement
    fn place_on_player(state: &mut GameState, kind: EntityKind, lane: Option<u8>) {
        let step = move_distance(&state.tuning, state.run.speed + ACCELERATION * DT, DT);
        let mut e = Entity::spawn(0, kind, lane, state.run.speed);
        e.pos.z = PLAYER_Z + step;
        state.entities.insert(e);
    }

    /// Keep the random spawner quiet so scripted scenarios stay exact
    fn hold_spawns(state: &mut GameState) {
        state.run.next_spawn_in_ms = f32::MAX;
    }

    #[test]
    fn test_not_started_is_frozen() {
        let mut state = GameState::new(1);
        let snap = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(snap.phase, RunPhase::NotStarted);
        assert_eq!(state.run.tick_count, 0);
        assert!(state.entities.is_empty());
    }

    #[test]
    fn test_start_input_runs_same_tick() {
        let mut state = GameState::new(1);
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        let snap = tick(&mut state, &input, DT);
        assert_eq!(snap.phase, RunPhase::Running);
        assert_eq!(state.run.tick_count, 1);
        // Spawn timer starts at zero, so something appears immediately
        assert_eq!(snap.entities.len(), 1);
        assert!(snap.distance > 0.0);
    }

    #[test]
    fn test_pause_freezes_world() {
        let mut state = running(5);
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), DT);
        }
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        let before = tick(&mut state, &pause, DT);
        assert_eq!(before.phase, RunPhase::Paused);

        for _ in 0..30 {
            let snap = tick(&mut state, &TickInput::default(), DT);
            assert_eq!(snap.distance, before.distance);
            assert_eq!(snap.entities, before.entities);
        }

        let resume = TickInput {
            resume: true,
            ..Default::default()
        };
        let after = tick(&mut state, &resume, DT);
        assert_eq!(after.phase, RunPhase::Running);
        assert!(after.distance > before.distance);
    }

    #[test]
    fn test_lane_change_applied_once_per_tick() {
        let mut state = running(1);
        hold_spawns(&mut state);
        let left = TickInput {
            lane_change: Some(LaneChange::Left),
            ..Default::default()
        };
        let snap = tick(&mut state, &left, DT);
        assert_eq!(snap.player_lane, 0);

        // Already at the edge: dropped silently
        let snap = tick(&mut state, &left, DT);
        assert_eq!(snap.player_lane, 0);

        let snap = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(snap.player_lane, 0);
    }

    #[test]
    fn test_lane_intent_survives_pause() {
        let mut state = running(1);
        hold_spawns(&mut state);
        state.pause();
        let right = TickInput {
            lane_change: Some(LaneChange::Right),
            ..Default::default()
        };
        tick(&mut state, &right, DT);
        assert_eq!(state.player.lane, 1);

        state.resume();
        let snap = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(snap.player_lane, 2);
    }

    #[test]
    fn test_player_eases_toward_lane() {
        let mut state = running(1);
        hold_spawns(&mut state);
        state.request_lane_change(LaneChange::Right);
        let first = tick(&mut state, &TickInput::default(), DT);
        assert!(first.player_x > 0.0 && first.player_x < lane_to_x(2));
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert!((state.player.lateral_x - lane_to_x(2)).abs() < 0.01);
    }

    #[test]
    fn test_checkpoint_banking_in_one_tick() {
        let mut state = running(1);
        hold_spawns(&mut state);
        state.player.carry_currency = 7;
        place_on_player(&mut state, EntityKind::Checkpoint, None);

        let snap = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(snap.banked_currency, 7);
        assert_eq!(snap.carry_currency, 0);
        assert!(snap.entities.is_empty());
        assert_eq!(snap.events, vec![SimEvent::CheckpointBanked { amount: 7 }]);
    }

    #[test]
    fn test_shield_absorbs_truck() {
        let mut state = running(1);
        hold_spawns(&mut state);
        state.player.shield_remaining_ms = SHIELD_MS;
        place_on_player(&mut state, EntityKind::Truck, Some(1));

        let snap = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.player.shield_remaining_ms, 0.0);
        assert!(!snap.shield_active);
        assert!(snap.entities.is_empty());
        assert_eq!(snap.phase, RunPhase::Running);
    }

    #[test]
    fn test_shield_wears_off() {
        let mut state = running(1);
        hold_spawns(&mut state);
        state.player.shield_remaining_ms = 40.0;
        tick(&mut state, &TickInput::default(), 30.0);
        assert!(state.player.shield_active());
        tick(&mut state, &TickInput::default(), 30.0);
        assert_eq!(state.player.shield_remaining_ms, 0.0);
    }

    #[test]
    fn test_crash_ends_run_and_freezes() {
        let mut state = running(1);
        hold_spawns(&mut state);
        state.player.carry_currency = 5;
        state.player.distance = 100.0;
        place_on_player(&mut state, EntityKind::Cone, Some(1));

        let snap = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(snap.phase, RunPhase::GameOver);
        assert_eq!(snap.carry_currency, 5);
        assert_eq!(snap.events, vec![SimEvent::Crashed { lost: 5 }]);
        // Distance is not credited for the crash tick
        assert_eq!(snap.distance, 100.0);
        assert_eq!(state.summary().lost, 5);

        let later = tick(&mut state, &TickInput::default(), DT);
        assert_eq!(later.distance, snap.distance);
        assert_eq!(state.run.tick_count, 1);
    }

    #[test]
    fn test_checkpoint_spawns_once_when_crossing() {
        let mut state = running(1);
        hold_spawns(&mut state);
        state.player.distance = 399.5;

        // Distance crosses 400 on this tick; the spawner sees it on the next
        tick(&mut state, &TickInput::default(), DT);
        assert!(state.player.distance >= 400.0);
        tick(&mut state, &TickInput::default(), DT);
        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.entities.count_of(|k| *k == EntityKind::Checkpoint), 1);
        let gap = state.run.next_checkpoint_distance - 400.0;
        assert!(gap >= CHECKPOINT_BASE_GAP);
        assert!(gap <= CHECKPOINT_BASE_GAP + CHECKPOINT_MAX_BONUS);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = running(11);
        for _ in 0..600 {
            tick(&mut state, &TickInput::default(), DT);
        }
        state.player.carry_currency = 3;
        state.player.banked_currency = 8;
        state.run.phase = RunPhase::GameOver;

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, 0.0);

        assert_eq!(state.phase(), RunPhase::Running);
        assert_eq!(state.player.carry_currency, 0);
        assert_eq!(state.player.banked_currency, 0);
        assert_eq!(state.player.distance, 0.0);
        assert_eq!(state.run.speed, BASE_SPEED);
        // A zero-length tick still rolls the (reset) spawn timer
        assert!(state.entities.len() <= 1);

        state.restart();
        assert!(state.entities.is_empty());
        assert_eq!(state.run.next_checkpoint_distance, FIRST_CHECKPOINT);
    }

    #[test]
    fn test_car_is_cosmetic() {
        use crate::sim::state::CarModel;
        use crate::tuning::Tuning;

        let run = |car| {
            let mut state = GameState::with_tuning(77, car, Tuning::default());
            state.start();
            let mut last = None;
            for _ in 0..300 {
                last = Some(tick(&mut state, &TickInput::default(), DT));
            }
            last.map(|s| (s.distance, s.entities.len(), s.phase))
        };
        assert_eq!(run(CarModel::Jamborghini), run(CarModel::Jambmw));
    }

    #[test]
    fn test_determinism() {
        let mut a = running(99999);
        let mut b = running(99999);
        let inputs = [
            TickInput {
                lane_change: Some(LaneChange::Left),
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
        ];
        for i in 0..900 {
            let input = &inputs[i % inputs.len()];
            assert_eq!(tick(&mut a, input, DT), tick(&mut b, input, DT));
        }
    }

    #[test]
    fn test_huge_delta_is_bounded() {
        let mut state = running(1);
        hold_spawns(&mut state);
        tick(&mut state, &TickInput::default(), 10_000.0);
        assert_eq!(state.run.elapsed_ms, MAX_TICK_MS);
    }

    proptest! {
        #[test]
        fn prop_speed_and_lane_invariants(
            seed in any::<u64>(),
            deltas in prop::collection::vec(0.0f32..200.0, 1..400),
            lanes in prop::collection::vec(0u8..3, 1..400),
        ) {
            let mut state = running(seed);
            let mut last_speed = state.run.speed;
            for (i, dt) in deltas.iter().enumerate() {
                let lane_change = match lanes[i % lanes.len()] {
                    0 => Some(LaneChange::Left),
                    1 => Some(LaneChange::Right),
                    _ => None,
                };
                let input = TickInput { lane_change, idle_mode: i % 2 == 0, ..Default::default() };
                let snap = tick(&mut state, &input, *dt);

                prop_assert!(snap.player_lane < LANE_COUNT);
                if snap.phase == RunPhase::GameOver {
                    break;
                }
                let cap = state.tuning.speed_cap(state.run.elapsed_ms);
                prop_assert!(state.run.speed <= cap + 1e-4);
                prop_assert!(state.run.speed >= last_speed);
                last_speed = state.run.speed;
            }
        }

        #[test]
        fn prop_consumed_entities_never_linger(seed in any::<u64>(), ticks in 1usize..600) {
            let mut state = running(seed);
            for _ in 0..ticks {
                let snap = tick(&mut state, &TickInput { idle_mode: true, ..Default::default() }, DT);
                prop_assert!(snap.entities.iter().all(|e| !e.consumed));
                for event in &snap.events {
                    if let SimEvent::CoinCollected { value } = event {
                        prop_assert_eq!(*value, COIN_VALUE);
                    }
                }
                if snap.phase == RunPhase::GameOver {
                    break;
                }
                prop_assert!(state.player.distance >= 0.0);
            }
        }
    }
}

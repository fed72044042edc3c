//! Game state and core simulation types
//!
//! Everything a run needs lives in one `GameState` value; nothing is global.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entities::EntityStore;
use super::spawner::Spawner;
use crate::consts::*;
use crate::lane_to_x;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting on the start screen
    #[default]
    NotStarted,
    /// Active gameplay
    Running,
    /// Frozen by the player
    Paused,
    /// Hit an obstacle without a shield
    GameOver,
}

impl RunPhase {
    /// Whether the world advances this tick
    pub fn is_live(&self) -> bool {
        *self == RunPhase::Running
    }
}

/// Cosmetic car choice, passed through to the renderer untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CarModel {
    #[default]
    Jamborghini,
    JamboSuv,
    Jambmw,
}

impl CarModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarModel::Jamborghini => "jamborghini",
            CarModel::JamboSuv => "jambosuv",
            CarModel::Jambmw => "jambmw",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "jamborghini" => Some(CarModel::Jamborghini),
            "jambosuv" | "suv" => Some(CarModel::JamboSuv),
            "jambmw" => Some(CarModel::Jambmw),
            _ => None,
        }
    }
}

/// Direction of a lane-change intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneChange {
    Left,
    Right,
}

impl LaneChange {
    /// Lane after applying this change, or `None` if it would leave the road
    pub fn apply(self, lane: u8) -> Option<u8> {
        match self {
            LaneChange::Left => lane.checked_sub(1),
            LaneChange::Right => (lane + 1 < LANE_COUNT).then_some(lane + 1),
        }
    }
}

/// Entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Coin { value: u32 },
    Cone,
    Truck,
    Shield,
    /// Full-width gate that banks carried coins
    Checkpoint,
}

impl EntityKind {
    /// Collision box (full width, height, depth)
    pub fn size(&self) -> Vec3 {
        match self {
            EntityKind::Coin { .. } => Vec3::splat(0.8),
            EntityKind::Cone => Vec3::splat(1.0),
            EntityKind::Truck => Vec3::splat(1.8),
            EntityKind::Shield => Vec3::splat(1.4),
            EntityKind::Checkpoint => Vec3::new(ROAD_WIDTH - 1.0, 0.4, 1.0),
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, EntityKind::Cone | EntityKind::Truck)
    }

    pub fn is_pickup(&self) -> bool {
        matches!(self, EntityKind::Coin { .. } | EntityKind::Shield)
    }
}

/// A spawned object travelling toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// `None` spans every lane (checkpoints)
    pub lane: Option<u8>,
    /// x lateral, y height, z longitudinal
    pub pos: Vec3,
    pub size: Vec3,
    pub consumed: bool,
    /// Travel speed at spawn time, for renderers
    pub fall_speed: f32,
}

impl Entity {
    /// Spawn an entity at the far end of the road
    pub fn spawn(id: u32, kind: EntityKind, lane: Option<u8>, speed: f32) -> Self {
        let x = match (kind, lane) {
            (EntityKind::Checkpoint, _) | (_, None) => 0.0,
            (_, Some(lane)) => lane_to_x(lane),
        };
        let lane = if kind == EntityKind::Checkpoint { None } else { lane };
        let bonus = if matches!(kind, EntityKind::Coin { .. }) {
            COIN_FALL_BONUS
        } else {
            0.0
        };
        Self {
            id,
            kind,
            lane,
            pos: Vec3::new(x, 0.0, SPAWN_Z),
            size: kind.size(),
            consumed: false,
            fall_speed: speed * FALL_SPEED_FACTOR + bonus,
        }
    }

    /// Currency granted on pickup
    pub fn value(&self) -> u32 {
        match self.kind {
            EntityKind::Coin { value } => value,
            _ => 0,
        }
    }

    /// Mark resolved. Returns false if it already was.
    pub fn consume(&mut self) -> bool {
        if self.consumed {
            return false;
        }
        self.consumed = true;
        true
    }
}

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Committed lane, always in `0..LANE_COUNT`
    pub lane: u8,
    /// Eased lateral position; the collision box is centred here
    pub lateral_x: f32,
    /// At most one queued lane change
    pub pending_lane_change: Option<LaneChange>,
    pub shield_remaining_ms: f32,
    pub carry_currency: u32,
    pub banked_currency: u32,
    pub distance: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            lane: START_LANE,
            lateral_x: lane_to_x(START_LANE),
            pending_lane_change: None,
            shield_remaining_ms: 0.0,
            carry_currency: 0,
            banked_currency: 0,
            distance: 0.0,
        }
    }
}

impl PlayerState {
    pub fn shield_active(&self) -> bool {
        self.shield_remaining_ms > 0.0
    }

    /// Collision box centre
    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.lateral_x, 0.0, PLAYER_Z)
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(PLAYER_WIDTH, PLAYER_HEIGHT, PLAYER_DEPTH)
    }

    /// Apply the queued lane change, if any. Off-road requests are dropped.
    pub fn commit_lane_change(&mut self) -> bool {
        let Some(change) = self.pending_lane_change.take() else {
            return false;
        };
        match change.apply(self.lane) {
            Some(lane) => {
                self.lane = lane;
                true
            }
            None => false,
        }
    }

    /// Slide toward the committed lane's centre
    pub fn ease_toward_lane(&mut self, delta_ms: f32) {
        let target = lane_to_x(self.lane);
        // Frame-rate independent version of "close 15% of the gap per 60 Hz frame"
        let t = 1.0 - (1.0 - LANE_EASE).powf(delta_ms / FRAME_MS);
        self.lateral_x += (target - self.lateral_x) * t;
    }

    pub fn tick_shield(&mut self, delta_ms: f32) {
        self.shield_remaining_ms = (self.shield_remaining_ms - delta_ms).max(0.0);
    }
}

/// Pacing and scheduling for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub speed: f32,
    pub next_spawn_in_ms: f32,
    pub next_checkpoint_distance: f32,
    pub elapsed_ms: f32,
    pub phase: RunPhase,
    pub tick_count: u64,
    pub car: CarModel,
}

impl RunState {
    pub fn new(tuning: &Tuning, car: CarModel) -> Self {
        Self {
            speed: tuning.base_speed,
            next_spawn_in_ms: 0.0,
            next_checkpoint_distance: tuning.first_checkpoint,
            elapsed_ms: 0.0,
            phase: RunPhase::NotStarted,
            tick_count: 0,
            car,
        }
    }
}

/// End-of-run report shown on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Whole metres travelled
    pub distance_m: u32,
    pub banked: u32,
    /// Carried coins that were never banked
    pub lost: u32,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub run: RunState,
    pub player: PlayerState,
    pub entities: EntityStore,
    pub spawner: Spawner,
}

impl GameState {
    /// New run with default tuning, waiting on `start()`
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, CarModel::default(), Tuning::default())
    }

    pub fn with_tuning(seed: u64, car: CarModel, tuning: Tuning) -> Self {
        Self {
            run: RunState::new(&tuning, car),
            player: PlayerState::default(),
            entities: EntityStore::new(),
            spawner: Spawner::new(seed),
            tuning,
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.run.phase
    }

    /// Leave the start screen. Only valid from `NotStarted`.
    pub fn start(&mut self) {
        if self.run.phase == RunPhase::NotStarted {
            log::info!(
                "Run started (car: {}, seed {})",
                self.run.car.as_str(),
                self.spawner.seed()
            );
            self.run.phase = RunPhase::Running;
        }
    }

    pub fn pause(&mut self) {
        if self.run.phase == RunPhase::Running {
            self.run.phase = RunPhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.run.phase == RunPhase::Paused {
            self.run.phase = RunPhase::Running;
        }
    }

    /// Reset the run. Before `start()` this only clears state.
    pub fn restart(&mut self) {
        let started = self.run.phase != RunPhase::NotStarted;
        let car = self.run.car;
        self.run = RunState::new(&self.tuning, car);
        self.player = PlayerState::default();
        self.entities.clear();
        if started {
            self.run.phase = RunPhase::Running;
            log::info!("Run restarted (seed {})", self.spawner.seed());
        }
    }

    /// Queue a lane change for the next running tick.
    /// Ignored before the run starts and after it ends.
    pub fn request_lane_change(&mut self, change: LaneChange) {
        if matches!(self.run.phase, RunPhase::Running | RunPhase::Paused) {
            self.player.pending_lane_change = Some(change);
        }
    }

    /// Swap the cosmetic car; has no effect on the simulation
    pub fn set_car(&mut self, car: CarModel) {
        self.run.car = car;
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            distance_m: self.player.distance.floor() as u32,
            banked: self.player.banked_currency,
            lost: self.player.carry_currency,
        }
    }
}

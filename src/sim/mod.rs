//! Headless simulation module
//!
//! All gameplay logic lives here. This module must stay renderer-agnostic:
//! - Caller-supplied, bounded frame deltas only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod difficulty;
pub mod entities;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use clock::FrameClock;
pub use collision::{Resolution, SimEvent, overlaps, resolve};
pub use entities::EntityStore;
pub use snapshot::{EntityView, Snapshot};
pub use spawner::Spawner;
pub use state::{
    CarModel, Entity, EntityKind, GameState, LaneChange, PlayerState, RunPhase, RunState,
    RunSummary,
};
pub use tick::{TickInput, tick};

//! Simulation module
//!
//! All gameplay logic lives here. This module must stay host-agnostic:
//! - Real elapsed time per tick, no assumed fixed step
//! - Seeded RNG only
//! - Stable entity handles (by ID)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod player;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, GroundContact, resolve_ground};
pub use player::{Player, PlayerState, PlayerStep};
pub use score::ScoreSystem;
pub use spawner::{SpawnSet, WorldSpawner};
pub use state::{
    CrashCause, Entity, EntityKind, EntityView, PlayerView, RunEvent, RunPhase, RunSnapshot,
    RunState,
};
pub use tick::{TickInput, advance, crash, pad_boosts, restart, trick_units};

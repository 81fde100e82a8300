//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering, audio or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod field;
pub mod ship;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{CollisionResult, resolve_collisions};
pub use ship::Intent;
pub use snapshot::Snapshot;
pub use state::{
    Asteroid, AsteroidTier, Caption, GameEvent, GameState, Laser, LaserState, Ship, ShipState,
};
pub use tick::{TickInput, new_game, new_level, tick};

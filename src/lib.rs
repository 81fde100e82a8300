//! Asteroids - a fixed-timestep arcade simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, levels, lives)
//! - `game`: Driver that feeds wall time into fixed ticks and dispatches events
//! - `audio`: Sound triggers derived from simulation events
//! - `highscores`: High score persistence behind a small store trait
//! - `tuning`: Data-driven game balance
//! - `settings`: Player audio preferences

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use game::Game;
pub use highscores::{JsonFileScoreStore, MemoryScoreStore, ScoreStore};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Fixed constants that are not balance knobs
pub mod consts {
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ship heading at spawn (radians, pointing up the screen)
    pub const SHIP_START_HEADING: f32 = std::f32::consts::FRAC_PI_2;

    /// Laser spawn distance from ship center, in ship radii
    pub const SHIP_NOSE_FACTOR: f32 = 4.0 / 3.0;

    /// Belt pacing: one large asteroid yields itself + 2 medium + 4 small
    pub const ROIDS_PER_LARGE: u32 = 7;

    /// Per-level speed increase for new asteroids
    pub const LEVEL_SPEED_STEP: f32 = 0.1;
}

/// Unit vector for a heading in screen space (y grows downward)
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Wrap a position that left the field by more than `margin` to the opposite edge
#[inline]
pub fn wrap_position(mut pos: Vec2, margin: f32, width: f32, height: f32) -> Vec2 {
    if pos.x < -margin {
        pos.x = width + margin;
    } else if pos.x > width + margin {
        pos.x = -margin;
    }
    if pos.y < -margin {
        pos.y = height + margin;
    } else if pos.y > height + margin {
        pos.y = -margin;
    }
    pos
}

/// Laser wrap: zero margin, so lasers reappear exactly on the far edge
#[inline]
pub fn wrap_laser(pos: Vec2, width: f32, height: f32) -> Vec2 {
    wrap_position(pos, 0.0, width, height)
}

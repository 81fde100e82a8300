//! Read-only view of a tick for the renderer.
//!
//! Building a snapshot never modifies the game state. It carries geometry
//! and HUD values only; how anything looks is up to the renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Asteroid, GameState, Laser, LaserState, Ship, ShipState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub radius: f32,
    pub heading: f32,
    /// False on the dark half of a blink cycle and once the game is over
    pub visible: bool,
    pub exploding: bool,
    /// Draw the thruster flame
    pub thrusting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub radius: f32,
    pub heading: f32,
    pub offsets: Vec<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaserView {
    pub pos: Vec2,
    pub exploding: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionView {
    pub text: String,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    /// 1-based level number for display
    pub level: u32,
    pub caption: Option<CaptionView>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub field: Vec2,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub lasers: Vec<LaserView>,
    pub hud: Hud,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.time_ticks,
            field: Vec2::new(state.tuning.field_width, state.tuning.field_height),
            ship: ship_view(&state.ship),
            asteroids: state.asteroids.iter().map(asteroid_view).collect(),
            lasers: state.ship.lasers.iter().map(laser_view).collect(),
            hud: Hud {
                score: state.score,
                high_score: state.high_score,
                lives: state.lives,
                level: state.level + 1,
                caption: state.caption.as_ref().map(|c| CaptionView {
                    text: c.text.clone(),
                    opacity: c.opacity(),
                }),
            },
        }
    }
}

fn ship_view(ship: &Ship) -> ShipView {
    ShipView {
        pos: ship.pos,
        radius: ship.radius,
        heading: ship.heading,
        visible: ship.is_visible(),
        exploding: matches!(ship.state, ShipState::Exploding { .. }),
        thrusting: ship.engine_on,
    }
}

fn asteroid_view(roid: &Asteroid) -> AsteroidView {
    AsteroidView {
        pos: roid.pos,
        radius: roid.radius,
        heading: roid.heading,
        offsets: roid.offsets.clone(),
    }
}

fn laser_view(laser: &Laser) -> LaserView {
    LaserView {
        pos: laser.pos,
        exploding: matches!(laser.state, LaserState::Exploding { .. }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_capture_mirrors_state() {
        let state = GameState::new(Tuning::default(), 77);
        let snap = Snapshot::capture(&state);

        assert_eq!(snap.asteroids.len(), state.asteroids.len());
        assert_eq!(snap.asteroids[0].offsets, state.asteroids[0].offsets);
        assert!(snap.lasers.is_empty());
        assert_eq!(snap.hud.lives, 3);
        assert_eq!(snap.hud.level, 1);
        let caption = snap.hud.caption.unwrap();
        assert_eq!(caption.text, "Level 1");
        assert_eq!(caption.opacity, 1.0);
        assert!(snap.ship.visible);
        assert!(!snap.ship.exploding);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let state = GameState::new(Tuning::default(), 77);
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hud.score, 0);
        assert_eq!(back.asteroids.len(), 3);
    }
}

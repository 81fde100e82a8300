//! Demo autopilot
//!
//! Plays the game from the state alone: aim at the nearest rock, tap fire when
//! lined up, close in when it is far away.

use std::f32::consts::{PI, TAU};

use super::ship::Intent;
use super::state::GameState;

/// Aim tolerance before firing (radians)
const FIRE_CONE: f32 = 0.15;
/// Thrust toward targets further than this (pixels)
const CHASE_DISTANCE: f32 = 250.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Fire was pressed last tick and must be released
    trigger_down: bool,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intents for the next tick
    pub fn intents(&mut self, state: &GameState) -> Vec<Intent> {
        let ship = &state.ship;
        if ship.is_dead() || ship.is_exploding() {
            self.trigger_down = false;
            return Vec::new();
        }

        let target = state
            .asteroids
            .iter()
            .map(|roid| (roid.pos, roid.pos.distance(ship.pos)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        let Some((target, distance)) = target else {
            return self.idle();
        };

        let to_target = target - ship.pos;
        // Screen y grows downward
        let bearing = (-to_target.y).atan2(to_target.x);
        let error = angle_diff(bearing, ship.heading);
        let step = state.tuning.turn_step();

        let mut intents = vec![
            Intent::RotateLeft(error > step / 2.0),
            Intent::RotateRight(error < -step / 2.0),
            Intent::Thrust(distance > CHASE_DISTANCE && error.abs() < FIRE_CONE),
        ];

        if self.trigger_down {
            intents.push(Intent::Fire(false));
            self.trigger_down = false;
        } else if error.abs() < FIRE_CONE {
            intents.push(Intent::Fire(true));
            self.trigger_down = true;
        }
        intents
    }

    fn idle(&mut self) -> Vec<Intent> {
        let mut intents = vec![
            Intent::RotateLeft(false),
            Intent::RotateRight(false),
            Intent::Thrust(false),
        ];
        if self.trigger_down {
            intents.push(Intent::Fire(false));
            self.trigger_down = false;
        }
        intents
    }
}

/// Signed difference `a - b` folded into (-PI, PI]
fn angle_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).rem_euclid(TAU);
    if d > PI { d - TAU } else { d }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Asteroid, AsteroidTier, ShipState};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn rock_at(pos: Vec2) -> Asteroid {
        Asteroid {
            pos,
            vel: Vec2::ZERO,
            radius: 50.0,
            tier: AsteroidTier::Large,
            heading: 0.0,
            offsets: vec![1.0; 10],
        }
    }

    fn lone_ship() -> GameState {
        let mut state = GameState::empty(Tuning::default(), 5);
        state.ship.state = ShipState::Flying;
        state
    }

    #[test]
    fn test_angle_diff_wraps() {
        assert!((angle_diff(0.1, TAU - 0.1) - 0.2).abs() < 1e-5);
        assert!((angle_diff(TAU - 0.1, 0.1) + 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_turns_toward_target() {
        let mut state = lone_ship();
        // Ship faces up; a rock to the right needs a clockwise (right) turn
        state.asteroids.push(rock_at(state.ship.pos + Vec2::new(200.0, 0.0)));
        let intents = Autopilot::new().intents(&state);
        assert!(intents.contains(&Intent::RotateRight(true)));
        assert!(intents.contains(&Intent::RotateLeft(false)));
        assert!(!intents.contains(&Intent::Fire(true)));
    }

    #[test]
    fn test_taps_fire_when_aligned() {
        let mut state = lone_ship();
        state.asteroids.push(rock_at(state.ship.pos - Vec2::new(0.0, 150.0)));
        let mut pilot = Autopilot::new();
        assert!(pilot.intents(&state).contains(&Intent::Fire(true)));
        assert!(pilot.intents(&state).contains(&Intent::Fire(false)));
        assert!(pilot.intents(&state).contains(&Intent::Fire(true)));
    }

    #[test]
    fn test_chases_distant_target() {
        let mut state = lone_ship();
        state.asteroids.push(rock_at(state.ship.pos - Vec2::new(0.0, 240.0)));
        assert!(Autopilot::new().intents(&state).contains(&Intent::Thrust(false)));
        state.asteroids[0].pos = state.ship.pos - Vec2::new(0.0, 260.0);
        assert!(Autopilot::new().intents(&state).contains(&Intent::Thrust(true)));
    }

    #[test]
    fn test_silent_while_exploding() {
        let mut state = lone_ship();
        state.asteroids.push(rock_at(Vec2::ZERO));
        state.ship.state = ShipState::Exploding { ticks_left: 3 };
        assert!(Autopilot::new().intents(&state).is_empty());
    }
}

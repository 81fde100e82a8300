//! Collision detection and combat resolution
//!
//! Lasers against asteroids first, then the ship against asteroids. Hits are
//! only marked during the scan; destroyed asteroids are swapped for their
//! children once the scan is over so no index ever shifts mid-iteration.

use glam::Vec2;

use super::field::split_or_remove;
use super::ship::explode_ship;
use super::state::{GameState, LaserState};

/// True when a point lies strictly inside a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance(center) < radius
}

/// True when two circles overlap
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Outcome of one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Asteroids destroyed by lasers
    pub laser_hits: usize,
    /// Ship collided with an asteroid
    pub ship_hit: bool,
}

/// Resolve every collision for the current tick
///
/// Returns what happened; scoring, splitting and level advance are applied here.
pub fn resolve_collisions(state: &mut GameState) -> CollisionResult {
    let mut result = CollisionResult::default();
    let mut destroyed = vec![false; state.asteroids.len()];
    let laser_remnant = state.tuning.ticks(state.tuning.laser_explode_duration).max(1);

    // Lasers: asteroid-major, reverse order, first laser wins
    for (i, roid) in state.asteroids.iter().enumerate().rev() {
        let hit = state
            .ship
            .lasers
            .iter_mut()
            .rev()
            .find(|laser| laser.is_flying() && point_in_circle(laser.pos, roid.pos, roid.radius));
        if let Some(laser) = hit {
            laser.state = LaserState::Exploding {
                ticks_left: laser_remnant,
            };
            destroyed[i] = true;
            result.laser_hits += 1;
        }
    }

    // Ship: only in plain flight; colliding destroys the asteroid too
    if state.ship.is_vulnerable() {
        let ship_pos = state.ship.pos;
        let ship_radius = state.ship.radius;
        let hit = state
            .asteroids
            .iter()
            .enumerate()
            .rev()
            .find(|(i, roid)| {
                !destroyed[*i] && circles_overlap(ship_pos, ship_radius, roid.pos, roid.radius)
            })
            .map(|(i, _)| i);
        if let Some(i) = hit {
            destroyed[i] = true;
            result.ship_hit = true;
            explode_ship(state);
        }
    }

    if destroyed.iter().any(|d| *d) {
        apply_destruction(state, &destroyed);
    }
    result
}

/// Build the next asteroid generation: survivors in order, then all children
fn apply_destruction(state: &mut GameState, destroyed: &[bool]) {
    let current = std::mem::take(&mut state.asteroids);
    let mut next = Vec::with_capacity(current.len() + 2);
    let mut children = Vec::new();
    for (roid, gone) in current.into_iter().zip(destroyed) {
        if *gone {
            children.extend(split_or_remove(state, &roid));
        } else {
            next.push(roid);
        }
    }
    next.extend(children);
    state.asteroids = next;

    if state.asteroids.is_empty() {
        state.level += 1;
        log::info!("Field cleared, advancing to level {}", state.level + 1);
        super::tick::new_level(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::new_asteroid;
    use crate::sim::state::{AsteroidTier, GameEvent, Laser, ShipState};
    use crate::tuning::Tuning;

    fn staged() -> GameState {
        let mut state = GameState::empty(Tuning::default(), 9);
        state.ship.state = ShipState::Flying;
        state
    }

    fn place(state: &mut GameState, pos: Vec2, tier: AsteroidTier) {
        let mut roid = new_asteroid(&mut state.rng, &state.tuning, 0, pos, tier);
        roid.vel = Vec2::ZERO;
        state.asteroids.push(roid);
    }

    fn laser_at(pos: Vec2) -> Laser {
        Laser {
            pos,
            vel: Vec2::new(0.0, -1.0),
            dist: 0.0,
            state: LaserState::Flying,
        }
    }

    #[test]
    fn test_circle_helpers() {
        assert!(point_in_circle(Vec2::new(3.0, 0.0), Vec2::ZERO, 5.0));
        assert!(!point_in_circle(Vec2::new(5.0, 0.0), Vec2::ZERO, 5.0));
        assert!(circles_overlap(Vec2::ZERO, 2.0, Vec2::new(3.9, 0.0), 2.0));
        assert!(!circles_overlap(Vec2::ZERO, 2.0, Vec2::new(4.0, 0.0), 2.0));
    }

    #[test]
    fn test_laser_hit_splits_and_leaves_remnant() {
        let mut state = staged();
        place(&mut state, Vec2::new(100.0, 100.0), AsteroidTier::Large);
        place(&mut state, Vec2::new(600.0, 100.0), AsteroidTier::Large);
        state.ship.lasers.push(laser_at(Vec2::new(110.0, 100.0)));

        let result = resolve_collisions(&mut state);
        assert_eq!(result.laser_hits, 1);
        assert_eq!(state.asteroids.len(), 3);
        assert_eq!(state.asteroids[0].tier, AsteroidTier::Large);
        assert_eq!(state.asteroids[1].tier, AsteroidTier::Medium);
        assert_eq!(state.asteroids[2].tier, AsteroidTier::Medium);
        assert_eq!(
            state.ship.lasers[0].state,
            LaserState::Exploding { ticks_left: 3 }
        );
        assert_eq!(state.score, 20);

        // The remnant no longer collides
        let again = resolve_collisions(&mut state);
        assert_eq!(again.laser_hits, 0);
    }

    #[test]
    fn test_one_laser_per_asteroid_and_one_asteroid_per_laser() {
        let mut state = staged();
        place(&mut state, Vec2::new(100.0, 100.0), AsteroidTier::Small);
        place(&mut state, Vec2::new(105.0, 100.0), AsteroidTier::Small);
        state.ship.lasers.push(laser_at(Vec2::new(102.0, 100.0)));
        state.ship.lasers.push(laser_at(Vec2::new(103.0, 100.0)));
        state.ship.lasers.push(laser_at(Vec2::new(104.0, 100.0)));

        let result = resolve_collisions(&mut state);
        assert_eq!(result.laser_hits, 2);
        let flying = state.ship.lasers.iter().filter(|l| l.is_flying()).count();
        assert_eq!(flying, 1);
    }

    #[test]
    fn test_score_for_each_tier() {
        let mut state = staged();
        place(&mut state, Vec2::new(100.0, 100.0), AsteroidTier::Large);
        place(&mut state, Vec2::new(300.0, 100.0), AsteroidTier::Medium);
        place(&mut state, Vec2::new(500.0, 100.0), AsteroidTier::Small);
        for x in [100.0, 300.0, 500.0] {
            state.ship.lasers.push(laser_at(Vec2::new(x, 100.0)));
        }
        resolve_collisions(&mut state);

        let base = state.tuning.roid_points_large as f64;
        assert_eq!(state.score as f64, base + 2.5 * base + 5.0 * base);
        assert_eq!(state.high_score, state.score);
    }

    #[test]
    fn test_ship_collision_explodes_and_destroys() {
        let mut state = staged();
        let ship_pos = state.ship.pos;
        place(&mut state, ship_pos + Vec2::new(30.0, 0.0), AsteroidTier::Large);

        let result = resolve_collisions(&mut state);
        assert!(result.ship_hit);
        assert!(state.ship.is_exploding());
        assert_eq!(state.asteroids.len(), 2);
        assert_eq!(state.lives, 3);
        assert!(state.events.contains(&GameEvent::ShipExploded));
    }

    #[test]
    fn test_invulnerable_ship_passes_through() {
        let mut state = GameState::empty(Tuning::default(), 9);
        let ship_pos = state.ship.pos;
        place(&mut state, ship_pos, AsteroidTier::Large);

        let result = resolve_collisions(&mut state);
        assert!(!result.ship_hit);
        assert!(matches!(state.ship.state, ShipState::Invulnerable { .. }));
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn test_clearing_field_advances_level() {
        let mut state = staged();
        place(&mut state, Vec2::new(100.0, 100.0), AsteroidTier::Small);
        state.ship.lasers.push(laser_at(Vec2::new(100.0, 100.0)));

        resolve_collisions(&mut state);
        assert_eq!(state.level, 1);
        assert_eq!(state.asteroids.len(), 4);
        assert!(state.events.contains(&GameEvent::LevelStarted { level: 1 }));
    }
}

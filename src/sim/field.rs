//! Asteroid field: belt spawning, splitting and drift

use glam::Vec2;
use rand::Rng;

use super::state::{Asteroid, AsteroidTier, GameEvent, GameState};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::wrap_position;

/// Build an asteroid with random drift and a jagged outline
pub fn new_asteroid<R: Rng>(
    rng: &mut R,
    tuning: &Tuning,
    level: u32,
    pos: Vec2,
    tier: AsteroidTier,
) -> Asteroid {
    let level_mult = 1.0 + LEVEL_SPEED_STEP * level as f32;
    let max_step = tuning.roid_speed * level_mult / tuning.tick_rate as f32;
    let axis_speed = |rng: &mut R| {
        let speed = rng.random::<f32>() * max_step;
        if rng.random_bool(0.5) { speed } else { -speed }
    };
    let vel = Vec2::new(axis_speed(&mut *rng), axis_speed(&mut *rng));

    let heading = rng.random::<f32>() * std::f32::consts::TAU;
    let avg = tuning.roid_vertices as f32;
    let vertex_count = (rng.random::<f32>() * (avg + 1.0) + avg / 2.0).floor() as usize;
    let jag = tuning.roid_jaggedness;
    let offsets = (0..vertex_count)
        .map(|_| rng.random::<f32>() * 2.0 * jag + 1.0 - jag)
        .collect();

    Asteroid {
        pos,
        vel,
        radius: tier.radius(tuning),
        tier,
        heading,
        offsets,
    }
}

/// Replace the field with a fresh belt of large asteroids away from the ship
pub fn spawn_belt(state: &mut GameState) {
    state.asteroids.clear();

    let count = state.tuning.roid_count + state.level;
    state.roids_total = count * ROIDS_PER_LARGE;
    state.roids_left = state.roids_total;

    let clearance = state.tuning.roid_size * 2.0 + state.ship.radius;
    for _ in 0..count {
        let pos = sample_clear_position(state, clearance);
        let roid = new_asteroid(
            &mut state.rng,
            &state.tuning,
            state.level,
            pos,
            AsteroidTier::Large,
        );
        state.asteroids.push(roid);
    }
    log::debug!("Spawned belt of {} asteroids for level {}", count, state.level);
}

/// Rejection-sample a spawn point; gives up after `spawn_attempts` and keeps the last try
fn sample_clear_position(state: &mut GameState, clearance: f32) -> Vec2 {
    let (w, h) = (state.tuning.field_width, state.tuning.field_height);
    let attempts = state.tuning.spawn_attempts.max(1);
    let mut pos = Vec2::ZERO;
    for _ in 0..attempts {
        pos = Vec2::new(
            state.rng.random::<f32>() * w,
            state.rng.random::<f32>() * h,
        );
        if pos.distance(state.ship.pos) >= clearance {
            return pos;
        }
    }
    log::warn!(
        "No spawn point {:.0}px clear of the ship after {} attempts; placing anyway",
        clearance,
        attempts
    );
    pos
}

/// Score a destroyed asteroid and return its children (two of the next tier, or none)
pub fn split_or_remove(state: &mut GameState, roid: &Asteroid) -> Vec<Asteroid> {
    let points = roid.tier.points(&state.tuning);
    state.add_score(points);
    state.roids_left = state.roids_left.saturating_sub(1);
    state.events.push(GameEvent::AsteroidHit { tier: roid.tier });

    match roid.tier.next() {
        Some(tier) => (0..2)
            .map(|_| new_asteroid(&mut state.rng, &state.tuning, state.level, roid.pos, tier))
            .collect(),
        None => Vec::new(),
    }
}

/// Drift every asteroid and wrap it around the field
pub fn move_asteroids(state: &mut GameState) {
    let (w, h) = (state.tuning.field_width, state.tuning.field_height);
    for roid in &mut state.asteroids {
        roid.pos = wrap_position(roid.pos + roid.vel, roid.radius, w, h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_asteroid_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let max_step = tuning.roid_speed * 1.2 / tuning.tick_rate as f32;
        for _ in 0..200 {
            let roid = new_asteroid(&mut rng, &tuning, 2, Vec2::new(10.0, 20.0), AsteroidTier::Medium);
            assert_eq!(roid.radius, 25.0);
            assert!(roid.vel.x.abs() <= max_step && roid.vel.y.abs() <= max_step);
            assert!((0.0..std::f32::consts::TAU).contains(&roid.heading));
            assert!((5..=15).contains(&roid.offsets.len()));
            for off in &roid.offsets {
                assert!(*off >= 0.6 - 1e-6 && *off <= 1.4 + 1e-6);
            }
        }
    }

    #[test]
    fn test_spawn_belt_count_and_clearance() {
        let mut state = GameState::empty(Tuning::default(), 42);
        state.level = 4;
        spawn_belt(&mut state);

        assert_eq!(state.asteroids.len(), 7);
        assert_eq!(state.roids_total, 49);
        assert_eq!(state.roids_left, 49);
        let clearance = 100.0 * 2.0 + state.ship.radius;
        for roid in &state.asteroids {
            assert_eq!(roid.tier, AsteroidTier::Large);
            assert!(roid.pos.distance(state.ship.pos) >= clearance);
        }
    }

    #[test]
    fn test_spawn_belt_gives_up_on_crowded_field() {
        // Field too small to ever clear the ship: must still terminate
        let tuning = Tuning {
            field_width: 50.0,
            field_height: 50.0,
            spawn_attempts: 5,
            ..Tuning::default()
        };
        let mut state = GameState::empty(tuning, 3);
        spawn_belt(&mut state);
        assert_eq!(state.asteroids.len(), 3);
    }

    #[test]
    fn test_large_splits_into_two_medium_in_place() {
        let mut state = GameState::empty(Tuning::default(), 5);
        let pos = Vec2::new(100.0, 120.0);
        let roid = new_asteroid(&mut state.rng, &state.tuning, 0, pos, AsteroidTier::Large);
        let children = split_or_remove(&mut state, &roid);

        assert_eq!(children.len(), 2);
        for child in &children {
            assert_eq!(child.tier, AsteroidTier::Medium);
            assert_eq!(child.pos, pos);
        }
        // Independently randomized
        assert_ne!(children[0].vel, children[1].vel);
        assert_eq!(state.score, 20);
        assert_eq!(
            state.events,
            vec![
                GameEvent::HighScore { score: 20 },
                GameEvent::AsteroidHit {
                    tier: AsteroidTier::Large
                }
            ]
        );
    }

    #[test]
    fn test_small_is_removed_without_children() {
        let mut state = GameState::empty(Tuning::default(), 5);
        state.roids_left = 1;
        let roid = new_asteroid(&mut state.rng, &state.tuning, 0, Vec2::ZERO, AsteroidTier::Small);
        assert!(split_or_remove(&mut state, &roid).is_empty());
        assert_eq!(state.score, 100);
        assert_eq!(state.roids_left, 0);
    }

    #[test]
    fn test_move_asteroids_wraps_with_radius_margin() {
        let mut state = GameState::empty(Tuning::default(), 5);
        let mut roid =
            new_asteroid(&mut state.rng, &state.tuning, 0, Vec2::new(-49.0, 10.0), AsteroidTier::Large);
        roid.vel = Vec2::new(-2.0, 0.0);
        state.asteroids.push(roid);

        move_asteroids(&mut state);
        assert_eq!(state.asteroids[0].pos.x, 750.0);
    }
}

//! Ship controller: control intents, thrust, blink and explosion countdowns, lasers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Laser, LaserState, Ship, ShipState};
use crate::{heading_vector, wrap_laser, wrap_position};

/// A discrete control intent from the input provider (`true` = pressed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    RotateLeft(bool),
    RotateRight(bool),
    Thrust(bool),
    Fire(bool),
}

/// Apply one intent to the ship's control flags
///
/// Dead and exploding ships are offered intents but ignore them.
pub fn apply_intent(state: &mut GameState, intent: Intent) {
    if state.ship.is_dead() || state.ship.is_exploding() {
        return;
    }
    match intent {
        Intent::RotateLeft(on) => state.ship.turning_left = on,
        Intent::RotateRight(on) => state.ship.turning_right = on,
        Intent::Thrust(on) => state.ship.thrusting = on,
        Intent::Fire(true) => shoot_laser(state),
        Intent::Fire(false) => state.ship.can_shoot = true,
    }
}

/// Fire from the nose if allowed; any press blocks firing until release
pub fn shoot_laser(state: &mut GameState) {
    let ship = &mut state.ship;
    if ship.can_shoot && ship.lasers.len() < state.tuning.laser_max {
        ship.lasers.push(Laser {
            pos: ship.nose(),
            vel: heading_vector(ship.heading) * state.tuning.laser_step(),
            dist: 0.0,
            state: LaserState::Flying,
        });
        state.events.push(GameEvent::LaserFired);
    }
    ship.can_shoot = false;
}

/// Put the ship into its explosion countdown
pub fn explode_ship(state: &mut GameState) {
    let ticks_left = state.tuning.ticks(state.tuning.ship_explode_duration).max(1);
    let ship = &mut state.ship;
    ship.state = ShipState::Exploding { ticks_left };
    ship.vel = Vec2::ZERO;
    ship.thrusting = false;
    state.events.push(GameEvent::ShipExploded);
    log::debug!("Ship exploded at ({:.0}, {:.0})", ship.pos.x, ship.pos.y);
}

/// Advance the ship by one tick
pub fn update_ship(state: &mut GameState) {
    let GameState {
        tuning,
        ship,
        events,
        ..
    } = &mut *state;
    let rate = tuning.tick_rate as f32;

    let alive = matches!(
        ship.state,
        ShipState::Flying | ShipState::Invulnerable { .. }
    );
    let burning = ship.thrusting && alive;
    if burning != ship.engine_on {
        ship.engine_on = burning;
        events.push(if burning {
            GameEvent::ThrustStarted
        } else {
            GameEvent::ThrustStopped
        });
    }

    if burning {
        ship.vel += heading_vector(ship.heading) * tuning.ship_thrust / rate;
    } else {
        ship.vel -= tuning.friction * ship.vel / rate;
    }

    let turn = ship.turning_left as i8 - ship.turning_right as i8;
    ship.rot = turn as f32 * tuning.turn_step();

    let mut explosion_done = false;
    match ship.state {
        ShipState::Exploding { ticks_left } => {
            let ticks_left = ticks_left.saturating_sub(1);
            ship.state = ShipState::Exploding { ticks_left };
            explosion_done = ticks_left == 0;
        }
        ShipState::Dead => {}
        ShipState::Flying | ShipState::Invulnerable { .. } => {
            tick_blink(ship, tuning.ticks(tuning.ship_blink_duration).max(1));
            ship.heading += ship.rot;
            ship.pos = wrap_position(
                ship.pos + ship.vel,
                ship.radius,
                tuning.field_width,
                tuning.field_height,
            );
        }
    }

    if explosion_done {
        lose_life(state);
    }
}

/// Count down one blink phase; leaves invulnerability after the last one
fn tick_blink(ship: &mut Ship, phase_ticks: u32) {
    if let ShipState::Invulnerable {
        mut blinks_left,
        mut blink_ticks,
    } = ship.state
    {
        blink_ticks = blink_ticks.saturating_sub(1);
        if blink_ticks == 0 {
            blink_ticks = phase_ticks;
            blinks_left = blinks_left.saturating_sub(1);
        }
        ship.state = if blinks_left == 0 {
            ShipState::Flying
        } else {
            ShipState::Invulnerable {
                blinks_left,
                blink_ticks,
            }
        };
    }
}

/// Consume a life after an explosion; respawn or end the game
fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });
    if state.lives == 0 {
        super::tick::game_over(state);
    } else {
        log::info!("Life lost, {} remaining", state.lives);
        state.ship = Ship::new(&state.tuning);
    }
}

/// Move, expire and wrap lasers
pub fn update_lasers(state: &mut GameState) {
    let range = state.tuning.laser_range();
    let (w, h) = (state.tuning.field_width, state.tuning.field_height);

    state.ship.lasers.retain_mut(|laser| match laser.state {
        LaserState::Exploding { ticks_left } => {
            let ticks_left = ticks_left.saturating_sub(1);
            laser.state = LaserState::Exploding { ticks_left };
            ticks_left > 0
        }
        LaserState::Flying => {
            laser.pos += laser.vel;
            laser.dist += laser.vel.length();
            if laser.dist > range {
                return false;
            }
            laser.pos = wrap_laser(laser.pos, w, h);
            true
        }
    });
}

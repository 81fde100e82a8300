//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically, plus the
//! level and session transitions it drives.

use super::collision::resolve_collisions;
use super::field::{move_asteroids, spawn_belt};
use super::ship::{Intent, apply_intent, update_lasers, update_ship};
use super::state::{BeatPacer, Caption, GameEvent, GameState, Ship};

/// Input delivered to a single tick (in arrival order)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub intents: Vec<Intent>,
}

impl TickInput {
    pub fn new(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            intents: intents.into_iter().collect(),
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    for intent in &input.intents {
        apply_intent(state, *intent);
    }

    update_ship(state);
    update_lasers(state);
    resolve_collisions(state);
    move_asteroids(state);
    beat_music(state);
    fade_caption(state);

    state.time_ticks += 1;
}

/// Reset score, lives and ship, then start level 0
pub fn new_game(state: &mut GameState) {
    state.level = 0;
    state.score = 0;
    state.lives = state.tuning.starting_lives;
    state.ship = Ship::new(&state.tuning);
    state.events.push(GameEvent::NewGame);
    log::info!("New game (seed {})", state.seed);
    new_level(state);
}

/// Show the level caption and spawn the belt for the current level
pub fn new_level(state: &mut GameState) {
    let fade = state.tuning.ticks(state.tuning.text_fade_time);
    state.caption = Some(Caption::new(format!("Level {}", state.level + 1), fade));
    spawn_belt(state);
    state.music = BeatPacer::default();
    state.events.push(GameEvent::LevelStarted { level: state.level });
    log::info!(
        "Level {} started with {} asteroids",
        state.level + 1,
        state.asteroids.len()
    );
}

/// Out of lives: the ship is gone and the end caption starts fading
pub fn game_over(state: &mut GameState) {
    state.ship.state = super::state::ShipState::Dead;
    state.ship.lasers.clear();
    let fade = state.tuning.ticks(state.tuning.text_fade_time);
    state.caption = Some(Caption::new("Game Over", fade));
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over at level {} with score {}",
        state.level + 1,
        state.score
    );
}

/// Music beat: alternating low/high tones, faster as the field empties
fn beat_music(state: &mut GameState) {
    if state.ship.is_dead() {
        return;
    }
    if state.music.beat_ticks == 0 {
        state.events.push(GameEvent::MusicBeat {
            high: !state.music.low,
        });
        state.music.low = !state.music.low;

        let tuning = &state.tuning;
        let tempo =
            tuning.music_beat_interval * (1.0 - tuning.music_speedup * (1.0 - state.roid_ratio()));
        state.music.beat_ticks = tuning.ticks(tempo).max(1);
    } else {
        state.music.beat_ticks -= 1;
    }
}

/// Fade the caption; a finished game-over caption starts the next game
fn fade_caption(state: &mut GameState) {
    let Some(caption) = state.caption.as_mut() else {
        return;
    };
    if caption.ticks_left > 0 {
        caption.ticks_left -= 1;
        return;
    }
    state.caption = None;
    if state.ship.is_dead() {
        new_game(state);
    }
}

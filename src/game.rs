//! Game driver
//!
//! Owns a session plus its collaborators. Wall-clock time is turned into
//! fixed ticks here, and events from each tick are fanned out to audio and
//! the score store. Collaborator failures are logged and never stop the loop.

use crate::audio::AudioManager;
use crate::consts::MAX_SUBSTEPS;
use crate::highscores::ScoreStore;
use crate::sim::{GameEvent, GameState, Intent, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Game instance holding all state
pub struct Game {
    state: GameState,
    store: Box<dyn ScoreStore>,
    audio: AudioManager,
    accumulator: f32,
    /// Intents received since the last tick
    pending: Vec<Intent>,
}

impl Game {
    pub fn new(
        tuning: Tuning,
        seed: u64,
        store: Box<dyn ScoreStore>,
        audio: AudioManager,
    ) -> Self {
        let mut game = Self {
            state: GameState::new(tuning, seed),
            store,
            audio,
            accumulator: 0.0,
            pending: Vec::new(),
        };
        game.dispatch_events();
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Queue an intent for the next tick
    pub fn push_intent(&mut self, intent: Intent) {
        self.pending.push(intent);
    }

    /// Run as many fixed ticks as the elapsed wall time allows
    ///
    /// Returns the number of ticks run.
    pub fn update(&mut self, elapsed_secs: f32) -> u32 {
        let dt = self.state.tuning.dt();
        self.accumulator += elapsed_secs.clamp(0.0, dt * MAX_SUBSTEPS as f32);

        let mut substeps = 0;
        while self.accumulator >= dt && substeps < MAX_SUBSTEPS {
            self.step();
            self.accumulator -= dt;
            substeps += 1;
        }
        substeps
    }

    /// Run exactly one tick with the queued intents
    pub fn step(&mut self) {
        let input = TickInput {
            intents: std::mem::take(&mut self.pending),
        };
        tick(&mut self.state, &input);
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::NewGame => self.load_high_score(),
                GameEvent::HighScore { score } => {
                    if let Err(e) = self.store.save(score) {
                        log::warn!("Could not save high score {}: {}", score, e);
                    }
                }
                GameEvent::LevelStarted { level } => {
                    log::debug!("Level {} begins", level + 1);
                }
                _ => {}
            }
            self.audio.handle(&event);
        }
    }

    /// Pull the stored high score; keep the last known value on failure
    fn load_high_score(&mut self) {
        match self.store.load() {
            Ok(stored) => self.state.high_score = self.state.high_score.max(stored),
            Err(e) => log::warn!(
                "Could not load high score, keeping {}: {}",
                self.state.high_score,
                e
            ),
        }
    }
}

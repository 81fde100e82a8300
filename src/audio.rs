//! Sound triggers
//!
//! Maps simulation events to sound effects and hands them to a sink.
//! Playback itself belongs to the sink; the default one only logs.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Laser fired
    Laser,
    /// Asteroid destroyed
    Hit,
    /// Ship exploded
    Explode,
    /// Engine loop while thrusting
    Thrust,
    /// Background beat, low tone
    BeatLow,
    /// Background beat, high tone
    BeatHigh,
}

impl SoundEffect {
    /// Beats follow the music volume, everything else the effects volume
    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::BeatLow | SoundEffect::BeatHigh)
    }
}

/// Whatever actually makes noise
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn stop(&mut self, effect: SoundEffect);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::trace!("play {:?} at {:.2}", effect, volume);
    }

    fn stop(&mut self, effect: SoundEffect) {
        log::trace!("stop {:?}", effect);
    }
}

/// Audio manager for the game
pub struct AudioManager {
    settings: Settings,
    sink: Box<dyn AudioSink>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Settings::default(), Box::new(LogSink))
    }
}

impl AudioManager {
    pub fn new(settings: Settings, sink: Box<dyn AudioSink>) -> Self {
        Self { settings, sink }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings; muting stops the engine loop
    pub fn set_settings(&mut self, settings: Settings) {
        if !settings.sound_on {
            self.sink.stop(SoundEffect::Thrust);
        }
        self.settings = settings;
    }

    /// React to one simulation event
    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LaserFired => self.play(SoundEffect::Laser),
            GameEvent::AsteroidHit { .. } => self.play(SoundEffect::Hit),
            GameEvent::ShipExploded => self.play(SoundEffect::Explode),
            GameEvent::ThrustStarted => self.play(SoundEffect::Thrust),
            GameEvent::ThrustStopped => self.sink.stop(SoundEffect::Thrust),
            GameEvent::MusicBeat { high: true } => self.play(SoundEffect::BeatHigh),
            GameEvent::MusicBeat { high: false } => self.play(SoundEffect::BeatLow),
            _ => {}
        }
    }

    fn play(&mut self, effect: SoundEffect) {
        let vol = if effect.is_music() {
            self.settings.effective_music_volume()
        } else {
            self.settings.effective_sfx_volume()
        };
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }
}

//! Data-driven game balance
//!
//! Every gameplay constant lives here with its unit. Defaults reproduce the
//! classic 30 Hz arcade feel; a JSON file can override any subset of knobs.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Balance knobs. Units are noted per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulation rate (ticks per second)
    pub tick_rate: u32,
    /// Play field width (pixels)
    pub field_width: f32,
    /// Play field height (pixels)
    pub field_height: f32,
    /// Friction of space (0 = none, 1 = lots), applied per second
    pub friction: f32,

    /// Ship height (pixels); collision radius is half of it
    pub ship_size: f32,
    /// Ship acceleration (pixels per second squared)
    pub ship_thrust: f32,
    /// Ship rotation speed (degrees per second)
    pub ship_turn_speed: f32,
    /// Invulnerability after spawn (seconds)
    pub ship_invuln_duration: f32,
    /// Duration of one blink phase while invulnerable (seconds)
    pub ship_blink_duration: f32,
    /// Ship explosion duration (seconds)
    pub ship_explode_duration: f32,
    /// Lives at the start of a game
    pub starting_lives: u8,

    /// Laser speed (pixels per second)
    pub laser_speed: f32,
    /// Maximum lasers alive at once
    pub laser_max: usize,
    /// Laser range as a fraction of field width
    pub laser_distance: f32,
    /// Laser explosion remnant duration (seconds)
    pub laser_explode_duration: f32,

    /// Large asteroids in the level-0 belt
    pub roid_count: u32,
    /// Large asteroid diameter (pixels)
    pub roid_size: f32,
    /// Max asteroid speed at level 0 (pixels per second)
    pub roid_speed: f32,
    /// Average vertex count of an asteroid outline
    pub roid_vertices: u32,
    /// Jaggedness of asteroid outlines (0 = round, 1 = very jagged)
    pub roid_jaggedness: f32,
    /// Points for a large asteroid
    pub roid_points_large: u64,
    /// Points for a medium asteroid
    pub roid_points_medium: u64,
    /// Points for a small asteroid
    pub roid_points_small: u64,
    /// Rejection-sampling cap when placing a belt asteroid
    pub spawn_attempts: u32,

    /// Caption fade time (seconds)
    pub text_fade_time: f32,

    /// Seconds between music beats with a full field
    pub music_beat_interval: f32,
    /// Fraction of the beat interval removed as the field empties (0-1)
    pub music_speedup: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_rate: 30,
            field_width: 700.0,
            field_height: 500.0,
            friction: 0.7,

            ship_size: 30.0,
            ship_thrust: 5.0,
            ship_turn_speed: 360.0,
            ship_invuln_duration: 3.0,
            ship_blink_duration: 0.1,
            ship_explode_duration: 0.3,
            starting_lives: 3,

            laser_speed: 500.0,
            laser_max: 10,
            laser_distance: 0.6,
            laser_explode_duration: 0.1,

            roid_count: 3,
            roid_size: 100.0,
            roid_speed: 50.0,
            roid_vertices: 10,
            roid_jaggedness: 0.4,
            roid_points_large: 20,
            roid_points_medium: 50,
            roid_points_small: 100,
            spawn_attempts: 1000,

            text_fade_time: 2.5,

            music_beat_interval: 1.0,
            music_speedup: 0.75,
        }
    }
}

impl Tuning {
    /// Convert a duration in seconds to whole ticks (rounded up)
    pub fn ticks(&self, secs: f32) -> u32 {
        ceil_tolerant(secs * self.tick_rate as f32)
    }

    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Ship collision radius (pixels)
    pub fn ship_radius(&self) -> f32 {
        self.ship_size / 2.0
    }

    /// Rotation step per tick while a turn intent is held (radians)
    pub fn turn_step(&self) -> f32 {
        self.ship_turn_speed.to_radians() / self.tick_rate as f32
    }

    /// Laser travel per tick (pixels)
    pub fn laser_step(&self) -> f32 {
        self.laser_speed / self.tick_rate as f32
    }

    /// Distance after which a flying laser is removed (pixels)
    pub fn laser_range(&self) -> f32 {
        self.laser_distance * self.field_width
    }

    /// Blink phases making up the invulnerability window
    pub fn blink_count(&self) -> u32 {
        ceil_tolerant(self.ship_invuln_duration / self.ship_blink_duration)
    }

    /// Reject knob values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("tick_rate", self.tick_rate as f32),
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ship_size", self.ship_size),
            ("ship_blink_duration", self.ship_blink_duration),
            ("laser_speed", self.laser_speed),
            ("roid_size", self.roid_size),
            ("text_fade_time", self.text_fade_time),
            ("music_beat_interval", self.music_beat_interval),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(GameError::InvalidTuning { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.roid_jaggedness) {
            return Err(GameError::InvalidTuning {
                name: "roid_jaggedness",
                value: self.roid_jaggedness,
            });
        }
        if !(0.0..=1.0).contains(&self.music_speedup) {
            return Err(GameError::InvalidTuning {
                name: "music_speedup",
                value: self.music_speedup,
            });
        }
        if self.starting_lives == 0 {
            return Err(GameError::InvalidTuning {
                name: "starting_lives",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Parse and validate tuning from a JSON document (missing knobs keep defaults)
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a file, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path)
            .map_err(GameError::from)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Round up, ignoring f32 noise just above a whole number (0.3 * 30 must be 9)
fn ceil_tolerant(x: f32) -> u32 {
    (x - 1e-4).ceil().max(0.0) as u32
}

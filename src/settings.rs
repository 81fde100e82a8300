//! Player audio preferences
//!
//! Persisted separately from tuning, as a small JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Sound effects enabled
    pub sound_on: bool,
    /// Background beat enabled
    pub music_on: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            sound_on: true,
            music_on: true,
        }
    }
}

impl Settings {
    /// Effective effects volume (0 when muted)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.sound_on {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Effective music volume (0 when muted)
    pub fn effective_music_volume(&self) -> f32 {
        if self.music_on {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .map_err(GameError::from)
            .and_then(|json| serde_json::from_str(&json).map_err(GameError::from));
        match loaded {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }
}

//! High score persistence
//!
//! The simulation only knows the current high score; stores behind this
//! trait decide where it lives. Failures are reported, never fatal.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// External high score storage
pub trait ScoreStore {
    /// Read the stored high score (0 when nothing has been saved yet)
    fn load(&mut self) -> Result<u64, GameError>;
    /// Persist a new high score
    fn save(&mut self, score: u64) -> Result<(), GameError>;
}

/// In-memory store, for tests and sessions without persistence
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub high_score: u64,
    /// Number of successful saves
    pub saves: usize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> Result<u64, GameError> {
        Ok(self.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), GameError> {
        self.high_score = score;
        self.saves += 1;
        Ok(())
    }
}

/// On-disk record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SavedScore {
    high_score: u64,
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileScoreStore {
    fn load(&mut self) -> Result<u64, GameError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let saved: SavedScore = serde_json::from_str(&json)?;
        log::info!("Loaded high score {}", saved.high_score);
        Ok(saved.high_score)
    }

    fn save(&mut self, score: u64) -> Result<(), GameError> {
        let json = serde_json::to_string(&SavedScore { high_score: score })?;
        std::fs::write(&self.path, json)?;
        log::debug!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("asteroids-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.load().unwrap(), 0);
        store.save(1230).unwrap();
        assert_eq!(store.load().unwrap(), 1230);
        assert_eq!(store.saves, 1);
    }

    #[test]
    fn test_file_store_missing_file_is_zero() {
        let mut store = JsonFileScoreStore::new(temp_path("missing"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_file_store_persists() {
        let path = temp_path("persist");
        let mut store = JsonFileScoreStore::new(&path);
        store.save(4560).unwrap();

        let mut reopened = JsonFileScoreStore::new(&path);
        assert_eq!(reopened.load().unwrap(), 4560);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_file_store_corrupt_file_errors() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        let mut store = JsonFileScoreStore::new(&path);
        assert!(matches!(store.load(), Err(GameError::Parse(_))));
        let _ = std::fs::remove_file(path);
    }
}

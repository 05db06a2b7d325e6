//! Best-score tracking
//!
//! One number, read at startup and written whenever it is beaten. Stored as
//! a small JSON document so the file can grow fields later.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The all-time best score
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScore {
    /// Best score seen so far
    pub best: u64,
    /// Where to persist (None keeps the score in memory only)
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl HighScore {
    /// A high score that is never written anywhere
    pub fn in_memory(best: u64) -> Self {
        Self { best, path: None }
    }

    /// Load the stored high score, starting at 0 if there is none
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let mut score = match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScore>(&json) {
                Ok(score) => {
                    log::info!("Loaded high score {}", score.best);
                    score
                }
                Err(e) => {
                    log::warn!("Ignoring malformed high score file {}: {}", path.display(), e);
                    HighScore::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score found, starting fresh");
                HighScore::default()
            }
            Err(e) => {
                log::warn!("Could not read high score from {}: {}", path.display(), e);
                HighScore::default()
            }
        };

        score.path = Some(path.to_path_buf());
        score
    }

    /// Offer a score; returns true if it set a new best (which is saved)
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        self.save();
        true
    }

    /// Persist the current best (no-op for in-memory scores)
    pub fn save(&self) {
        let Some(path) = &self.path else {
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Could not save high score to {}: {}", path.display(), e);
                }
            }
            Err(e) => log::warn!("Could not serialize high score: {}", e),
        }
    }
}

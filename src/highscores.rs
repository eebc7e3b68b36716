//! Best-run leaderboard
//!
//! Ranks runs by round reached, then by markers collected. Persisted as
//! JSON; a corrupt or missing file starts a fresh board.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single completed run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Highest round reached
    pub round: u32,
    /// Total markers collected over the run
    pub markers: u32,
    /// Unix timestamp (seconds) when achieved
    pub timestamp: f64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn beats(round: u32, markers: u32, other: &HighScoreEntry) -> bool {
        round > other.round || (round == other.round && markers > other.markers)
    }

    /// Check if a run qualifies for the leaderboard
    pub fn qualifies(&self, round: u32, markers: u32) -> bool {
        if round <= 1 && markers == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|e| Self::beats(round, markers, e))
            .unwrap_or(true)
    }

    /// Add a run to the leaderboard (if it qualifies)
    ///
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_run(&mut self, round: u32, markers: u32, timestamp: f64) -> Option<usize> {
        if !self.qualifies(round, markers) {
            return None;
        }

        let entry = HighScoreEntry {
            round,
            markers,
            timestamp,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| Self::beats(round, markers, e));
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best round reached so far (if any)
    pub fn best_round(&self) -> Option<u32> {
        self.entries.first().map(|e| e.round)
    }

    /// Load the leaderboard from a JSON file, starting fresh on failure
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<HighScores>(&json) {
                Ok(scores) => {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    scores
                }
                Err(e) => {
                    log::warn!("High score file {} is invalid: {}", path.display(), e);
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the leaderboard to a JSON file
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

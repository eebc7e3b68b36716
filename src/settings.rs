//! Game settings and tuning
//!
//! Persisted as JSON next to the binary; load failures fall back to the
//! shipped defaults so a bad file never blocks a session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::markers::MarkerBounds;
use crate::sim::state::Rules;

/// Which hands the session tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrackedHands {
    Left,
    #[default]
    Right,
    Both,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Round length in seconds
    pub round_duration_secs: f64,
    /// Inter-round cooldown in seconds
    pub pause_cooldown_secs: f64,
    /// Live-vs-ghost contact radius (meters)
    pub ghost_contact_radius: f32,
    /// Marker collection radius (meters)
    pub marker_collect_radius: f32,
    /// Play volume for marker placement
    pub marker_bounds: MarkerBounds,
    /// Which hands to track
    pub tracked_hands: TrackedHands,
    /// Fixed seed for reproducible marker layouts; 0 means derive from time
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            round_duration_secs: ROUND_DURATION_SECS,
            pause_cooldown_secs: PAUSE_COOLDOWN_SECS,
            ghost_contact_radius: GHOST_CONTACT_RADIUS,
            marker_collect_radius: MARKER_COLLECT_RADIUS,
            marker_bounds: MarkerBounds::default(),
            tracked_hands: TrackedHands::default(),
            seed: 0,
        }
    }
}

impl Settings {
    /// The gameplay rules slice of the settings
    pub fn rules(&self) -> Rules {
        Rules {
            round_duration: self.round_duration_secs,
            pause_cooldown: self.pause_cooldown_secs,
            ghost_contact_radius: self.ghost_contact_radius,
            marker_collect_radius: self.marker_collect_radius,
            marker_bounds: self.marker_bounds,
        }
    }

    /// The chiralities the session should drive
    pub fn chiralities(&self) -> Vec<crate::sim::Chirality> {
        use crate::sim::Chirality::*;
        match self.tracked_hands {
            TrackedHands::Left => vec![Left],
            TrackedHands::Right => vec![Right],
            TrackedHands::Both => vec![Left, Right],
        }
    }

    /// Load settings from a JSON file, defaulting on any failure
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Settings file {} is invalid: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Save settings to a JSON file
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let s = Settings::default();
        assert_eq!(s.round_duration_secs, ROUND_DURATION_SECS);
        assert_eq!(s.pause_cooldown_secs, PAUSE_COOLDOWN_SECS);
        assert_eq!(s.ghost_contact_radius, GHOST_CONTACT_RADIUS);
        assert_eq!(s.marker_collect_radius, MARKER_COLLECT_RADIUS);
    }

    #[test]
    fn test_rules_projection() {
        let mut s = Settings::default();
        s.round_duration_secs = 5.0;
        s.ghost_contact_radius = 0.05;
        let rules = s.rules();
        assert_eq!(rules.round_duration, 5.0);
        assert_eq!(rules.ghost_contact_radius, 0.05);
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = Settings::default();
        s.tracked_hands = TrackedHands::Both;
        s.seed = 42;
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn test_load_missing_file_defaults() {
        let s = Settings::load_from(Path::new("/nonexistent/ghost-hands.json"));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_chiralities_for_both() {
        let mut s = Settings::default();
        s.tracked_hands = TrackedHands::Both;
        assert_eq!(s.chiralities().len(), 2);
    }
}

//! Ghost Hands - an AR hand-tracking dodge game core
//!
//! Each round records the player's live hand motion while replaying the
//! previous round's recording time-reversed as a "ghost". Touching the
//! ghost ends the game; collecting the round's markers wins the round early.
//!
//! Core modules:
//! - `sim`: Deterministic game core (state machine, buffers, collisions)
//! - `session`: Per-frame driver and the sensor/scene collaborator traits
//! - `settings`: Data-driven game tuning
//! - `highscores`: Best-run leaderboard

pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Length of one round in seconds (recording and playback run in lockstep)
    pub const ROUND_DURATION_SECS: f64 = 10.0;
    /// Cooldown between rounds before the next round auto-starts
    pub const PAUSE_COOLDOWN_SECS: f64 = 3.0;

    /// Live-vs-ghost proximity that ends the game (meters)
    pub const GHOST_CONTACT_RADIUS: f32 = 0.03;
    /// Live-vs-marker proximity that collects a marker (meters)
    pub const MARKER_COLLECT_RADIUS: f32 = 0.10;

    /// Play volume corners for marker placement (meters, world space)
    pub const MARKER_BOUNDS_MIN: Vec3 = Vec3::new(-0.5, 1.0, -0.3);
    pub const MARKER_BOUNDS_MAX: Vec3 = Vec3::new(0.5, 1.5, 0.3);
}

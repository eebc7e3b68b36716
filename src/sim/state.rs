//! Per-hand game state and round-progression state machine
//!
//! One `HandState` exists per chirality. Its public commands
//! (`start_round`, `start_pause`, `stop`) are the transition entry points
//! the UI/timer driver calls; the per-tick work lives in `tick`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::GhostContact;
use super::frame::{FrameBuffer, RoundStore};
use super::joint::Chirality;
use super::markers::{MarkerBounds, MarkerSet};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Waiting for a round to start
    Idle,
    /// Concurrent record + reversed-replay + collision phase
    Playing,
    /// Inter-round cooldown
    Pause,
    /// Live hand touched the ghost
    GameOver,
}

/// Events emitted by commands and ticks, for the driver/UI to reflect
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RoundStarted { round: u32 },
    MarkerCollected { index: usize },
    /// All of the round's markers collected before time expired
    RoundWon { round: u32 },
    /// Round duration elapsed
    RoundExpired { round: u32 },
    GhostContact(GhostContact),
    GameOver,
}

/// Fixed gameplay tunables, defaulting to the shipped constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    /// Round length in seconds
    pub round_duration: f64,
    /// Inter-round cooldown in seconds
    pub pause_cooldown: f64,
    /// Live-vs-ghost contact radius (meters)
    pub ghost_contact_radius: f32,
    /// Marker collection radius (meters)
    pub marker_collect_radius: f32,
    /// Play volume for marker placement
    pub marker_bounds: MarkerBounds,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            round_duration: ROUND_DURATION_SECS,
            pause_cooldown: PAUSE_COOLDOWN_SECS,
            ghost_contact_radius: GHOST_CONTACT_RADIUS,
            marker_collect_radius: MARKER_COLLECT_RADIUS,
            marker_bounds: MarkerBounds::default(),
        }
    }
}

/// Complete game state for one hand
#[derive(Debug, Clone)]
pub struct HandState {
    pub chirality: Chirality,
    pub mode: Mode,
    /// Round counter, 1-based; also the marker count for the round
    pub current_round: u32,
    /// Set when a ghost contact ends the game, cleared on full reset
    pub is_colliding: bool,
    pub rules: Rules,
    /// The round currently being recorded
    pub recording: FrameBuffer,
    /// Completed-round history; playback reads only the latest entry
    pub rounds: RoundStore,
    /// The current round's targets
    pub markers: MarkerSet,
    pub(crate) recording_start: f64,
    pub(crate) playback_start: f64,
    /// Run seed for reproducible marker layouts
    pub seed: u64,
    rng: Pcg32,
}

impl HandState {
    pub fn new(chirality: Chirality, seed: u64, rules: Rules) -> Self {
        Self {
            chirality,
            mode: Mode::Idle,
            current_round: 1,
            is_colliding: false,
            rules,
            recording: FrameBuffer::new(),
            rounds: RoundStore::new(),
            markers: MarkerSet::new(),
            recording_start: 0.0,
            playback_start: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a round: record live motion while replaying the stored round
    ///
    /// Valid from `Idle` and `Pause` (the cooldown timer re-enters play
    /// through this command); a no-op from any other mode.
    pub fn start_round(&mut self, now: f64) -> Vec<GameEvent> {
        match self.mode {
            Mode::Idle | Mode::Pause => {}
            _ => return Vec::new(),
        }

        self.recording.clear();
        self.recording_start = now;
        self.playback_start = now;
        self.markers = MarkerSet::generate(
            self.current_round,
            &self.rules.marker_bounds,
            &mut self.rng,
        );
        self.mode = Mode::Playing;

        log::info!(
            "{} hand: round {} started ({} markers, ghost frames: {})",
            self.chirality.as_str(),
            self.current_round,
            self.markers.len(),
            self.rounds.latest().map_or(0, |b| b.len()),
        );
        vec![GameEvent::RoundStarted {
            round: self.current_round,
        }]
    }

    /// End the round and enter the inter-round cooldown
    ///
    /// Auto-invoked on round expiry or early win; a no-op outside `Playing`,
    /// so repeated calls cannot double-count the round.
    pub fn start_pause(&mut self) {
        if self.mode != Mode::Playing {
            return;
        }
        self.pause_entry();
        self.mode = Mode::Pause;
    }

    /// Stop the game
    ///
    /// From `GameOver` this is a destructive full reset. From `Pause` the
    /// recorded history is preserved for a resume. From `Playing` the round
    /// is first banked as if paused, then history is preserved.
    pub fn stop(&mut self) {
        match self.mode {
            Mode::Idle => return,
            Mode::GameOver => {
                self.recording.clear();
                self.rounds.clear();
                self.markers.clear();
                self.current_round = 1;
                self.is_colliding = false;
                log::info!("{} hand: stopped, history reset", self.chirality.as_str());
            }
            Mode::Pause => {
                log::info!(
                    "{} hand: stopped at round {}, history kept",
                    self.chirality.as_str(),
                    self.current_round
                );
            }
            Mode::Playing => {
                self.pause_entry();
                log::info!(
                    "{} hand: stopped mid-round, history kept",
                    self.chirality.as_str()
                );
            }
        }
        self.mode = Mode::Idle;
    }

    /// Pause-entry action: bank the recording and drop the round's markers
    ///
    /// The round only advances when frames were actually recorded; an empty
    /// buffer is not stored and does not count.
    fn pause_entry(&mut self) {
        if !self.recording.is_empty() {
            let buffer = std::mem::take(&mut self.recording);
            self.rounds.push(buffer);
            self.current_round += 1;
        }
        self.recording.clear();
        self.markers.clear();
    }

    /// Flag the losing contact and halt play immediately
    pub(crate) fn flag_game_over(&mut self) {
        self.is_colliding = true;
        self.mode = Mode::GameOver;
        log::info!(
            "{} hand: game over at round {}",
            self.chirality.as_str(),
            self.current_round
        );
    }

    /// Markers collected so far this round
    pub fn collected_markers(&self) -> u32 {
        self.markers.collected_count()
    }

    /// Seconds since the round started (meaningful while `Playing`)
    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.recording_start
    }

    /// Seconds left in the current round, clamped at zero
    pub fn time_remaining(&self, now: f64) -> f64 {
        (self.rules.round_duration - self.elapsed(now)).max(0.0)
    }

    /// The buffer the ghost replays from, if any round has been banked
    pub fn ghost_buffer(&self) -> Option<&FrameBuffer> {
        self.rounds.latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::frame::Frame;
    use crate::sim::joint::HandJoint;
    use glam::Mat4;

    fn state() -> HandState {
        HandState::new(Chirality::Right, 1234, Rules::default())
    }

    fn record_one_frame(s: &mut HandState, ts: f32) {
        let mut frame = Frame::new(ts);
        frame.set(HandJoint::Palm, Mat4::IDENTITY);
        s.recording.append(frame);
    }

    #[test]
    fn test_first_round_has_no_ghost_and_one_marker() {
        let mut s = state();
        let events = s.start_round(0.0);
        assert_eq!(events, vec![GameEvent::RoundStarted { round: 1 }]);
        assert_eq!(s.mode, Mode::Playing);
        assert_eq!(s.markers.len(), 1);
        assert!(s.ghost_buffer().is_none());
        assert_eq!(s.collected_markers(), 0);
    }

    #[test]
    fn test_start_round_noop_while_playing() {
        let mut s = state();
        s.start_round(0.0);
        record_one_frame(&mut s, 0.5);
        let events = s.start_round(1.0);
        assert!(events.is_empty());
        assert_eq!(s.recording.len(), 1);
    }

    #[test]
    fn test_pause_banks_round_and_scales_markers() {
        let mut s = state();
        s.start_round(0.0);
        record_one_frame(&mut s, 0.1);
        s.start_pause();

        assert_eq!(s.mode, Mode::Pause);
        assert_eq!(s.current_round, 2);
        assert_eq!(s.rounds.len(), 1);
        assert!(s.recording.is_empty());
        assert!(s.markers.is_empty());

        // Next round replays the banked buffer and spawns two markers
        s.start_round(10.0);
        assert_eq!(s.markers.len(), 2);
        assert!(s.ghost_buffer().is_some());
    }

    #[test]
    fn test_start_pause_twice_does_not_double_count() {
        let mut s = state();
        s.start_round(0.0);
        record_one_frame(&mut s, 0.1);
        s.start_pause();
        s.start_pause();

        assert_eq!(s.current_round, 2);
        assert_eq!(s.rounds.len(), 1);
    }

    #[test]
    fn test_empty_recording_does_not_advance_round() {
        // The hand was never tracked during the round; nothing to bank
        let mut s = state();
        s.start_round(0.0);
        s.start_pause();

        assert_eq!(s.current_round, 1);
        assert!(s.rounds.is_empty());
    }

    #[test]
    fn test_stop_from_game_over_resets_everything() {
        let mut s = state();
        s.start_round(0.0);
        record_one_frame(&mut s, 0.1);
        s.start_pause();
        s.start_round(10.0);
        record_one_frame(&mut s, 0.2);
        s.flag_game_over();

        assert_eq!(s.mode, Mode::GameOver);
        assert!(s.is_colliding);

        s.stop();
        assert_eq!(s.mode, Mode::Idle);
        assert_eq!(s.current_round, 1);
        assert!(s.rounds.is_empty());
        assert!(s.recording.is_empty());
        assert!(s.markers.is_empty());
        assert!(!s.is_colliding);
    }

    #[test]
    fn test_stop_from_pause_preserves_history() {
        let mut s = state();
        s.start_round(0.0);
        record_one_frame(&mut s, 0.1);
        s.start_pause();
        s.stop();

        assert_eq!(s.mode, Mode::Idle);
        assert_eq!(s.current_round, 2);
        assert_eq!(s.rounds.len(), 1);
    }

    #[test]
    fn test_stop_from_playing_banks_then_idles() {
        let mut s = state();
        s.start_round(0.0);
        record_one_frame(&mut s, 0.1);
        s.stop();

        assert_eq!(s.mode, Mode::Idle);
        assert_eq!(s.current_round, 2);
        assert_eq!(s.rounds.len(), 1);
        assert!(s.markers.is_empty());
    }

    #[test]
    fn test_stop_from_idle_is_noop() {
        let mut s = state();
        s.stop();
        assert_eq!(s.mode, Mode::Idle);
        assert_eq!(s.current_round, 1);
    }

    #[test]
    fn test_time_remaining_derivation() {
        let mut s = state();
        s.start_round(100.0);
        assert!((s.time_remaining(103.0) - 7.0).abs() < 1e-9);
        assert_eq!(s.time_remaining(200.0), 0.0);
    }

    #[test]
    fn test_collected_never_exceeds_round() {
        let mut s = state();
        s.start_round(0.0);
        // Sweep the whole play volume; at most round-count markers collect
        let everywhere: Vec<glam::Vec3> = s.markers.positions();
        s.markers
            .check_collisions(&everywhere, s.rules.marker_collect_radius);
        assert!(s.collected_markers() <= s.current_round);
    }
}

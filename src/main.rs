//! Ghost Hands demo entry point
//!
//! Drives the game core with a scripted synthetic hand so a session can run
//! unattended: the hand traces a Lissajous path through the play volume,
//! collecting markers until it eventually crosses its own ghost.

use std::time::{SystemTime, UNIX_EPOCH};

use glam::{Mat4, Vec3};

use ghost_hands::Settings;
use ghost_hands::highscores::HighScores;
use ghost_hands::session::{HandProvider, ProxyRole, SceneLayer, SessionDriver};
use ghost_hands::sim::{Chirality, GameEvent, HandJoint, HandSample, Mode};

const TICK: f64 = 1.0 / 60.0;

/// Synthetic hand sweeping a Lissajous path through the play volume
struct ScriptedHand {
    clock: f64,
}

impl HandProvider for ScriptedHand {
    fn latest_sample(&mut self, _chirality: Chirality) -> Option<HandSample> {
        let t = self.clock as f32;
        let pos = Vec3::new(
            0.4 * (0.7 * t).sin(),
            1.25 + 0.2 * (0.9 * t).cos(),
            0.2 * (1.3 * t).sin(),
        );
        let mut sample = HandSample::new(Mat4::from_translation(pos));
        sample.set(HandJoint::Palm, Mat4::IDENTITY);
        sample.set(HandJoint::Wrist, Mat4::from_translation(Vec3::new(0.0, -0.05, 0.0)));
        sample.set(
            HandJoint::IndexTip,
            Mat4::from_translation(Vec3::new(0.0, 0.08, 0.0)),
        );
        sample.set(
            HandJoint::ThumbTip,
            Mat4::from_translation(Vec3::new(0.04, 0.04, 0.0)),
        );
        Some(sample)
    }
}

/// Scene layer that narrates marker and visibility changes to the console
#[derive(Default)]
struct ConsoleScene;

impl SceneLayer for ConsoleScene {
    fn set_joint_pose(&mut self, _: Chirality, _: ProxyRole, _: HandJoint, _: Mat4) {
        // Pose updates are too chatty to log
    }
    fn set_hand_visible(&mut self, hand: Chirality, role: ProxyRole, visible: bool) {
        if role == ProxyRole::Ghost {
            log::debug!("{} ghost {}", hand.as_str(), if visible { "shown" } else { "hidden" });
        }
    }
    fn attach_markers(&mut self, hand: Chirality, positions: &[Vec3]) {
        log::debug!("{} hand: {} markers attached", hand.as_str(), positions.len());
    }
    fn mark_collected(&mut self, hand: Chirality, index: usize) {
        log::debug!("{} hand: marker {} collected", hand.as_str(), index);
    }
    fn detach_markers(&mut self, hand: Chirality) {
        log::debug!("{} hand: markers detached", hand.as_str());
    }
}

fn main() {
    env_logger::init();

    let settings = Settings::load_from(std::path::Path::new("ghost-hands.json"));
    let unix_now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0);
    let seed = if settings.seed != 0 {
        settings.seed
    } else {
        unix_now as u64
    };
    log::info!("Ghost Hands demo starting (seed {})", seed);

    let chiralities = settings.chiralities();
    let mut driver = SessionDriver::new(
        ScriptedHand { clock: 0.0 },
        ConsoleScene,
        settings.rules(),
        seed,
        &chiralities,
    );

    let mut now = 0.0;
    let mut markers_collected = 0u32;
    driver.start(now);

    // Run until the scripted hand meets its ghost (bounded at ten minutes)
    while !driver.is_game_over() && now < 600.0 {
        now += TICK;
        driver.provider_mut().clock = now;
        for (hand, event) in driver.update(now) {
            match event {
                GameEvent::RoundStarted { round } => {
                    log::info!("{} hand: round {} begins", hand.as_str(), round)
                }
                GameEvent::MarkerCollected { .. } => markers_collected += 1,
                GameEvent::RoundWon { round } => {
                    log::info!("{} hand: round {} won early", hand.as_str(), round)
                }
                GameEvent::RoundExpired { round } => {
                    log::info!("{} hand: round {} expired", hand.as_str(), round)
                }
                GameEvent::GhostContact(contact) => log::info!(
                    "{} hand: touched ghost ({:?} vs {:?}, {:.1} mm)",
                    hand.as_str(),
                    contact.live_joint,
                    contact.ghost_joint,
                    contact.distance * 1000.0
                ),
                GameEvent::GameOver => {}
            }
        }
    }

    let best_round = chiralities
        .iter()
        .filter_map(|c| driver.hand(*c))
        .map(|h| h.current_round)
        .max()
        .unwrap_or(1);
    println!(
        "Game over after {:.1}s: reached round {}, collected {} markers",
        now, best_round, markers_collected
    );

    let scores_path = std::path::Path::new("ghost-hands-scores.json");
    let mut scores = HighScores::load_from(scores_path);
    if let Some(rank) = scores.add_run(best_round, markers_collected, unix_now) {
        println!("New high score, rank {}", rank);
        if let Err(e) = scores.save_to(scores_path) {
            log::warn!("Could not save high scores: {}", e);
        }
    }

    // Hands reported Mode::GameOver keep history until stopped; reset now
    driver.stop();
    debug_assert!(
        chiralities
            .iter()
            .filter_map(|c| driver.hand(*c))
            .all(|h| h.mode == Mode::Idle)
    );
}

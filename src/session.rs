//! Per-frame session driver and external collaborator traits
//!
//! The driver is the single writer for each hand's state: an external
//! scheduler calls `update()` once per rendering frame, and the driver pulls
//! the latest sensor sample, advances the state machine, reflects poses and
//! marker changes to the scene layer, and runs the round/pause timers that
//! auto-advance rounds. The sensor and scene are reached only through the
//! traits below; the core never owns rendering resources.

use glam::{Mat4, Vec3};

use crate::sim::state::Rules;
use crate::sim::{Chirality, GameEvent, HandJoint, HandSample, HandState, Mode, tick};

/// Which visual proxy a pose update targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyRole {
    Live,
    Ghost,
}

/// Source of hand anchors; a latest-value slot, never blocking
///
/// Returning `None` means the hand is out of view this tick, which is a
/// normal condition, not an error.
pub trait HandProvider {
    fn latest_sample(&mut self, chirality: Chirality) -> Option<HandSample>;
}

/// Rendering-side collaborator holding the visual proxies
///
/// The driver only requests pose/visibility updates and marker
/// attach/detach; the scene owns all resources behind opaque handles.
pub trait SceneLayer {
    fn set_joint_pose(&mut self, hand: Chirality, role: ProxyRole, joint: HandJoint, pose: Mat4);
    fn set_hand_visible(&mut self, hand: Chirality, role: ProxyRole, visible: bool);
    fn attach_markers(&mut self, hand: Chirality, positions: &[Vec3]);
    fn mark_collected(&mut self, hand: Chirality, index: usize);
    fn detach_markers(&mut self, hand: Chirality);
}

/// Owns the per-hand state machines and drives them once per frame
pub struct SessionDriver<P, S> {
    provider: P,
    scene: S,
    hands: Vec<HandState>,
    /// When each hand entered `Pause`, for the cooldown auto-restart
    pause_since: Vec<Option<f64>>,
    /// Last visibility sent per hand, to avoid redundant scene calls
    ghost_shown: Vec<bool>,
}

impl<P: HandProvider, S: SceneLayer> SessionDriver<P, S> {
    pub fn new(provider: P, scene: S, rules: Rules, seed: u64, chiralities: &[Chirality]) -> Self {
        let hands: Vec<HandState> = chiralities
            .iter()
            .enumerate()
            .map(|(i, c)| HandState::new(*c, seed.wrapping_add(i as u64), rules))
            .collect();
        let count = hands.len();
        Self {
            provider,
            scene,
            hands,
            pause_since: vec![None; count],
            ghost_shown: vec![false; count],
        }
    }

    /// Start a round on every configured hand
    pub fn start(&mut self, now: f64) -> Vec<(Chirality, GameEvent)> {
        let mut events = Vec::new();
        for i in 0..self.hands.len() {
            let started = self.hands[i].start_round(now);
            self.absorb_events(i, &started, &mut events);
        }
        events
    }

    /// Stop every hand (full reset from game over, resumable otherwise)
    pub fn stop(&mut self) {
        for i in 0..self.hands.len() {
            let chirality = self.hands[i].chirality;
            self.hands[i].stop();
            self.scene.detach_markers(chirality);
            if self.ghost_shown[i] {
                self.scene.set_hand_visible(chirality, ProxyRole::Ghost, false);
                self.ghost_shown[i] = false;
            }
            self.pause_since[i] = None;
        }
    }

    /// Per-frame update: pull anchors, tick each hand, reflect to the scene
    pub fn update(&mut self, now: f64) -> Vec<(Chirality, GameEvent)> {
        let mut events = Vec::new();

        for i in 0..self.hands.len() {
            let chirality = self.hands[i].chirality;
            let sample = self.provider.latest_sample(chirality);
            let out = tick(&mut self.hands[i], sample.as_ref(), now);

            for (joint, pose) in &out.live {
                self.scene
                    .set_joint_pose(chirality, ProxyRole::Live, *joint, *pose);
            }
            if out.ghost_visible {
                for (joint, pose) in &out.ghost {
                    self.scene
                        .set_joint_pose(chirality, ProxyRole::Ghost, *joint, *pose);
                }
            }
            if out.ghost_visible != self.ghost_shown[i] {
                self.scene
                    .set_hand_visible(chirality, ProxyRole::Ghost, out.ghost_visible);
                self.ghost_shown[i] = out.ghost_visible;
            }

            self.absorb_events(i, &out.events, &mut events);
            self.drive_pause_timer(i, now, &mut events);
        }

        events
    }

    /// Reflect event side effects to the scene and collect them for the UI
    fn absorb_events(
        &mut self,
        index: usize,
        new_events: &[GameEvent],
        sink: &mut Vec<(Chirality, GameEvent)>,
    ) {
        let chirality = self.hands[index].chirality;
        for event in new_events {
            match event {
                GameEvent::RoundStarted { .. } => {
                    let positions = self.hands[index].markers.positions();
                    self.scene.attach_markers(chirality, &positions);
                }
                GameEvent::MarkerCollected { index: marker } => {
                    self.scene.mark_collected(chirality, *marker);
                }
                // Round boundary (win, expiry, or loss): the round's markers
                // come off the scene
                GameEvent::RoundWon { .. }
                | GameEvent::RoundExpired { .. }
                | GameEvent::GameOver => {
                    self.scene.detach_markers(chirality);
                }
                GameEvent::GhostContact(_) => {}
            }
            sink.push((chirality, *event));
        }
    }

    /// Auto-restart after the inter-round cooldown
    fn drive_pause_timer(
        &mut self,
        index: usize,
        now: f64,
        sink: &mut Vec<(Chirality, GameEvent)>,
    ) {
        if self.hands[index].mode != Mode::Pause {
            self.pause_since[index] = None;
            return;
        }
        match self.pause_since[index] {
            None => self.pause_since[index] = Some(now),
            Some(since) if now - since >= self.hands[index].rules.pause_cooldown => {
                self.pause_since[index] = None;
                let started = self.hands[index].start_round(now);
                self.absorb_events(index, &started, sink);
            }
            Some(_) => {}
        }
    }

    pub fn hand(&self, chirality: Chirality) -> Option<&HandState> {
        self.hands.iter().find(|h| h.chirality == chirality)
    }

    /// True once any hand has hit its ghost
    pub fn is_game_over(&self) -> bool {
        self.hands.iter().any(|h| h.mode == Mode::GameOver)
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }
}

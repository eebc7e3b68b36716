//! Per-tick update for one hand
//!
//! Invoked once per rendering frame by the session driver. While `Playing`
//! it records the live hand, replays the stored round time-reversed as the
//! ghost, and runs the ghost and marker proximity checks. Missing sensor
//! data is not an error: the affected work is skipped for that tick.

use glam::{Mat4, Vec3};

use super::collision::ghost_contact;
use super::frame::Frame;
use super::joint::{HandJoint, JOINT_COUNT, transform_position, world_transform};
use super::state::{GameEvent, HandState, Mode};

/// The latest sensor reading for one hand: an anchor world transform plus
/// anchor-relative joint transforms for whichever joints were tracked
#[derive(Debug, Clone)]
pub struct HandSample {
    pub anchor: Mat4,
    /// Joint transforms relative to the anchor, indexed by `HandJoint::index()`
    pub joints: [Option<Mat4>; JOINT_COUNT],
}

impl HandSample {
    pub fn new(anchor: Mat4) -> Self {
        Self {
            anchor,
            joints: [None; JOINT_COUNT],
        }
    }

    pub fn set(&mut self, joint: HandJoint, local: Mat4) {
        self.joints[joint.index()] = Some(local);
    }

    /// World-space pose per tracked joint (`anchor * local`)
    pub fn world_poses(&self) -> Vec<(HandJoint, Mat4)> {
        HandJoint::ALL
            .iter()
            .filter_map(|j| {
                self.joints[j.index()]
                    .as_ref()
                    .map(|local| (*j, world_transform(&self.anchor, local)))
            })
            .collect()
    }
}

/// What one tick produced, for the driver to reflect to the scene
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    /// World poses to apply to the live hand proxies
    pub live: Vec<(HandJoint, Mat4)>,
    /// World poses to apply to the ghost proxies
    pub ghost: Vec<(HandJoint, Mat4)>,
    /// Ghost proxies are shown only during active playback
    pub ghost_visible: bool,
    pub events: Vec<GameEvent>,
}

/// Advance one hand by one tick
///
/// `sample` is the latest anchor for this chirality, or `None` when the
/// hand is out of view this tick. `now` is the driver's clock in seconds.
pub fn tick(state: &mut HandState, sample: Option<&HandSample>, now: f64) -> TickOutput {
    let mut out = TickOutput::default();

    // The live proxies follow the hand in every mode
    if let Some(sample) = sample {
        out.live = sample.world_poses();
    }

    if state.mode != Mode::Playing {
        return out;
    }

    // Round expiry is clock-driven and fires even without sensor data
    if state.elapsed(now) >= state.rules.round_duration {
        out.events.push(GameEvent::RoundExpired {
            round: state.current_round,
        });
        state.start_pause();
        return out;
    }

    // Ghost playback: walk the stored round backward by looking up the
    // frame nearest to the time remaining on the playback clock
    let reversed = (state.rules.round_duration - (now - state.playback_start)) as f32;
    let ghost_frame: Option<Frame> = state
        .ghost_buffer()
        .and_then(|buffer| buffer.nearest(reversed))
        .cloned();
    if let Some(ref frame) = ghost_frame {
        out.ghost = frame.iter().map(|(j, m)| (j, *m)).collect();
        out.ghost_visible = true;
    }

    // No anchor this tick: recording and collision checks no-op, the ghost
    // keeps animating
    if sample.is_none() {
        return out;
    }

    // Record the live frame (partial frames are allowed)
    let mut frame = Frame::new(state.elapsed(now) as f32);
    for (joint, world) in &out.live {
        frame.set(*joint, *world);
    }
    state.recording.append(frame);

    let live_positions: Vec<(HandJoint, Vec3)> = out
        .live
        .iter()
        .map(|(j, m)| (*j, transform_position(m)))
        .collect();

    // Losing check first: the instant any live joint touches a visible
    // ghost joint the game is over, before markers are considered
    if let Some(ref frame) = ghost_frame {
        if let Some(contact) =
            ghost_contact(&live_positions, frame, state.rules.ghost_contact_radius)
        {
            log::debug!(
                "{} hand: ghost contact {:?} at {:.1} mm",
                state.chirality.as_str(),
                contact.live_joint,
                contact.distance * 1000.0
            );
            out.events.push(GameEvent::GhostContact(contact));
            out.events.push(GameEvent::GameOver);
            state.flag_game_over();
            out.ghost_visible = false;
            return out;
        }
    }

    // Marker sweep
    let positions: Vec<Vec3> = live_positions.iter().map(|(_, p)| *p).collect();
    let newly = state
        .markers
        .check_collisions(&positions, state.rules.marker_collect_radius);
    for index in newly {
        out.events.push(GameEvent::MarkerCollected { index });
    }

    // Early win once every marker of the round is collected
    if state.markers.all_collected() && state.collected_markers() == state.current_round {
        out.events.push(GameEvent::RoundWon {
            round: state.current_round,
        });
        state.start_pause();
        out.ghost_visible = false;
    }

    out
}

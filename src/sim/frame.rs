//! Recorded frames, per-round frame buffers, and the round history store
//!
//! A frame is one timestamped snapshot of world-space joint transforms.
//! Buffers are append-only while a round records and read-only afterwards.
//! Playback looks up the frame whose timestamp is nearest a target time;
//! timestamps are monotonically non-decreasing by construction, so a linear
//! scan over one round's worth of frames is fine.

use glam::Mat4;
use serde::{Deserialize, Serialize};

use super::joint::{HandJoint, JOINT_COUNT};

/// One snapshot of world-space joint transforms at a moment in a round
///
/// Partial frames are expected: joints the sensor did not report are `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// World transform per joint, indexed by `HandJoint::index()`
    joints: [Option<Mat4>; JOINT_COUNT],
    /// Elapsed seconds since recording start
    pub timestamp: f32,
}

impl Frame {
    pub fn new(timestamp: f32) -> Self {
        Self {
            joints: [None; JOINT_COUNT],
            timestamp,
        }
    }

    pub fn set(&mut self, joint: HandJoint, world: Mat4) {
        self.joints[joint.index()] = Some(world);
    }

    pub fn get(&self, joint: HandJoint) -> Option<&Mat4> {
        self.joints[joint.index()].as_ref()
    }

    /// Number of joints present in this frame
    pub fn joint_count(&self) -> usize {
        self.joints.iter().filter(|j| j.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.iter().all(|j| j.is_none())
    }

    /// Iterate over the joints present in this frame
    pub fn iter(&self) -> impl Iterator<Item = (HandJoint, &Mat4)> {
        HandJoint::ALL
            .iter()
            .filter_map(|j| self.joints[j.index()].as_ref().map(|m| (*j, m)))
    }
}

/// Ordered, timestamped sequence of frames for one hand and one round
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameBuffer {
    frames: Vec<Frame>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Append a frame; timestamps must be non-decreasing
    pub fn append(&mut self, frame: Frame) {
        if let Some(last) = self.frames.last() {
            if frame.timestamp < last.timestamp {
                log::warn!(
                    "out-of-order frame dropped ({} < {})",
                    frame.timestamp,
                    last.timestamp
                );
                return;
            }
        }
        self.frames.push(frame);
    }

    /// Frame whose timestamp is nearest `target`, ties to the earliest frame
    pub fn nearest(&self, target: f32) -> Option<&Frame> {
        let mut best: Option<(&Frame, f32)> = None;
        for frame in &self.frames {
            let diff = (frame.timestamp - target).abs();
            match best {
                // Strict < keeps the first minimal match on ties
                Some((_, best_diff)) if diff >= best_diff => {}
                _ => best = Some((frame, diff)),
            }
        }
        best.map(|(frame, _)| frame)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}

/// Round history; playback only ever reads the most recent entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundStore {
    rounds: Vec<FrameBuffer>,
}

impl RoundStore {
    pub fn new() -> Self {
        Self { rounds: Vec::new() }
    }

    pub fn push(&mut self, buffer: FrameBuffer) {
        self.rounds.push(buffer);
    }

    /// The most recently completed round's buffer
    pub fn latest(&self) -> Option<&FrameBuffer> {
        self.rounds.last()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Drop all history (game over)
    pub fn clear(&mut self) {
        self.rounds.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    fn frame_at(ts: f32) -> Frame {
        let mut f = Frame::new(ts);
        f.set(HandJoint::Palm, Mat4::from_translation(Vec3::new(ts, 0.0, 0.0)));
        f
    }

    #[test]
    fn test_nearest_empty_buffer() {
        let buf = FrameBuffer::new();
        assert!(buf.nearest(1.0).is_none());
    }

    #[test]
    fn test_nearest_picks_minimum_difference() {
        let mut buf = FrameBuffer::new();
        buf.append(frame_at(0.0));
        buf.append(frame_at(1.0));
        buf.append(frame_at(2.0));

        assert_eq!(buf.nearest(0.9).unwrap().timestamp, 1.0);
        assert_eq!(buf.nearest(1.6).unwrap().timestamp, 2.0);
        assert_eq!(buf.nearest(-5.0).unwrap().timestamp, 0.0);
        assert_eq!(buf.nearest(100.0).unwrap().timestamp, 2.0);
    }

    #[test]
    fn test_nearest_tie_resolves_to_earliest() {
        let mut buf = FrameBuffer::new();
        let mut first = frame_at(1.0);
        first.set(HandJoint::Wrist, Mat4::IDENTITY);
        buf.append(first);
        buf.append(frame_at(3.0));

        // Target 2.0 is equidistant from both; earliest wins
        let hit = buf.nearest(2.0).unwrap();
        assert_eq!(hit.timestamp, 1.0);
        assert!(hit.get(HandJoint::Wrist).is_some());
    }

    #[test]
    fn test_nearest_equal_timestamps_keep_insertion_order() {
        let mut buf = FrameBuffer::new();
        let mut first = frame_at(1.0);
        first.set(HandJoint::Wrist, Mat4::IDENTITY);
        buf.append(first);
        buf.append(frame_at(1.0));

        let hit = buf.nearest(1.0).unwrap();
        assert!(hit.get(HandJoint::Wrist).is_some());
    }

    #[test]
    fn test_append_rejects_backwards_timestamps() {
        let mut buf = FrameBuffer::new();
        buf.append(frame_at(1.0));
        buf.append(frame_at(0.5));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn test_partial_frame_joint_count() {
        let mut f = Frame::new(0.0);
        assert!(f.is_empty());
        f.set(HandJoint::IndexTip, Mat4::IDENTITY);
        f.set(HandJoint::ThumbTip, Mat4::IDENTITY);
        assert_eq!(f.joint_count(), 2);
        assert!(f.get(HandJoint::Palm).is_none());
    }

    #[test]
    fn test_round_store_latest_and_clear() {
        let mut store = RoundStore::new();
        assert!(store.latest().is_none());

        let mut a = FrameBuffer::new();
        a.append(frame_at(0.0));
        let mut b = FrameBuffer::new();
        b.append(frame_at(0.0));
        b.append(frame_at(1.0));

        store.push(a);
        store.push(b);
        assert_eq!(store.len(), 2);
        assert_eq!(store.latest().unwrap().len(), 2);

        store.clear();
        assert!(store.is_empty());
        assert!(store.latest().is_none());
    }

    proptest! {
        #[test]
        fn prop_nearest_minimizes_abs_difference(
            mut timestamps in proptest::collection::vec(0.0f32..10.0, 1..64),
            target in -5.0f32..15.0,
        ) {
            timestamps.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let mut buf = FrameBuffer::new();
            for ts in &timestamps {
                buf.append(frame_at(*ts));
            }

            let picked = buf.nearest(target).unwrap().timestamp;
            let best = timestamps
                .iter()
                .map(|ts| (ts - target).abs())
                .fold(f32::INFINITY, f32::min);
            prop_assert!((picked - target).abs() <= best + 1e-6);
        }
    }
}

//! Hand skeleton identifiers and transform helpers
//!
//! Joint transforms arrive from the tracking provider as 4x4 rigid
//! transforms relative to a per-hand anchor; world pose is `anchor * local`.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Which physical hand a tracking state applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chirality {
    Left,
    Right,
}

impl Chirality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Chirality::Left => "left",
            Chirality::Right => "right",
        }
    }
}

/// Number of tracked joints per hand
pub const JOINT_COUNT: usize = 26;

/// The tracked skeletal joints of one hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HandJoint {
    Palm,
    Wrist,
    ThumbKnuckle,
    ThumbIntermediateBase,
    ThumbIntermediateTip,
    ThumbTip,
    IndexMetacarpal,
    IndexKnuckle,
    IndexIntermediateBase,
    IndexIntermediateTip,
    IndexTip,
    MiddleMetacarpal,
    MiddleKnuckle,
    MiddleIntermediateBase,
    MiddleIntermediateTip,
    MiddleTip,
    RingMetacarpal,
    RingKnuckle,
    RingIntermediateBase,
    RingIntermediateTip,
    RingTip,
    LittleMetacarpal,
    LittleKnuckle,
    LittleIntermediateBase,
    LittleIntermediateTip,
    LittleTip,
}

impl HandJoint {
    /// All joints in index order
    pub const ALL: [HandJoint; JOINT_COUNT] = [
        HandJoint::Palm,
        HandJoint::Wrist,
        HandJoint::ThumbKnuckle,
        HandJoint::ThumbIntermediateBase,
        HandJoint::ThumbIntermediateTip,
        HandJoint::ThumbTip,
        HandJoint::IndexMetacarpal,
        HandJoint::IndexKnuckle,
        HandJoint::IndexIntermediateBase,
        HandJoint::IndexIntermediateTip,
        HandJoint::IndexTip,
        HandJoint::MiddleMetacarpal,
        HandJoint::MiddleKnuckle,
        HandJoint::MiddleIntermediateBase,
        HandJoint::MiddleIntermediateTip,
        HandJoint::MiddleTip,
        HandJoint::RingMetacarpal,
        HandJoint::RingKnuckle,
        HandJoint::RingIntermediateBase,
        HandJoint::RingIntermediateTip,
        HandJoint::RingTip,
        HandJoint::LittleMetacarpal,
        HandJoint::LittleKnuckle,
        HandJoint::LittleIntermediateBase,
        HandJoint::LittleIntermediateTip,
        HandJoint::LittleTip,
    ];

    /// Array index of this joint (0..JOINT_COUNT)
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Compose an anchor-relative joint transform into world space
#[inline]
pub fn world_transform(anchor: &Mat4, local: &Mat4) -> Mat4 {
    *anchor * *local
}

/// Extract the translation component of a rigid transform
#[inline]
pub fn transform_position(transform: &Mat4) -> Vec3 {
    transform.w_axis.truncate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_indices_match_all_order() {
        for (i, joint) in HandJoint::ALL.iter().enumerate() {
            assert_eq!(joint.index(), i);
        }
    }

    #[test]
    fn test_world_transform_composes_translation() {
        let anchor = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let local = Mat4::from_translation(Vec3::new(0.1, 0.0, 0.0));
        let world = world_transform(&anchor, &local);
        let pos = transform_position(&world);
        assert!((pos - Vec3::new(0.1, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_transform_position_identity() {
        assert_eq!(transform_position(&Mat4::IDENTITY), Vec3::ZERO);
    }
}

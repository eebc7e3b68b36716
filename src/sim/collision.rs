//! Live-vs-ghost proximity detection
//!
//! The losing condition: any live joint coming within the contact radius of
//! any visible ghost joint. Only the first colliding pair matters, so the
//! scan short-circuits on the first hit.

use glam::Vec3;

use super::frame::Frame;
use super::joint::{HandJoint, transform_position};

/// The first live/ghost joint pair found within the contact radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostContact {
    pub live_joint: HandJoint,
    pub ghost_joint: HandJoint,
    /// Distance between the two joint positions (meters)
    pub distance: f32,
}

/// Scan all live joints against all ghost joints present in `ghost`
///
/// Ghost joints absent from the frame were not tracked when it was recorded
/// and have no visible proxy, so they cannot collide.
pub fn ghost_contact(
    live: &[(HandJoint, Vec3)],
    ghost: &Frame,
    radius: f32,
) -> Option<GhostContact> {
    for (live_joint, live_pos) in live {
        for (ghost_joint, ghost_transform) in ghost.iter() {
            let ghost_pos = transform_position(ghost_transform);
            let distance = live_pos.distance(ghost_pos);
            if distance < radius {
                return Some(GhostContact {
                    live_joint: *live_joint,
                    ghost_joint,
                    distance,
                });
            }
        }
    }
    None
}

//! Deterministic game core
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clock values are supplied by the caller, never read from the system
//! - Seeded RNG only (marker placement)
//! - No rendering or platform dependencies

pub mod collision;
pub mod frame;
pub mod joint;
pub mod markers;
pub mod state;
pub mod tick;

pub use collision::{GhostContact, ghost_contact};
pub use frame::{Frame, FrameBuffer, RoundStore};
pub use joint::{Chirality, HandJoint, JOINT_COUNT, transform_position, world_transform};
pub use markers::{Marker, MarkerBounds, MarkerSet};
pub use state::{GameEvent, HandState, Mode, Rules};
pub use tick::{HandSample, TickOutput, tick};

//! Round-scaled target markers
//!
//! Each round spawns `current_round` markers at seeded-random positions
//! inside the play volume. A marker collects on the first live joint that
//! comes within reach and is never re-evaluated afterwards.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MARKER_BOUNDS_MAX, MARKER_BOUNDS_MIN};

/// A spatial target the player must touch during a round
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Marker {
    /// World-space position (meters)
    pub position: Vec3,
    pub collected: bool,
}

/// Axis-aligned play volume for marker placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for MarkerBounds {
    fn default() -> Self {
        Self {
            min: MARKER_BOUNDS_MIN,
            max: MARKER_BOUNDS_MAX,
        }
    }
}

impl MarkerBounds {
    /// Sample a position uniformly per axis
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec3 {
        Vec3::new(
            rng.random_range(self.min.x..=self.max.x),
            rng.random_range(self.min.y..=self.max.y),
            rng.random_range(self.min.z..=self.max.z),
        )
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

/// The current round's markers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self {
            markers: Vec::new(),
        }
    }

    /// Generate `count` uncollected markers inside `bounds`
    pub fn generate<R: Rng>(count: u32, bounds: &MarkerBounds, rng: &mut R) -> Self {
        let markers = (0..count)
            .map(|_| Marker {
                position: bounds.sample(rng),
                collected: false,
            })
            .collect();
        Self { markers }
    }

    /// Sweep live joint positions against uncollected markers
    ///
    /// First joint within `radius` collects the marker; a collected marker
    /// is never re-evaluated. Returns the indices collected this sweep.
    pub fn check_collisions(&mut self, joint_positions: &[Vec3], radius: f32) -> Vec<usize> {
        let mut collected = Vec::new();
        for (i, marker) in self.markers.iter_mut().enumerate() {
            if marker.collected {
                continue;
            }
            for pos in joint_positions {
                if pos.distance(marker.position) < radius {
                    marker.collected = true;
                    collected.push(i);
                    break;
                }
            }
        }
        collected
    }

    pub fn collected_count(&self) -> u32 {
        self.markers.iter().filter(|m| m.collected).count() as u32
    }

    pub fn all_collected(&self) -> bool {
        !self.markers.is_empty() && self.markers.iter().all(|m| m.collected)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.markers.iter().map(|m| m.position).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    /// Detach everything at a round boundary
    pub fn clear(&mut self) {
        self.markers.clear();
    }
}

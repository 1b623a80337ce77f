//=========================================================================
// Geometry
//=========================================================================
//
// Leaf math for the cube-world: face labels, floor resolution and the
// scalar easing used by every smoothing stage.
//
//=========================================================================

//=== Module Declarations =================================================

mod easing;
mod face;

//=== Public API ==========================================================

pub use easing::{exp_smoothing_factor, inverse_lerp, lerp, smooth_step, MIN_SHARPNESS};
pub use face::{ceiling_face, classify_direction, floor_face, Face};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

//=== Pose ================================================================

/// Position and orientation of an object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Maps a point from this pose's local space into its parent space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Maps a direction from this pose's local space into its parent space.
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//=========================================================================
// Face Geometry
//=========================================================================
//
// Discrete face labels of a cubic room and the pure functions that map
// between labels and directions.
//
// Floor resolution transforms world "down" into the room's local frame
// and picks the dominant axis. Ties are broken Y first, then X, then Z.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

//=== Face ================================================================

/// One of the six faces of a cubic room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
}

impl Face {
    /// All faces in authoring order.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    /// Returns the face on the other side of the cube.
    pub fn opposite(self) -> Face {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
        }
    }

    /// Unit normal pointing out of the cube through this face, in room space.
    pub fn outward_normal(self) -> Vec3 {
        match self {
            Face::Front => Vec3::Z,
            Face::Back => Vec3::NEG_Z,
            Face::Left => Vec3::NEG_X,
            Face::Right => Vec3::X,
            Face::Top => Vec3::Y,
            Face::Bottom => Vec3::NEG_Y,
        }
    }
}

//=== Classification ======================================================

/// Classifies a room-local direction into the face it points at.
pub fn classify_direction(local: Vec3) -> Face {
    let ax = local.x.abs();
    let ay = local.y.abs();
    let az = local.z.abs();

    if ay >= ax && ay >= az {
        return if local.y > 0.0 { Face::Top } else { Face::Bottom };
    }

    if ax >= ay && ax >= az {
        return if local.x > 0.0 { Face::Right } else { Face::Left };
    }

    if local.z > 0.0 {
        Face::Front
    } else {
        Face::Back
    }
}

/// Resolves which face is currently the floor for a room with the given
/// world orientation.
pub fn floor_face(orientation: Quat) -> Face {
    let local_down = orientation.inverse() * Vec3::NEG_Y;
    classify_direction(local_down)
}

/// Ceiling is always the opposite of the floor.
pub fn ceiling_face(orientation: Quat) -> Face {
    floor_face(orientation).opposite()
}

//=== Tests ===============================================================

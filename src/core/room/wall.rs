//=========================================================================
// Wall
//=========================================================================
//
// Per-surface descriptor of a room's cube shell. The descriptor is fixed
// once the room is built; only the attached visual changes over time.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::geometry::Face;
use crate::core::visibility::WallVisual;

//=== WallId ==============================================================

/// Stable handle of a wall within its room. Doubles as a side-table index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallId(pub usize);

impl WallId {
    pub fn index(self) -> usize {
        self.0
    }
}

//=== Wall ================================================================

pub struct Wall {
    id: WallId,
    face: Face,
    interior: bool,
    walkable: bool,
    center: Vec3,
    visual: Option<WallVisual>,
}

impl Wall {
    /// Creates a wall on `face` centred at `center` in room space.
    ///
    /// Only the interior bottom surface is walkable.
    pub fn new(face: Face, interior: bool, center: Vec3) -> Self {
        Self {
            id: WallId(0),
            face,
            interior,
            walkable: interior && face == Face::Bottom,
            center,
            visual: None,
        }
    }

    pub fn with_visual(mut self, visual: WallVisual) -> Self {
        self.visual = Some(visual);
        self
    }

    pub(crate) fn set_id(&mut self, id: WallId) {
        self.id = id;
    }

    //--- Descriptor -------------------------------------------------------

    pub fn id(&self) -> WallId {
        self.id
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_interior(&self) -> bool {
        self.interior
    }

    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    /// Centre of the surface in room space.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Direction the rendered side of the surface faces, in room space.
    ///
    /// Interior surfaces face into the room, exterior ones away from it.
    pub fn surface_normal(&self) -> Vec3 {
        let outward = self.face.outward_normal();
        if self.interior {
            -outward
        } else {
            outward
        }
    }

    //--- Visual -----------------------------------------------------------

    pub fn visual(&self) -> Option<&WallVisual> {
        self.visual.as_ref()
    }

    pub fn visual_mut(&mut self) -> Option<&mut WallVisual> {
        self.visual.as_mut()
    }
}

impl std::fmt::Debug for Wall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wall")
            .field("id", &self.id)
            .field("face", &self.face)
            .field("interior", &self.interior)
            .field("walkable", &self.walkable)
            .field("has_visual", &self.visual.is_some())
            .finish()
    }
}

//=== Tests ===============================================================

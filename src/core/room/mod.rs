//=========================================================================
// Rooms
//=========================================================================
//
// Room catalog entries, live room instances and the manager that swaps
// between them.
//
// Architecture:
//   RoomDefinition (catalog) ──RoomManager──> SceneFactory::instantiate
//                                                   ↓
//                                     Room { walls, anchors, portals }
//
//=========================================================================

//=== Module Declarations =================================================

mod definition;
mod manager;
mod portal;
#[allow(clippy::module_inception)]
mod room;
mod shell;
mod wall;

//=== Public API ==========================================================

pub use definition::{GeometryHandle, RoomDefinition};
pub use manager::{Admission, RoomManager, TransitionState};
pub use portal::Portal;
pub use room::{Room, RotationAxis};
pub use shell::{CubeShellFactory, PortalDefaults, RendererSource, RoomBlueprint, SPAWN_ANCHOR};
pub use wall::{Wall, WallId};

pub(crate) use definition::non_blank;

//=== NodeId ==============================================================

/// Handle of a node in the host's scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl NodeId {
    /// The scene root.
    pub const ROOT: NodeId = NodeId(0);
}

//=========================================================================
// Requests
//=========================================================================
//
// Inbound messages pushed onto the engine's message bus by gameplay code
// during a frame. The engine drains and dispatches them at the start of
// the next tick, in the order listed in `GlobalSystems::dispatch`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::room::RotationAxis;
use crate::core::visibility::ViewMode;

//=== Room Requests =======================================================

/// Load a catalog entry at the default spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadRoom(pub isize);

/// Debug stepping through the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRoom {
    Previous,
    Next,
}

impl StepRoom {
    pub fn delta(self) -> isize {
        match self {
            StepRoom::Previous => -1,
            StepRoom::Next => 1,
        }
    }
}

/// A portal fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalTriggered {
    pub target_index: isize,
    pub spawn_name: String,
    pub required_item: Option<String>,
}

/// The player picked up an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCollected(pub String);

//=== Cube Requests =======================================================

/// Rotate the current room a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotateRoom(pub RotationAxis);

//=== Camera Requests =====================================================

/// The camera mode source switched modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraModeChanged(pub ViewMode);

//=========================================================================
// Global Context
//=========================================================================
//
// Shared data gameplay code writes between ticks:
// - requests: inbound messages drained at the next tick
// - camera: world position of the inside camera, if any
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;

//=== Internal Dependencies ===============================================

use crate::core::message_bus::MessageBus;

//=== GlobalContext =======================================================

/// Per-frame input to [`super::GlobalSystems::update`].
#[derive(Default)]
pub struct GlobalContext {
    /// Requests queued by portals, pickups, the camera rig and debug keys.
    pub requests: MessageBus,

    /// Inside camera position. Inside-mode visibility is skipped without it.
    pub camera: Option<Vec3>,
}

impl GlobalContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

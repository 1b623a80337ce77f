//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use cube_rooms::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};

// Global systems and context
pub use crate::core::globals::{GlobalContext, GlobalSystems};

// Rooms
pub use crate::core::room::{
    Admission, CubeShellFactory, GeometryHandle, Portal, Room, RoomBlueprint, RoomDefinition,
    RoomManager, RotationAxis, Wall, WallId,
};

// Visibility
pub use crate::core::visibility::{ViewMode, WallVisibilityController, WallVisual};

// Collaborators
pub use crate::core::collaborators::{
    GravitySink, Inventory, PlayerRoot, SceneFactory, TransitionEffect, WallRenderer,
};

// Events, requests and errors
pub use crate::core::error::{FactoryError, RoomError};
pub use crate::core::events::{RoomEvent, Subscription};
pub use crate::core::requests::{
    CameraModeChanged, ItemCollected, LoadRoom, PortalTriggered, RotateRoom, StepRoom,
};

// Math
pub use crate::core::geometry::{Face, Pose};
pub use glam::{Quat, Vec3};

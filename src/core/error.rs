//=========================================================================
// Errors
//=========================================================================
//
// Every failure in the room core is recoverable. `RoomError`'s display
// text doubles as the reason string carried by `RoomEvent::Blocked`.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== RoomError ===========================================================

/// Reasons a transition request was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Invalid room index")]
    InvalidIndex,

    #[error("Invalid portal target")]
    InvalidPortalTarget,

    #[error("Missing prefab")]
    MissingGeometry,

    #[error("Room container is not assigned")]
    MissingContainer,

    #[error("Missing item: {0}")]
    MissingItem(String),

    #[error("Room factory failed: {0}")]
    Factory(#[from] FactoryError),
}

//=== FactoryError ========================================================

/// Failures raised by a [`crate::core::collaborators::SceneFactory`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryError {
    #[error("no geometry registered under '{0}'")]
    UnknownGeometry(String),

    #[error("invalid room blueprint: {0}")]
    InvalidBlueprint(String),
}

//=== Tests ===============================================================

//=========================================================================
// Core Systems
//
// Every subsystem of the room core, leaf-first:
// - geometry: face labels, floor resolution, easing
// - config / error / events / requests: ambient plumbing
// - collaborators: traits for what the core drives but does not own
// - visibility: wall fade actor and the per-tick visibility policy
// - room: walls, portals, rooms, the shell factory and the manager
// - message_bus / globals: request queues and the tick pipeline
//
//=========================================================================

//=== Module Declarations =================================================

pub mod collaborators;
pub mod config;
pub mod error;
pub mod events;
pub mod geometry;
pub mod globals;
pub mod message_bus;
pub mod requests;
pub mod room;
pub mod visibility;

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems};

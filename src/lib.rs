//=========================================================================
// Cube Rooms: Library Root
//
// Room traversal and wall visibility for a rotating cube-world.
//
// Responsibilities:
// - Serialize room loads behind a single-flight transition state machine
// - Rotate rooms a quarter turn at a time and keep floor and gravity in step
// - Fade walls in and out from camera geometry every tick
//
// Typical usage:
// ```no_run
// use cube_rooms::prelude::*;
//
// let mut engine = EngineBuilder::new()
//     .with_catalog(catalog)
//     .with_factory(Box::new(factory))
//     .with_start_room(0)
//     .build();
//
// loop {
//     engine.set_camera(Some(camera_position));
//     engine.tick(frame_dt);
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds every subsystem: rooms, visibility, geometry, events and
// the collaborator traits hosts implement.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` wires the subsystems together and defines the tick order.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};

//=========================================================================
// Global Systems
//=========================================================================
//
// Owns the room manager, the visibility policy and the physics gravity
// sink, and runs them in a fixed order every tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::GlobalContext;
use crate::core::collaborators::GravitySink;
use crate::core::error::RoomError;
use crate::core::events::{RoomEvent, Subscription};
use crate::core::geometry::floor_face;
use crate::core::requests::{
    CameraModeChanged, ItemCollected, LoadRoom, PortalTriggered, RotateRoom, StepRoom,
};
use crate::core::room::{Admission, RoomManager};
use crate::core::visibility::{ViewMode, WallVisibilityController};

//=== GlobalSystems =======================================================

pub struct GlobalSystems {
    /// Transition state machine and current room.
    pub rooms: RoomManager,

    /// Per-tick wall fade policy.
    pub visibility: WallVisibilityController,

    /// Receives gravity whenever a coupled rotation changes it.
    pub physics: Box<dyn GravitySink>,

    floor_events: Subscription<RoomEvent>,
    view_mode: ViewMode,
}

impl GlobalSystems {
    /// Wires the visibility controller and the floor bridge to the
    /// manager's events.
    pub fn new(
        mut rooms: RoomManager,
        visibility: WallVisibilityController,
        physics: Box<dyn GravitySink>,
    ) -> Self {
        let visibility = visibility.with_events(rooms.subscribe());
        let floor_events = rooms.subscribe();
        let view_mode = visibility.mode();

        Self {
            rooms,
            visibility,
            physics,
            floor_events,
            view_mode,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    //--- Update Loop ------------------------------------------------------

    /// Runs one tick.
    ///
    /// # Processing Pipeline
    ///
    /// 1. **Transition**: resume the room swap admitted on an earlier tick
    /// 2. **Requests**: drain and dispatch the context's message bus
    /// 3. **Rotation**: advance the current room's quarter turn
    /// 4. **Floor**: re-resolve the floor after loads, turns and inspect exit
    /// 5. **Visibility**: react to events, then compute fade targets
    /// 6. **Visuals**: step every wall's fade smoothing
    /// 7. **Cleanup**: clear the message bus
    pub(crate) fn update(&mut self, context: &mut GlobalContext, dt: f32) {
        // 1. Transition
        self.rooms.update(dt);

        // 2. Requests
        self.dispatch(context);

        // 3. Rotation
        let finished = self
            .rooms
            .current_room_mut()
            .is_some_and(|room| room.advance_rotation(dt));
        if finished {
            self.rooms.events_mut().emit(RoomEvent::RotationFinished);
        }

        // 4. Floor
        self.bridge_floor();

        // 5. Visibility
        let camera = context.camera;
        self.visibility
            .process_events(self.rooms.current_room_mut(), camera);
        self.visibility
            .update(self.rooms.current_room_mut(), camera, dt);

        // 6. Visuals
        if let Some(room) = self.rooms.current_room_mut() {
            room.update_visuals(dt);
        }

        // 7. Cleanup
        context.requests.clear_all();
    }

    /// Dispatches queued requests.
    ///
    /// Item pickups run before portals so a key collected this frame
    /// already opens a door touched in the same frame.
    fn dispatch(&mut self, context: &mut GlobalContext) {
        let requests = &mut context.requests;

        for CameraModeChanged(mode) in requests.drain::<CameraModeChanged>() {
            self.change_view_mode(mode);
        }

        for ItemCollected(item) in requests.drain::<ItemCollected>() {
            self.rooms.collect_item(&item);
        }

        for portal in requests.drain::<PortalTriggered>() {
            report(self.rooms.handle_portal(&portal));
        }

        for LoadRoom(index) in requests.drain::<LoadRoom>() {
            report(self.rooms.load_by_index(index));
        }

        for step in requests.drain::<StepRoom>() {
            report(self.rooms.step(step));
        }

        for RotateRoom(axis) in requests.drain::<RotateRoom>() {
            match self.rooms.current_room_mut() {
                Some(room) => {
                    room.rotate_by(axis, self.physics.as_mut());
                }
                None => debug!("Rotation {:?} ignored, no current room", axis),
            }
        }
    }

    fn change_view_mode(&mut self, mode: ViewMode) {
        if self.view_mode == mode {
            return;
        }

        self.view_mode = mode;
        let event = match mode {
            ViewMode::Inspect => RoomEvent::InspectEntered,
            ViewMode::Inside => RoomEvent::InspectExited,
        };
        self.rooms.events_mut().emit(event);
    }

    /// Applies the resolved floor after events that can change it.
    fn bridge_floor(&mut self) {
        let refresh = self.floor_events.drain().fold(false, |refresh, event| {
            refresh
                || matches!(
                    event,
                    RoomEvent::Loaded(_) | RoomEvent::RotationFinished | RoomEvent::InspectExited
                )
        });

        if !refresh {
            return;
        }

        if let Some(room) = self.rooms.current_room_mut() {
            let floor = floor_face(room.orientation());
            room.apply_floor(floor);
        }
    }
}

fn report(result: Result<Admission, RoomError>) {
    if let Err(error) = result {
        debug!("Request refused: {}", error);
    }
}

//=========================================================================
// Room Manager
//=========================================================================
//
// Transition state machine that owns the room catalog and the current
// room, and serializes every swap between rooms.
//
// States:
//   Idle ──request admitted──> Transitioning ──effect complete──> Idle
//
// Transition body (one at a time):
//   emit Loading ──> [effect midpoint] unload + spawn + place player
//                ──> emit Loaded ──> [effect complete] busy cleared
//
// Requests that arrive while Transitioning are dropped, never queued.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::{non_blank, NodeId, Room, RoomDefinition, SPAWN_ANCHOR};
use crate::core::collaborators::{
    EffectStep, Inventory, MemoryInventory, PlayerRoot, SceneFactory, TransitionEffect,
};
use crate::core::error::RoomError;
use crate::core::events::{EventHub, LoadedRoom, RoomEvent, Subscription};
use crate::core::geometry::Pose;
use crate::core::requests::{PortalTriggered, StepRoom};

//=== Admission ===========================================================

/// Outcome of a request that was not refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A transition is now running.
    Started,
    /// Another transition was already running; the request was ignored.
    Dropped,
}

/// Coarse state of the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionState {
    Idle,
    Transitioning,
}

//=== Internal State ======================================================

/// Continuation of an admitted transition, resumed once per tick.
#[derive(Debug)]
struct PendingTransition {
    index: usize,
    spawn_name: String,
    swapped: bool,
}

struct ActiveRoom {
    index: usize,
    node: NodeId,
    room: Room,
}

//=== RoomManager =========================================================

/// Owns the loaded room and runs one room transition at a time.
pub struct RoomManager {
    catalog: Vec<RoomDefinition>,
    container: Option<NodeId>,
    factory: Box<dyn SceneFactory>,
    effect: Option<Box<dyn TransitionEffect>>,
    inventory: Box<dyn Inventory>,
    player: Option<Box<dyn PlayerRoot>>,
    current: Option<ActiveRoom>,
    task: Option<PendingTransition>,
    events: EventHub<RoomEvent>,
}

impl RoomManager {
    //--- Construction -----------------------------------------------------

    /// Creates an idle manager with rooms spawned under the scene root.
    pub fn new(catalog: Vec<RoomDefinition>, factory: Box<dyn SceneFactory>) -> Self {
        info!("Room manager created with {} catalog entries", catalog.len());

        Self {
            catalog,
            container: Some(NodeId::ROOT),
            factory,
            effect: None,
            inventory: Box::new(MemoryInventory::new()),
            player: None,
            current: None,
            task: None,
            events: EventHub::new(),
        }
    }

    /// Sets the node new rooms are spawned under. `None` blocks every load.
    pub fn with_container(mut self, container: Option<NodeId>) -> Self {
        self.container = container;
        self
    }

    /// Plays `effect` around every swap instead of swapping at once.
    pub fn with_effect(mut self, effect: Box<dyn TransitionEffect>) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Replaces the in-memory inventory used for item gates.
    pub fn with_inventory(mut self, inventory: Box<dyn Inventory>) -> Self {
        self.inventory = inventory;
        self
    }

    /// Player teleported to the spawn anchor after each swap.
    pub fn with_player(mut self, player: Box<dyn PlayerRoot>) -> Self {
        self.player = Some(player);
        self
    }

    //--- Requests ---------------------------------------------------------

    /// Loads catalog entry `index` at the default spawn anchor.
    pub fn load_by_index(&mut self, index: isize) -> Result<Admission, RoomError> {
        if self.is_busy() {
            debug!("Load of room {} dropped, transition in progress", index);
            return Ok(Admission::Dropped);
        }

        let Some(index) = self.checked_index(index) else {
            return self.block(RoomError::InvalidIndex);
        };

        self.begin(index, SPAWN_ANCHOR)
    }

    /// Handles a fired portal.
    ///
    /// The portal's own requirement wins over the target definition's.
    pub fn handle_portal(&mut self, portal: &PortalTriggered) -> Result<Admission, RoomError> {
        if self.is_busy() {
            debug!("Portal to room {} dropped, transition in progress", portal.target_index);
            return Ok(Admission::Dropped);
        }

        let Some(index) = self.checked_index(portal.target_index) else {
            return self.block(RoomError::InvalidPortalTarget);
        };

        let required = non_blank(portal.required_item.as_deref())
            .or_else(|| self.catalog[index].requirement())
            .map(str::to_string);

        if let Some(item) = required {
            if !self.inventory.has(&item) {
                return self.block(RoomError::MissingItem(item));
            }
        }

        self.begin(index, &portal.spawn_name)
    }

    /// Adds a collected item to the inventory.
    pub fn collect_item(&mut self, item: &str) {
        self.inventory.add(item);
    }

    /// Debug stepping relative to the current room.
    pub fn step(&mut self, step: StepRoom) -> Result<Admission, RoomError> {
        let from = self.current_index().map_or(-1, |i| i as isize);
        self.load_by_index(from + step.delta())
    }

    //--- Update Loop ------------------------------------------------------

    /// Resumes the running transition, if any.
    pub fn update(&mut self, dt: f32) {
        let Some(mut task) = self.task.take() else {
            return;
        };

        let step = match self.effect.as_mut() {
            Some(effect) => effect.advance(dt),
            None => EffectStep::Complete,
        };

        match step {
            EffectStep::Running => {}
            EffectStep::Midpoint => {
                if !task.swapped {
                    self.swap(task.index, &task.spawn_name);
                    task.swapped = true;
                }
            }
            EffectStep::Complete => {
                if !task.swapped {
                    self.swap(task.index, &task.spawn_name);
                }
                debug!("Transition to room {} complete", task.index);
                return;
            }
        }

        self.task = Some(task);
    }

    //--- Queries ----------------------------------------------------------

    /// Whether a transition is admitted and not yet complete.
    pub fn is_busy(&self) -> bool {
        self.task.is_some()
    }

    /// Current transition state.
    pub fn state(&self) -> TransitionState {
        if self.is_busy() {
            TransitionState::Transitioning
        } else {
            TransitionState::Idle
        }
    }

    /// Room definitions, indexed by catalog index.
    pub fn catalog(&self) -> &[RoomDefinition] {
        &self.catalog
    }

    /// Catalog index of the loaded room.
    pub fn current_index(&self) -> Option<usize> {
        self.current.as_ref().map(|active| active.index)
    }

    /// Scene node of the loaded room.
    pub fn current_node(&self) -> Option<NodeId> {
        self.current.as_ref().map(|active| active.node)
    }

    /// The loaded room, if any.
    pub fn current_room(&self) -> Option<&Room> {
        self.current.as_ref().map(|active| &active.room)
    }

    /// Mutable access to the loaded room.
    pub fn current_room_mut(&mut self) -> Option<&mut Room> {
        self.current.as_mut().map(|active| &mut active.room)
    }

    /// Inventory consulted by item gates.
    pub fn inventory(&self) -> &dyn Inventory {
        self.inventory.as_ref()
    }

    /// Player collaborator, if one is attached.
    pub fn player(&self) -> Option<&dyn PlayerRoot> {
        self.player.as_deref()
    }

    //--- Events -----------------------------------------------------------

    /// Registers a room event listener. See [`EventHub::subscribe`].
    pub fn subscribe(&mut self) -> Subscription<RoomEvent> {
        self.events.subscribe()
    }

    /// Hub used for events raised on the manager's behalf.
    pub fn events_mut(&mut self) -> &mut EventHub<RoomEvent> {
        &mut self.events
    }

    //--- Internal Helpers -------------------------------------------------

    fn checked_index(&self, index: isize) -> Option<usize> {
        usize::try_from(index).ok().filter(|&i| i < self.catalog.len())
    }

    fn block(&mut self, error: RoomError) -> Result<Admission, RoomError> {
        warn!("Room transition blocked: {}", error);
        self.events.emit(RoomEvent::Blocked(error.to_string()));
        Err(error)
    }

    /// Admits a transition. The catalog index must already be valid.
    fn begin(&mut self, index: usize, spawn_name: &str) -> Result<Admission, RoomError> {
        let definition = &self.catalog[index];
        if definition.geometry.is_none() {
            return self.block(RoomError::MissingGeometry);
        }
        if self.container.is_none() {
            return self.block(RoomError::MissingContainer);
        }

        info!("Loading room {} '{}' at '{}'", index, definition.name, spawn_name);
        let loading = RoomEvent::Loading(definition.clone());
        self.events.emit(loading);

        let mut task = PendingTransition {
            index,
            spawn_name: spawn_name.to_string(),
            swapped: false,
        };

        match self.effect.as_mut() {
            Some(effect) => effect.begin(),
            None => {
                self.swap(index, spawn_name);
                task.swapped = true;
            }
        }

        self.task = Some(task);
        Ok(Admission::Started)
    }

    /// Destroys the current room and spawns catalog entry `index`.
    fn swap(&mut self, index: usize, spawn_name: &str) {
        if let Some(previous) = self.current.take() {
            debug!("Unloading room {}", previous.index);
            self.factory.destroy(previous.node, previous.room);
        }

        let definition = &self.catalog[index];
        let (Some(geometry), Some(container)) = (definition.geometry.clone(), self.container)
        else {
            warn!("Room {} lost its geometry or container mid-transition", index);
            return;
        };
        let name = definition.name.clone();

        let spawned = match self.factory.instantiate(&geometry, container) {
            Ok(spawned) => spawned,
            Err(error) => {
                let error = RoomError::from(error);
                warn!("Room transition failed: {}", error);
                self.events.emit(RoomEvent::Blocked(error.to_string()));
                return;
            }
        };

        let mut room = spawned.room.unwrap_or_else(Room::empty);
        room.set_pose(Pose::IDENTITY);
        room.initialize();
        room.activate();

        match (room.spawn_pose(spawn_name), self.player.as_mut()) {
            (Some(pose), Some(player)) => player.teleport(pose),
            (None, Some(_)) => debug!("Room '{}' has no spawn anchor, player left in place", name),
            _ => {}
        }

        let loaded = LoadedRoom {
            index,
            name,
            node: spawned.node,
            wall_count: room.walls().len(),
        };

        self.current = Some(ActiveRoom {
            index,
            node: spawned.node,
            room,
        });

        info!("Room {} '{}' loaded", loaded.index, loaded.name);
        self.events.emit(RoomEvent::Loaded(loaded));
    }
}

impl std::fmt::Debug for RoomManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoomManager")
            .field("catalog", &self.catalog.len())
            .field("container", &self.container)
            .field("current_index", &self.current_index())
            .field("task", &self.task)
            .finish()
    }
}

//=== Tests ===============================================================

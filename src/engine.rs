//=========================================================================
// Cube Rooms Engine
//
// Entry point that wires the room core together and ticks it.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──tick(dt) / step()──>  [Systems]
//         │                          │
//         ├─ with_tps()              ├─ push_request()
//         ├─ with_catalog()          ├─ set_camera()
//         ├─ with_factory()          └─ subscribe()
//         └─ with_start_room()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::collaborators::{
    GravityField, GravitySink, Inventory, PlayerRoot, SceneFactory, TransitionEffect,
};
use crate::core::config::VisibilityConfig;
use crate::core::events::{RoomEvent, Subscription};
use crate::core::message_bus::Message;
use crate::core::room::{CubeShellFactory, NodeId, Room, RoomDefinition, RoomManager};
use crate::core::visibility::WallVisibilityController;
use crate::core::{GlobalContext, GlobalSystems};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (fixed ticks per second used by [`Engine::step`])
/// - **Catalog**: empty
/// - **Factory**: a [`CubeShellFactory`] with no blueprints
/// - **Container**: the scene root
/// - **Start room**: none
///
/// # Examples
///
/// ```
/// use cube_rooms::EngineBuilder;
/// use cube_rooms::core::room::{CubeShellFactory, GeometryHandle, RoomBlueprint, RoomDefinition};
///
/// let cube = GeometryHandle::new("cube");
/// let factory = CubeShellFactory::new().with_blueprint(cube.clone(), RoomBlueprint::default());
///
/// let mut engine = EngineBuilder::new()
///     .with_tps(120.0)
///     .with_catalog(vec![RoomDefinition::new("hall", cube)])
///     .with_factory(Box::new(factory))
///     .with_start_room(0)
///     .build();
///
/// engine.step();
/// assert_eq!(engine.systems().rooms.current_index(), Some(0));
/// ```
pub struct EngineBuilder {
    tps: f64,
    catalog: Vec<RoomDefinition>,
    factory: Option<Box<dyn SceneFactory>>,
    container: Option<NodeId>,
    effect: Option<Box<dyn TransitionEffect>>,
    inventory: Option<Box<dyn Inventory>>,
    player: Option<Box<dyn PlayerRoot>>,
    physics: Option<Box<dyn GravitySink>>,
    visibility: VisibilityConfig,
    start_room: Option<isize>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            catalog: Vec::new(),
            factory: None,
            container: Some(NodeId::ROOT),
            effect: None,
            inventory: None,
            player: None,
            physics: None,
            visibility: VisibilityConfig::default(),
            start_room: None,
        }
    }

    /// Sets the fixed tick rate used by [`Engine::step`].
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Room definitions the engine can load.
    ///
    /// Default: empty
    pub fn with_catalog(mut self, catalog: Vec<RoomDefinition>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Factory that builds and tears down room instances.
    ///
    /// Default: a [`CubeShellFactory`] with no blueprints.
    pub fn with_factory(mut self, factory: Box<dyn SceneFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Node rooms are spawned under. `None` makes every load fail.
    pub fn with_container(mut self, container: Option<NodeId>) -> Self {
        self.container = container;
        self
    }

    /// Transition effect played around every room swap.
    pub fn with_effect(mut self, effect: Box<dyn TransitionEffect>) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Inventory consulted by item-gated portals and rooms.
    pub fn with_inventory(mut self, inventory: Box<dyn Inventory>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Player teleported to the spawn anchor on every load.
    pub fn with_player(mut self, player: Box<dyn PlayerRoot>) -> Self {
        self.player = Some(player);
        self
    }

    /// Physics collaborator that receives gravity changes.
    ///
    /// Default: a [`GravityField`].
    pub fn with_physics(mut self, physics: Box<dyn GravitySink>) -> Self {
        self.physics = Some(physics);
        self
    }

    /// Tuning for the wall visibility controller.
    pub fn with_visibility(mut self, config: VisibilityConfig) -> Self {
        self.visibility = config;
        self
    }

    /// Loads this catalog entry as soon as the engine is built.
    pub fn with_start_room(mut self, index: isize) -> Self {
        self.start_room = Some(index);
        self
    }

    /// Builds the engine and requests the start room, if any.
    pub fn build(self) -> Engine {
        info!(
            "Building engine (TPS: {}, catalog: {} rooms)",
            self.tps,
            self.catalog.len()
        );

        let factory = self
            .factory
            .unwrap_or_else(|| Box::new(CubeShellFactory::new()));

        let mut rooms = RoomManager::new(self.catalog, factory).with_container(self.container);
        if let Some(effect) = self.effect {
            rooms = rooms.with_effect(effect);
        }
        if let Some(inventory) = self.inventory {
            rooms = rooms.with_inventory(inventory);
        }
        if let Some(player) = self.player {
            rooms = rooms.with_player(player);
        }

        let physics = self
            .physics
            .unwrap_or_else(|| Box::new(GravityField::default()));
        let visibility = WallVisibilityController::new(self.visibility);

        let mut engine = Engine {
            systems: GlobalSystems::new(rooms, visibility, physics),
            context: GlobalContext::new(),
            tps: self.tps,
            ticks: 0,
        };

        if let Some(index) = self.start_room {
            engine.push_request(crate::core::requests::LoadRoom(index));
        }

        engine
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Single-threaded runtime for the room core.
///
/// The host calls [`Engine::tick`] once per frame (or [`Engine::step`] at
/// the fixed rate) and feeds requests in between.
///
/// ```text
/// Engine
///   ├─► GlobalContext   requests bus, camera position
///   └─► GlobalSystems   RoomManager, WallVisibilityController, physics
/// ```
pub struct Engine {
    systems: GlobalSystems,
    context: GlobalContext,
    tps: f64,
    ticks: u64,
}

impl Engine {
    //--- Initialization ---------------------------------------------------

    /// Gives mutable access to the systems before the first tick.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems),
    {
        info!("Initializing engine systems");
        init_fn(&mut self.systems);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Advances every system by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.systems.update(&mut self.context, dt);
        self.ticks += 1;
    }

    /// Advances by one fixed step of `1 / tps` seconds.
    pub fn step(&mut self) {
        self.tick(self.fixed_dt());
    }

    /// Seconds per fixed step.
    pub fn fixed_dt(&self) -> f32 {
        (1.0 / self.tps) as f32
    }

    /// Fixed tick rate.
    pub fn tps(&self) -> f64 {
        self.tps
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    //--- Inputs -----------------------------------------------------------

    /// Queues a request for the next tick.
    pub fn push_request<M: Message>(&mut self, request: M) {
        self.context.requests.push(request);
    }

    /// Camera position used by the next visibility pass. `None` pauses
    /// Inside-mode updates.
    pub fn set_camera(&mut self, camera: Option<Vec3>) {
        self.context.camera = camera;
    }

    //--- Accessors --------------------------------------------------------

    /// Registers a room event listener.
    ///
    /// Each subscription is an unbounded queue: drain it every tick (or drop
    /// it) or it grows for as long as the engine runs.
    pub fn subscribe(&mut self) -> Subscription<RoomEvent> {
        self.systems.rooms.subscribe()
    }

    /// The loaded room, if any.
    pub fn current_room(&self) -> Option<&Room> {
        self.systems.rooms.current_room()
    }

    /// Read access to every system.
    pub fn systems(&self) -> &GlobalSystems {
        &self.systems
    }

    /// Mutable access to every system.
    pub fn systems_mut(&mut self) -> &mut GlobalSystems {
        &mut self.systems
    }

    /// Request bus and camera state.
    pub fn context(&self) -> &GlobalContext {
        &self.context
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

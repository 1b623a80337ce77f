//=========================================================================
// Cube Shell Factory
//=========================================================================
//
// Ready-made scene factory that builds box-shaped rooms from registered
// blueprints.
//
// Layout of a built room (room space, floor at y = 0):
//   walls[0..6]   interior  Front, Back, Left, Right, Top, Bottom
//   walls[6..12]  exterior  same order
//   anchor "Spawn" at (0, 0.1, 0), also the default anchor
//   optional portal per interior face
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashMap, HashSet};

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::{GeometryHandle, NodeId, Portal, Room, Wall};
use crate::core::collaborators::{SceneFactory, SpawnedRoom, WallRenderer};
use crate::core::config::{RotationConfig, WallVisualConfig};
use crate::core::error::FactoryError;
use crate::core::geometry::{Face, Pose};
use crate::core::visibility::WallVisual;

//=== Constants ===========================================================

pub const SPAWN_ANCHOR: &str = "Spawn";

const SPAWN_HEIGHT: f32 = 0.1;

//=== Blueprint ===========================================================

/// Portal settings shared by every generated portal of a blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalDefaults {
    pub target_room_index: isize,
    pub spawn_name: String,
    pub requires_interaction: bool,
}

impl Default for PortalDefaults {
    fn default() -> Self {
        Self {
            target_room_index: 0,
            spawn_name: SPAWN_ANCHOR.to_string(),
            requires_interaction: false,
        }
    }
}

/// Shape and behaviour of a cube room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomBlueprint {
    pub size: Vec3,
    /// Attach a fade actor to every wall.
    pub wall_visuals: bool,
    /// Generate one portal per interior face.
    pub portals: Option<PortalDefaults>,
    pub rotation: RotationConfig,
    pub visual: WallVisualConfig,
}

impl Default for RoomBlueprint {
    fn default() -> Self {
        Self {
            size: Vec3::new(6.0, 3.0, 6.0),
            wall_visuals: true,
            portals: None,
            rotation: RotationConfig::default(),
            visual: WallVisualConfig::default(),
        }
    }
}

impl RoomBlueprint {
    pub fn with_size(mut self, size: Vec3) -> Self {
        self.size = size;
        self
    }

    pub fn with_portals(mut self, defaults: PortalDefaults) -> Self {
        self.portals = Some(defaults);
        self
    }

    pub fn with_rotation(mut self, rotation: RotationConfig) -> Self {
        self.rotation = rotation;
        self
    }

    fn validate(&self) -> Result<(), FactoryError> {
        let size = self.size;
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(FactoryError::InvalidBlueprint(format!(
                "room size must be positive, got {:?}",
                size
            )));
        }
        if self.rotation.duration < 0.0 {
            return Err(FactoryError::InvalidBlueprint(
                "rotation duration must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Room-space centre of `face`.
    pub fn face_center(&self, face: Face) -> Vec3 {
        let half = self.size * 0.5;
        match face {
            Face::Front => Vec3::new(0.0, half.y, half.z),
            Face::Back => Vec3::new(0.0, half.y, -half.z),
            Face::Left => Vec3::new(-half.x, half.y, 0.0),
            Face::Right => Vec3::new(half.x, half.y, 0.0),
            Face::Top => Vec3::new(0.0, self.size.y, 0.0),
            Face::Bottom => Vec3::ZERO,
        }
    }
}

//=== CubeShellFactory ====================================================

/// Builds a renderer for a freshly created wall, given its face and
/// whether it is an interior surface.
pub type RendererSource = Box<dyn FnMut(Face, bool) -> Box<dyn WallRenderer>>;

#[derive(Default)]
pub struct CubeShellFactory {
    blueprints: HashMap<GeometryHandle, RoomBlueprint>,
    renderers: Option<RendererSource>,
    live: HashSet<NodeId>,
    next_node: u64,
}

impl CubeShellFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blueprint(mut self, handle: GeometryHandle, blueprint: RoomBlueprint) -> Self {
        self.register(handle, blueprint);
        self
    }

    pub fn with_renderer_source(mut self, source: RendererSource) -> Self {
        self.renderers = Some(source);
        self
    }

    pub fn register(&mut self, handle: GeometryHandle, blueprint: RoomBlueprint) {
        debug!("Registered room blueprint '{}'", handle);
        self.blueprints.insert(handle, blueprint);
    }

    /// Number of instances spawned and not yet destroyed.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, node: NodeId) -> bool {
        self.live.contains(&node)
    }

    /// Builds a room record from `blueprint` without spawning a node.
    pub fn build(&mut self, blueprint: &RoomBlueprint) -> Result<Room, FactoryError> {
        blueprint.validate()?;

        let mut room = Room::new(blueprint.rotation.clone())
            .with_anchor(SPAWN_ANCHOR, Pose::at(Vec3::new(0.0, SPAWN_HEIGHT, 0.0)))
            .with_default_anchor(SPAWN_ANCHOR);

        for interior in [true, false] {
            for face in Face::ALL {
                let mut wall = Wall::new(face, interior, blueprint.face_center(face));
                if blueprint.wall_visuals {
                    wall = wall.with_visual(self.make_visual(blueprint, face, interior));
                }
                room = room.with_wall(wall);
            }
        }

        if let Some(defaults) = &blueprint.portals {
            for face in Face::ALL {
                let mut portal = Portal::new(defaults.target_room_index, defaults.spawn_name.clone())
                    .with_interaction(defaults.requires_interaction);
                portal.face = Some(face);
                room = room.with_portal(portal);
            }
        }

        Ok(room)
    }

    fn make_visual(&mut self, blueprint: &RoomBlueprint, face: Face, interior: bool) -> WallVisual {
        match self.renderers.as_mut() {
            Some(source) => WallVisual::with_renderer(blueprint.visual.clone(), source(face, interior)),
            None => WallVisual::new(blueprint.visual.clone()),
        }
    }
}

impl SceneFactory for CubeShellFactory {
    fn instantiate(
        &mut self,
        geometry: &GeometryHandle,
        container: NodeId,
    ) -> Result<SpawnedRoom, FactoryError> {
        let blueprint = self
            .blueprints
            .get(geometry)
            .cloned()
            .ok_or_else(|| FactoryError::UnknownGeometry(geometry.to_string()))?;

        let room = self.build(&blueprint)?;

        self.next_node += 1;
        let node = NodeId(self.next_node);
        self.live.insert(node);

        debug!("Spawned '{}' as {:?} under {:?}", geometry, node, container);
        Ok(SpawnedRoom {
            node,
            room: Some(room),
        })
    }

    fn destroy(&mut self, node: NodeId, room: Room) {
        if !self.live.remove(&node) {
            debug!("Destroy requested for unknown node {:?}", node);
        }
        debug!("Destroyed room {:?} ({} walls)", node, room.walls().len());
    }
}

//=== Tests ===============================================================

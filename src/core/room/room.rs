//=========================================================================
// Room
//=========================================================================
//
// A live room instance: its walls, spawn anchors, portals, gravity and
// the quarter-turn rotation that reorients the cube.
//
// Rotation flow:
//   rotate_by(axis) ──> tween armed (single-flight)
//   advance_rotation(dt) each tick ──> smooth-step slerp
//   duration elapsed ──> snap to target, report finished
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use glam::{Quat, Vec3};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::{Portal, Wall, WallId};
use crate::core::collaborators::GravitySink;
use crate::core::config::RotationConfig;
use crate::core::geometry::{floor_face, smooth_step, Face, Pose};

//=== RotationAxis ========================================================

/// The six axes a room can be turned about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationAxis {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl RotationAxis {
    /// Axes in index order: right, left, up, down, forward, back.
    pub const ALL: [RotationAxis; 6] = [
        RotationAxis::PosX,
        RotationAxis::NegX,
        RotationAxis::PosY,
        RotationAxis::NegY,
        RotationAxis::PosZ,
        RotationAxis::NegZ,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn vector(self) -> Vec3 {
        match self {
            RotationAxis::PosX => Vec3::X,
            RotationAxis::NegX => Vec3::NEG_X,
            RotationAxis::PosY => Vec3::Y,
            RotationAxis::NegY => Vec3::NEG_Y,
            RotationAxis::PosZ => Vec3::Z,
            RotationAxis::NegZ => Vec3::NEG_Z,
        }
    }

    /// Quarter turn about this axis.
    pub fn quarter_turn(self) -> Quat {
        Quat::from_axis_angle(self.vector(), std::f32::consts::FRAC_PI_2)
    }
}

//=== RotationTween =======================================================

#[derive(Debug, Clone, Copy)]
struct RotationTween {
    start: Quat,
    target: Quat,
    elapsed: f32,
}

//=== Room ================================================================

pub struct Room {
    pose: Pose,
    walls: Vec<Wall>,
    anchors: HashMap<String, Pose>,
    default_anchor: Option<String>,
    portals: Vec<Portal>,
    gravity: Vec3,
    config: RotationConfig,
    tween: Option<RotationTween>,
    floor: Face,
    initialized: bool,
    active: bool,
}

impl Room {
    //--- Construction -----------------------------------------------------

    pub fn new(config: RotationConfig) -> Self {
        Self {
            pose: Pose::IDENTITY,
            walls: Vec::new(),
            anchors: HashMap::new(),
            default_anchor: None,
            portals: Vec::new(),
            gravity: Vec3::NEG_Y,
            config,
            tween: None,
            floor: Face::Bottom,
            initialized: false,
            active: false,
        }
    }

    /// A bare room record with no geometry.
    pub fn empty() -> Self {
        Self::new(RotationConfig::default())
    }

    pub fn with_wall(mut self, wall: Wall) -> Self {
        self.walls.push(wall);
        self
    }

    /// Adds a named anchor in room space.
    pub fn with_anchor(mut self, name: impl Into<String>, pose: Pose) -> Self {
        self.anchors.insert(name.into(), pose);
        self
    }

    /// Marks an anchor as the fallback spawn.
    pub fn with_default_anchor(mut self, name: impl Into<String>) -> Self {
        self.default_anchor = Some(name.into());
        self
    }

    pub fn with_portal(mut self, portal: Portal) -> Self {
        self.portals.push(portal);
        self
    }

    //--- Lifecycle --------------------------------------------------------

    /// Assigns wall handles in list order and resolves the initial floor.
    pub fn initialize(&mut self) {
        for (index, wall) in self.walls.iter_mut().enumerate() {
            wall.set_id(WallId(index));
        }
        self.floor = floor_face(self.pose.rotation);
        self.initialized = true;
        debug!("Room initialized with {} walls", self.walls.len());
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    //--- Pose -------------------------------------------------------------

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.pose = pose;
    }

    pub fn orientation(&self) -> Quat {
        self.pose.rotation
    }

    //--- Walls ------------------------------------------------------------

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn walls_mut(&mut self) -> &mut [Wall] {
        &mut self.walls
    }

    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.get(id.index())
    }

    pub fn wall_mut(&mut self, id: WallId) -> Option<&mut Wall> {
        self.walls.get_mut(id.index())
    }

    /// Steps every wall visual's fade smoothing.
    pub fn update_visuals(&mut self, dt: f32) {
        for wall in &mut self.walls {
            if let Some(visual) = wall.visual_mut() {
                visual.update(dt);
            }
        }
    }

    //--- Anchors & Portals ------------------------------------------------

    /// World pose of a named anchor.
    pub fn anchor(&self, name: &str) -> Option<Pose> {
        self.anchors.get(name).map(|local| self.to_world(*local))
    }

    pub fn default_anchor(&self) -> Option<Pose> {
        self.default_anchor
            .as_deref()
            .and_then(|name| self.anchor(name))
    }

    /// Named anchor, falling back to the default anchor.
    pub fn spawn_pose(&self, name: &str) -> Option<Pose> {
        self.anchor(name).or_else(|| self.default_anchor())
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    fn to_world(&self, local: Pose) -> Pose {
        Pose::new(
            self.pose.transform_point(local.position),
            self.pose.rotation * local.rotation,
        )
    }

    //--- Gravity ----------------------------------------------------------

    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    pub fn gravity_strength(&self) -> f32 {
        self.config.gravity_strength
    }

    /// Sets the gravity direction and publishes it to physics.
    ///
    /// Zero vectors are ignored.
    pub fn set_gravity(&mut self, direction: Vec3, physics: &mut dyn GravitySink) {
        if direction.length_squared() <= f32::EPSILON {
            return;
        }

        self.gravity = direction.normalize();
        physics.set_gravity(self.gravity * self.config.gravity_strength);
    }

    //--- Rotation ---------------------------------------------------------

    pub fn is_rotating(&self) -> bool {
        self.tween.is_some()
    }

    /// Starts a quarter turn about `axis`.
    ///
    /// Returns `false` and does nothing while another turn is running.
    pub fn rotate_by(&mut self, axis: RotationAxis, physics: &mut dyn GravitySink) -> bool {
        if self.tween.is_some() {
            debug!("Rotation {:?} ignored, room is already rotating", axis);
            return false;
        }

        let delta = axis.quarter_turn();
        let target = (delta * self.pose.rotation).normalize();

        if self.config.couple_gravity {
            let rotated = delta * self.gravity;
            self.set_gravity(rotated, physics);
        }

        debug!("Room rotating about {:?}", axis);
        self.tween = Some(RotationTween {
            start: self.pose.rotation,
            target,
            elapsed: 0.0,
        });
        true
    }

    /// Index-based variant of [`Room::rotate_by`].
    pub fn rotate_by_index(&mut self, index: usize, physics: &mut dyn GravitySink) -> bool {
        match RotationAxis::from_index(index) {
            Some(axis) => self.rotate_by(axis, physics),
            None => {
                warn!("Rotation axis index {} is out of range", index);
                false
            }
        }
    }

    /// Advances a running turn. Returns `true` on the tick it completes.
    pub fn advance_rotation(&mut self, dt: f32) -> bool {
        let Some(tween) = self.tween.as_mut() else {
            return false;
        };

        tween.elapsed += dt.max(0.0);

        if tween.elapsed >= self.config.duration {
            self.pose.rotation = tween.target;
            self.tween = None;
            debug!("Room rotation finished");
            return true;
        }

        let t = smooth_step(tween.elapsed / self.config.duration);
        self.pose.rotation = tween.start.slerp(tween.target, t);
        false
    }

    //--- Floor ------------------------------------------------------------

    pub fn apply_floor(&mut self, floor: Face) {
        if self.floor != floor {
            debug!("Room floor is now {:?}", floor);
        }
        self.floor = floor;
    }

    pub fn floor(&self) -> Face {
        self.floor
    }

    pub fn ceiling(&self) -> Face {
        self.floor.opposite()
    }
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Room")
            .field("pose", &self.pose)
            .field("walls", &self.walls.len())
            .field("anchors", &self.anchors.len())
            .field("portals", &self.portals.len())
            .field("gravity", &self.gravity)
            .field("rotating", &self.is_rotating())
            .field("floor", &self.floor)
            .finish()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collaborators::GravityField;

    fn rotating_room(couple_gravity: bool) -> Room {
        let mut room = Room::new(RotationConfig {
            duration: 0.25,
            gravity_strength: 9.8,
            couple_gravity,
        });
        room.initialize();
        room
    }

    fn run_rotation(room: &mut Room, dt: f32) -> usize {
        let mut ticks = 0;
        while !room.advance_rotation(dt) {
            ticks += 1;
            assert!(ticks < 1000, "rotation never finished");
        }
        ticks + 1
    }

    //--- RotationAxis Tests ----------------------------------------------

    #[test]
    fn axis_indices_follow_authoring_order() {
        assert_eq!(RotationAxis::from_index(0), Some(RotationAxis::PosX));
        assert_eq!(RotationAxis::from_index(3), Some(RotationAxis::NegY));
        assert_eq!(RotationAxis::from_index(5), Some(RotationAxis::NegZ));
        assert_eq!(RotationAxis::from_index(6), None);
    }

    //--- Rotation Tests --------------------------------------------------

    #[test]
    fn rotation_snaps_exactly_to_target() {
        let mut room = rotating_room(false);
        let mut physics = GravityField::default();
        let expected = RotationAxis::PosX.quarter_turn().normalize();

        assert!(room.rotate_by(RotationAxis::PosX, &mut physics));
        assert!(room.is_rotating());

        run_rotation(&mut room, 1.0 / 60.0);

        assert!(!room.is_rotating());
        assert_eq!(room.orientation(), expected);
    }

    #[test]
    fn second_rotation_mid_flight_is_ignored() {
        let mut room = rotating_room(false);
        let mut physics = GravityField::default();

        assert!(room.rotate_by(RotationAxis::PosY, &mut physics));
        room.advance_rotation(0.1);
        assert!(!room.rotate_by(RotationAxis::PosX, &mut physics));

        run_rotation(&mut room, 0.1);
        assert_eq!(room.orientation(), RotationAxis::PosY.quarter_turn().normalize());
    }

    #[test]
    fn rotation_takes_the_configured_duration() {
        let mut room = rotating_room(false);
        let mut physics = GravityField::default();
        room.rotate_by(RotationAxis::NegZ, &mut physics);

        assert_eq!(run_rotation(&mut room, 0.0625), 4);
    }

    #[test]
    fn interpolation_stays_between_start_and_target() {
        let mut room = rotating_room(false);
        let mut physics = GravityField::default();
        let target = RotationAxis::PosX.quarter_turn();
        room.rotate_by(RotationAxis::PosX, &mut physics);

        let mut last_angle = 0.0;
        while !room.advance_rotation(0.02) {
            let angle = room.orientation().angle_between(Quat::IDENTITY);
            assert!(angle >= last_angle - 1e-5);
            assert!(angle <= target.angle_between(Quat::IDENTITY) + 1e-5);
            last_angle = angle;
        }
    }

    #[test]
    fn rotations_compose_after_completion() {
        let mut room = rotating_room(false);
        let mut physics = GravityField::default();

        room.rotate_by(RotationAxis::PosX, &mut physics);
        run_rotation(&mut room, 0.1);
        room.rotate_by(RotationAxis::PosX, &mut physics);
        run_rotation(&mut room, 0.1);

        // Two quarter turns about X put the ceiling on the floor.
        assert_eq!(floor_face(room.orientation()), Face::Top);
    }

    #[test]
    fn bad_axis_index_is_rejected() {
        let mut room = rotating_room(false);
        let mut physics = GravityField::default();
        assert!(!room.rotate_by_index(9, &mut physics));
        assert!(!room.is_rotating());
    }

    //--- Gravity Tests ---------------------------------------------------

    #[test]
    fn uncoupled_rotation_leaves_gravity_alone() {
        let mut room = rotating_room(false);
        let mut physics = GravityField {
            gravity: Vec3::new(0.0, -1.0, 0.0),
        };
        room.rotate_by(RotationAxis::PosX, &mut physics);

        assert_eq!(room.gravity(), Vec3::NEG_Y);
        assert_eq!(physics.gravity, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn coupled_rotation_turns_gravity_and_publishes_it() {
        let mut room = rotating_room(true);
        let mut physics = GravityField::default();
        room.rotate_by(RotationAxis::PosX, &mut physics);

        // +90° about X maps -Y onto -Z.
        let gravity = room.gravity();
        assert!((gravity - Vec3::NEG_Z).length() < 1e-5);
        assert!((gravity.length() - 1.0).abs() < 1e-5);
        assert!((physics.gravity - Vec3::NEG_Z * 9.8).length() < 1e-4);
    }

    #[test]
    fn zero_gravity_is_ignored() {
        let mut room = rotating_room(false);
        let mut physics = GravityField::default();
        room.set_gravity(Vec3::ZERO, &mut physics);
        assert_eq!(room.gravity(), Vec3::NEG_Y);
    }

    //--- Anchor Tests ----------------------------------------------------

    #[test]
    fn spawn_falls_back_to_default_anchor() {
        let spawn = Pose::at(Vec3::new(0.0, 0.1, 0.0));
        let room = Room::empty()
            .with_anchor("Spawn", spawn)
            .with_default_anchor("Spawn");

        assert_eq!(room.spawn_pose("Spawn"), Some(spawn));
        assert_eq!(room.spawn_pose("Balcony"), Some(spawn));
    }

    #[test]
    fn spawn_without_any_anchor_is_none() {
        let room = Room::empty();
        assert_eq!(room.spawn_pose("Spawn"), None);
    }

    #[test]
    fn anchors_follow_the_room_pose() {
        let mut room = Room::empty().with_anchor("Door", Pose::at(Vec3::new(1.0, 0.0, 0.0)));
        room.set_pose(Pose::at(Vec3::new(10.0, 0.0, 0.0)));
        assert_eq!(room.anchor("Door").unwrap().position, Vec3::new(11.0, 0.0, 0.0));
    }

    //--- Lifecycle Tests -------------------------------------------------

    #[test]
    fn initialize_assigns_wall_ids_in_order() {
        let mut room = Room::empty()
            .with_wall(Wall::new(Face::Front, true, Vec3::ZERO))
            .with_wall(Wall::new(Face::Back, true, Vec3::ZERO));
        room.initialize();
        room.activate();

        assert!(room.is_initialized());
        assert!(room.is_active());
        assert_eq!(room.walls()[1].id(), WallId(1));
        assert_eq!(room.wall(WallId(0)).unwrap().face(), Face::Front);
    }

    #[test]
    fn ceiling_is_opposite_of_applied_floor() {
        let mut room = Room::empty();
        room.apply_floor(Face::Left);
        assert_eq!(room.floor(), Face::Left);
        assert_eq!(room.ceiling(), Face::Right);
    }
}

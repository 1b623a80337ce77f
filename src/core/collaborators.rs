//=========================================================================
// Collaborators
//=========================================================================
//
// Seams to the systems the room core drives but does not own: geometry
// instantiation, the transition wipe, inventory, the player rig, physics
// gravity and wall renderers.
//
// A few small in-memory implementations live here as well. They are
// complete enough for headless hosts and are what the tests run against.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use glam::Vec3;
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::error::FactoryError;
use crate::core::geometry::Pose;
use crate::core::room::{GeometryHandle, NodeId, Room};

//=== Scene Factory =======================================================

/// Result of instantiating a room's geometry.
pub struct SpawnedRoom {
    /// Scene node of the new instance.
    pub node: NodeId,
    /// Room record built by the factory, if it attached one.
    pub room: Option<Room>,
}

/// Builds and tears down room geometry. Both calls complete synchronously.
pub trait SceneFactory {
    fn instantiate(
        &mut self,
        geometry: &GeometryHandle,
        container: NodeId,
    ) -> Result<SpawnedRoom, FactoryError>;

    /// Tears down the instance spawned as `node`.
    fn destroy(&mut self, node: NodeId, room: Room);
}

//=== Transition Effect ===================================================

/// Progress reported by [`TransitionEffect::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectStep {
    Running,
    /// The screen is covered; the room swap runs now.
    Midpoint,
    Complete,
}

/// A visual wipe bracketing a room swap.
///
/// The manager calls `begin` once, then `advance` every tick until it
/// reports `Complete`. `Midpoint` should be reported at most once; if an
/// effect completes without ever reporting it the swap runs on completion.
pub trait TransitionEffect {
    fn begin(&mut self);
    fn advance(&mut self, dt: f32) -> EffectStep;
}

/// Cover, swap, reveal. Each phase lasts a fixed time.
#[derive(Debug, Clone)]
pub struct TimedWipe {
    cover: f32,
    reveal: f32,
    elapsed: f32,
    midpoint_sent: bool,
}

impl TimedWipe {
    pub fn new(cover: f32, reveal: f32) -> Self {
        Self {
            cover: cover.max(0.0),
            reveal: reveal.max(0.0),
            elapsed: 0.0,
            midpoint_sent: false,
        }
    }

    /// Screen coverage in [0, 1].
    pub fn coverage(&self) -> f32 {
        if self.elapsed < self.cover {
            return if self.cover > 0.0 { self.elapsed / self.cover } else { 1.0 };
        }
        let into_reveal = self.elapsed - self.cover;
        if self.reveal <= 0.0 {
            return 0.0;
        }
        (1.0 - into_reveal / self.reveal).clamp(0.0, 1.0)
    }
}

impl TransitionEffect for TimedWipe {
    fn begin(&mut self) {
        self.elapsed = 0.0;
        self.midpoint_sent = false;
    }

    fn advance(&mut self, dt: f32) -> EffectStep {
        self.elapsed += dt.max(0.0);

        if !self.midpoint_sent {
            if self.elapsed >= self.cover {
                self.midpoint_sent = true;
                return EffectStep::Midpoint;
            }
            return EffectStep::Running;
        }

        if self.elapsed >= self.cover + self.reveal {
            EffectStep::Complete
        } else {
            EffectStep::Running
        }
    }
}

//=== Inventory ===========================================================

pub trait Inventory {
    fn has(&self, item: &str) -> bool;
    fn add(&mut self, item: &str);
}

/// Set-backed inventory.
#[derive(Debug, Default, Clone)]
pub struct MemoryInventory {
    items: HashSet<String>,
}

impl MemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Inventory for MemoryInventory {
    fn has(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    fn add(&mut self, item: &str) {
        if self.items.insert(item.to_string()) {
            debug!("Inventory gained '{}'", item);
        }
    }
}

//=== Player Root =========================================================

/// The transform that gets teleported to a room's spawn anchor.
pub trait PlayerRoot {
    fn pose(&self) -> Pose;
    fn teleport(&mut self, pose: Pose);
}

/// Plain player transform.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerRig {
    pub pose: Pose,
}

impl PlayerRoot for PlayerRig {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn teleport(&mut self, pose: Pose) {
        self.pose = pose;
    }
}

//=== Physics Gravity =====================================================

/// Receives the world gravity vector whenever a room rotation changes it.
pub trait GravitySink {
    fn set_gravity(&mut self, gravity: Vec3);
}

/// Stores the last gravity it was given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub gravity: Vec3,
}

impl Default for GravityField {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.8, 0.0),
        }
    }
}

impl GravitySink for GravityField {
    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }
}

//=== Wall Renderer =======================================================

/// Render-side state of one wall's renderers.
pub trait WallRenderer {
    /// Writes the fade shader parameter.
    fn set_fade(&mut self, fade: f32);
    fn set_enabled(&mut self, enabled: bool);
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- TimedWipe Tests -------------------------------------------------

    #[test]
    fn wipe_reports_midpoint_once_then_completes() {
        let mut wipe = TimedWipe::new(0.5, 0.5);
        wipe.begin();

        assert_eq!(wipe.advance(0.25), EffectStep::Running);
        assert_eq!(wipe.advance(0.25), EffectStep::Midpoint);
        assert_eq!(wipe.advance(0.25), EffectStep::Running);
        assert_eq!(wipe.advance(0.25), EffectStep::Complete);
    }

    #[test]
    fn zero_length_wipe_hits_midpoint_immediately() {
        let mut wipe = TimedWipe::new(0.0, 0.0);
        wipe.begin();
        assert_eq!(wipe.advance(0.0), EffectStep::Midpoint);
        assert_eq!(wipe.advance(0.0), EffectStep::Complete);
    }

    #[test]
    fn wipe_coverage_rises_then_falls() {
        let mut wipe = TimedWipe::new(1.0, 1.0);
        wipe.begin();
        wipe.advance(0.5);
        assert!((wipe.coverage() - 0.5).abs() < 1e-6);
        wipe.advance(0.5);
        assert!((wipe.coverage() - 1.0).abs() < 1e-6);
        wipe.advance(0.5);
        assert!((wipe.coverage() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn begin_rearms_the_wipe() {
        let mut wipe = TimedWipe::new(0.25, 0.25);
        wipe.begin();
        wipe.advance(0.25);
        wipe.advance(0.25);

        wipe.begin();
        assert_eq!(wipe.advance(0.25), EffectStep::Midpoint);
    }

    //--- Inventory Tests -------------------------------------------------

    #[test]
    fn inventory_add_and_has() {
        let mut inventory = MemoryInventory::new();
        assert!(!inventory.has("brass_key"));

        inventory.add("brass_key");
        inventory.add("brass_key");

        assert!(inventory.has("brass_key"));
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn inventory_seeded_with_items() {
        let inventory = MemoryInventory::with_items(["lens", "fuse"]);
        assert!(inventory.has("lens"));
        assert!(inventory.has("fuse"));
        assert!(!inventory.is_empty());
    }

    //--- PlayerRig Tests -------------------------------------------------

    #[test]
    fn player_rig_teleports() {
        let mut rig = PlayerRig::default();
        let target = Pose::at(Vec3::new(1.0, 2.0, 3.0));
        rig.teleport(target);
        assert_eq!(rig.pose(), target);
    }
}

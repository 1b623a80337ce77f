//=========================================================================
// Wall Visibility Controller
//=========================================================================
//
// Per-tick policy that turns camera geometry into fade targets.
//
// Inside mode, per interior wall:
//   raw dot = surface normal · unit(camera - wall)
//   deadzone ──> exponential low-pass ──> inverse lerp(hide, show)
//   ──> optional smooth step ──> send if moved >= min_target_change,
//   or if it just settled at 0 or 1
//
// Inspect mode: fixed targets, sent every tick without thresholds.
//
// Filter state lives in a side table indexed by `WallId` and is dropped
// wholesale whenever the room, its orientation or the mode changes.
//
//=========================================================================

//=== External Dependencies ===============================================

use glam::Vec3;
use log::debug;

//=== Internal Dependencies ===============================================

use super::ViewMode;
use crate::core::config::VisibilityConfig;
use crate::core::events::{RoomEvent, Subscription};
use crate::core::geometry::{exp_smoothing_factor, inverse_lerp, lerp, smooth_step};
use crate::core::room::{Room, Wall, WallId};

//=== Constants ===========================================================

/// Camera closer than this to a wall centre looks along +Z.
const MIN_CAMERA_DISTANCE: f32 = 0.0001;

//=== FilterState =========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
struct FilterState {
    filtered_dot: f32,
    last_sent: Option<f32>,
}

//=== WallVisibilityController ============================================

/// Turns camera position into per-wall fade targets every tick.
pub struct WallVisibilityController {
    config: VisibilityConfig,
    mode: ViewMode,
    states: Vec<Option<FilterState>>,
    events: Option<Subscription<RoomEvent>>,
}

impl WallVisibilityController {
    /// Creates an Inside-mode controller with no filter state.
    pub fn new(config: VisibilityConfig) -> Self {
        Self {
            config,
            mode: ViewMode::Inside,
            states: Vec::new(),
            events: None,
        }
    }

    /// Attaches the room event feed that drives filter resets.
    pub fn with_events(mut self, events: Subscription<RoomEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Active tuning.
    pub fn config(&self) -> &VisibilityConfig {
        &self.config
    }

    /// Current view mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switches view mode without touching filter state.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            debug!("Visibility mode {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Forgets every wall's filter state.
    pub fn reset(&mut self) {
        self.states.clear();
    }

    //--- Events -----------------------------------------------------------

    /// Consumes queued room events.
    ///
    /// Room loads, finished rotations and inspect toggles reset the filter
    /// state and re-apply targets right away. Returns whether anything was
    /// re-applied.
    pub fn process_events(&mut self, room: Option<&mut Room>, camera: Option<Vec3>) -> bool {
        let Some(events) = self.events.as_ref() else {
            return false;
        };

        let mut refresh = false;
        let mut mode = self.mode;
        for event in events.drain() {
            match event {
                RoomEvent::Loaded(_) | RoomEvent::RotationFinished => refresh = true,
                RoomEvent::InspectEntered => {
                    mode = ViewMode::Inspect;
                    refresh = true;
                }
                RoomEvent::InspectExited => {
                    mode = ViewMode::Inside;
                    refresh = true;
                }
                RoomEvent::Loading(_) | RoomEvent::Blocked(_) => {}
            }
        }

        if !refresh {
            return false;
        }

        self.set_mode(mode);
        self.reset();
        debug!("Visibility filter state reset");
        self.update(room, camera, 0.0);
        true
    }

    //--- Update Loop ------------------------------------------------------

    /// Computes and forwards fade targets for every wall of `room`.
    ///
    /// Does nothing without a room. Inside mode also needs a camera.
    pub fn update(&mut self, room: Option<&mut Room>, camera: Option<Vec3>, dt: f32) {
        let Some(room) = room else {
            return;
        };

        if self.states.len() < room.walls().len() {
            self.states.resize(room.walls().len(), None);
        }

        match self.mode {
            ViewMode::Inspect => self.apply_inspect(room),
            ViewMode::Inside => {
                if let Some(camera) = camera {
                    self.apply_inside(room, camera, dt);
                }
            }
        }
    }

    fn apply_inspect(&mut self, room: &mut Room) {
        let exterior_only = self.config.inspect_shows_exterior_only;

        for wall in room.walls_mut() {
            let visible = !exterior_only || !wall.is_interior();
            self.send_bypass(wall, if visible { 1.0 } else { 0.0 });
        }
    }

    fn apply_inside(&mut self, room: &mut Room, camera: Vec3, dt: f32) {
        let k = exp_smoothing_factor(self.config.dot_filter_sharpness, dt);
        let pose = room.pose();

        for wall in room.walls_mut() {
            if !wall.is_interior() {
                self.send_bypass(wall, 0.0);
                continue;
            }

            let normal = pose.transform_direction(wall.surface_normal());
            let to_camera = camera - pose.transform_point(wall.center());
            let length = to_camera.length();
            let to_camera = if length > MIN_CAMERA_DISTANCE {
                to_camera / length
            } else {
                Vec3::Z
            };
            let mut raw = normal.dot(to_camera).clamp(-1.0, 1.0);

            let index = wall.id().index();
            let state = self.states[index].get_or_insert(FilterState {
                filtered_dot: raw,
                last_sent: None,
            });

            let Some(visual) = wall.visual_mut() else {
                continue;
            };

            if (raw - state.filtered_dot).abs() < self.config.dot_deadzone {
                raw = state.filtered_dot;
            }
            state.filtered_dot = lerp(state.filtered_dot, raw, k);

            let fade = fade_for_dot(&self.config, state.filtered_dot);
            // Settled ends are always forwarded so targets can reach 0 and 1.
            let settled = fade == 0.0 || fade == 1.0;
            let changed = state.last_sent.map_or(true, |last| {
                (fade - last).abs() >= self.config.min_target_change || (settled && fade != last)
            });

            if changed {
                visual.set_fade_target(fade);
                state.last_sent = Some(fade);
            }
        }
    }

    fn send_bypass(&mut self, wall: &mut Wall, fade: f32) {
        let index = wall.id().index();
        let state = self.states[index].get_or_insert(FilterState {
            filtered_dot: 0.0,
            last_sent: None,
        });

        if let Some(visual) = wall.visual_mut() {
            visual.set_fade_target(fade);
            state.last_sent = Some(fade);
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Low-passed dot of a wall, once it has been seen.
    pub fn filtered_dot(&self, wall: WallId) -> Option<f32> {
        self.state(wall).map(|state| state.filtered_dot)
    }

    /// Fade target most recently forwarded to a wall.
    pub fn last_sent(&self, wall: WallId) -> Option<f32> {
        self.state(wall).and_then(|state| state.last_sent)
    }

    fn state(&self, wall: WallId) -> Option<&FilterState> {
        self.states.get(wall.index()).and_then(Option::as_ref)
    }
}

/// Maps a filtered dot onto a fade in [0, 1].
fn fade_for_dot(config: &VisibilityConfig, dot: f32) -> f32 {
    let fade = inverse_lerp(config.hide_dot, config.show_dot, dot).clamp(0.0, 1.0);
    if config.smooth_fade_curve {
        smooth_step(fade)
    } else {
        fade
    }
}

impl std::fmt::Debug for WallVisibilityController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WallVisibilityController")
            .field("mode", &self.mode)
            .field("tracked", &self.states.iter().flatten().count())
            .field("subscribed", &self.events.is_some())
            .finish()
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::{EventHub, LoadedRoom};
    use crate::core::geometry::Face;
    use crate::core::room::{CubeShellFactory, NodeId, RoomBlueprint};

    const DT: f32 = 1.0 / 60.0;
    const CENTER: Vec3 = Vec3::new(0.0, 1.5, 0.0);

    fn cube_room() -> Room {
        let mut room = CubeShellFactory::new()
            .build(&RoomBlueprint::default())
            .unwrap();
        room.initialize();
        room
    }

    fn target_of(room: &Room, face: Face, interior: bool) -> f32 {
        room.walls()
            .iter()
            .find(|w| w.face() == face && w.is_interior() == interior)
            .and_then(|w| w.visual())
            .map(|v| v.target())
            .unwrap()
    }

    fn wall_id(room: &Room, face: Face, interior: bool) -> WallId {
        room.walls()
            .iter()
            .find(|w| w.face() == face && w.is_interior() == interior)
            .map(|w| w.id())
            .unwrap()
    }

    fn loaded() -> RoomEvent {
        RoomEvent::Loaded(LoadedRoom {
            index: 0,
            name: "hall".into(),
            node: NodeId(1),
            wall_count: 12,
        })
    }

    //--- Inside Mode Tests -----------------------------------------------

    #[test]
    fn camera_at_centre_shows_every_interior_wall() {
        let mut room = cube_room();
        let mut controller = WallVisibilityController::new(VisibilityConfig::default());

        controller.update(Some(&mut room), Some(CENTER), DT);

        for face in Face::ALL {
            assert_eq!(target_of(&room, face, true), 1.0, "{:?}", face);
            assert_eq!(target_of(&room, face, false), 0.0, "{:?}", face);
        }
    }

    #[test]
    fn camera_outside_front_hides_front_and_shows_back() {
        let mut room = cube_room();
        let mut controller = WallVisibilityController::new(VisibilityConfig::default());

        controller.update(Some(&mut room), Some(Vec3::new(0.0, 1.5, 20.0)), DT);

        assert_eq!(target_of(&room, Face::Front, true), 0.0);
        assert_eq!(target_of(&room, Face::Back, true), 1.0);
    }

    #[test]
    fn small_dot_changes_are_filtered_out() {
        let mut room = cube_room();
        let mut controller = WallVisibilityController::new(VisibilityConfig::default());
        let left = WallId(2);

        controller.update(Some(&mut room), Some(Vec3::new(0.0, 1.5, 20.0)), DT);
        let first = controller.filtered_dot(left).unwrap();

        // Nudging the camera a hair moves the raw dot less than the deadzone.
        controller.update(Some(&mut room), Some(Vec3::new(0.0, 1.5, 20.01)), DT);
        assert_eq!(controller.filtered_dot(left), Some(first));
    }

    #[test]
    fn inside_mode_without_camera_is_a_no_op() {
        let mut room = cube_room();
        let mut controller = WallVisibilityController::new(VisibilityConfig::default());

        controller.update(Some(&mut room), None, DT);
        assert_eq!(controller.last_sent(WallId(0)), None);
        assert_eq!(target_of(&room, Face::Front, false), 1.0);
    }

    #[test]
    fn no_room_is_a_no_op() {
        let mut controller = WallVisibilityController::new(VisibilityConfig::default());
        controller.update(None, Some(CENTER), DT);
        assert_eq!(controller.filtered_dot(WallId(0)), None);
    }

    #[test]
    fn rotated_room_uses_world_space_walls() {
        let mut room = cube_room();
        // Half turn about Y swaps the Front and Back walls in world space.
        room.set_pose(crate::core::geometry::Pose::new(
            Vec3::ZERO,
            glam::Quat::from_rotation_y(std::f32::consts::PI),
        ));
        let mut controller = WallVisibilityController::new(VisibilityConfig::default());

        controller.update(Some(&mut room), Some(Vec3::new(0.0, 1.5, 20.0)), DT);

        assert_eq!(target_of(&room, Face::Front, true), 1.0);
        assert_eq!(target_of(&room, Face::Back, true), 0.0);
    }

    #[test]
    fn slow_sweep_settles_targets_at_the_ends() {
        let mut room = cube_room();
        let mut controller = WallVisibilityController::new(VisibilityConfig::default());

        // Walk from just inside the back wall out past the front wall.
        let steps = 600;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let camera = Vec3::new(1.0, 1.5, lerp(-2.9, 20.0, t));
            controller.update(Some(&mut room), Some(camera), DT);
            room.update_visuals(DT);
        }
        for _ in 0..120 {
            controller.update(Some(&mut room), Some(Vec3::new(1.0, 1.5, 20.0)), DT);
            room.update_visuals(DT);
        }

        assert_eq!(target_of(&room, Face::Back, true), 1.0);
        assert_eq!(target_of(&room, Face::Front, true), 0.0);

        let front = wall_id(&room, Face::Front, true);
        let visual = room.wall(front).and_then(|w| w.visual()).unwrap();
        assert_eq!(visual.current(), 0.0);
        assert!(!visual.renderers_enabled());
    }

    #[test]
    fn settled_ends_bypass_min_target_change() {
        let mut room = cube_room();
        let config = VisibilityConfig {
            smooth_fade_curve: false,
            dot_filter_sharpness: 1.0e6,
            dot_deadzone: 0.0,
            min_target_change: 0.5,
            ..VisibilityConfig::default()
        };
        let mut controller = WallVisibilityController::new(config);

        // Back dot ~0.26 and front dot ~-0.01: both partway through the ramp.
        controller.update(Some(&mut room), Some(Vec3::new(1.0, 1.5, -2.73)), DT);
        let back = target_of(&room, Face::Back, true);
        assert!(back > 0.5 && back < 1.0, "{}", back);
        controller.update(Some(&mut room), Some(Vec3::new(1.0, 1.5, 3.01)), DT);
        let front = target_of(&room, Face::Front, true);
        assert!(front > 0.0 && front < 0.5, "{}", front);

        controller.update(Some(&mut room), Some(Vec3::new(0.0, 1.5, 20.0)), DT);
        assert_eq!(target_of(&room, Face::Back, true), 1.0);
        assert_eq!(target_of(&room, Face::Front, true), 0.0);
    }

    #[test]
    fn small_moves_inside_the_ramp_are_held_back() {
        let mut room = cube_room();
        let config = VisibilityConfig {
            smooth_fade_curve: false,
            dot_filter_sharpness: 1.0e6,
            dot_deadzone: 0.0,
            min_target_change: 0.5,
            ..VisibilityConfig::default()
        };
        let mut controller = WallVisibilityController::new(config);
        let back = wall_id(&room, Face::Back, true);

        controller.update(Some(&mut room), Some(Vec3::new(1.0, 1.5, -2.73)), DT);
        let first = controller.last_sent(back).unwrap();

        controller.update(Some(&mut room), Some(Vec3::new(1.0, 1.5, -2.75)), DT);
        assert_eq!(controller.last_sent(back), Some(first));
    }

    //--- Fade Mapping Tests ----------------------------------------------

    #[test]
    fn fade_mapping_is_clamped_and_monotonic() {
        let config = VisibilityConfig::default();
        assert_eq!(fade_for_dot(&config, 0.9), 1.0);
        assert_eq!(fade_for_dot(&config, config.show_dot), 1.0);
        assert_eq!(fade_for_dot(&config, -0.9), 0.0);
        assert_eq!(fade_for_dot(&config, config.hide_dot), 0.0);

        let mut last = 0.0;
        for step in 0..=100 {
            let dot = -1.0 + step as f32 * 0.02;
            let fade = fade_for_dot(&config, dot);
            assert!(fade >= last);
            last = fade;
        }
    }

    //--- Inspect Mode Tests ----------------------------------------------

    #[test]
    fn inspect_shows_exterior_only() {
        let mut room = cube_room();
        let mut controller = WallVisibilityController::new(VisibilityConfig::default());
        controller.set_mode(ViewMode::Inspect);

        controller.update(Some(&mut room), None, DT);

        assert_eq!(target_of(&room, Face::Top, true), 0.0);
        assert_eq!(target_of(&room, Face::Top, false), 1.0);
    }

    #[test]
    fn inspect_can_show_every_wall() {
        let mut room = cube_room();
        let config = VisibilityConfig {
            inspect_shows_exterior_only: false,
            ..VisibilityConfig::default()
        };
        let mut controller = WallVisibilityController::new(config);
        controller.set_mode(ViewMode::Inspect);

        controller.update(Some(&mut room), None, DT);

        assert!(room.walls().iter().all(|w| w.visual().unwrap().target() == 1.0));
    }

    //--- Event Tests -----------------------------------------------------

    #[test]
    fn inspect_events_switch_mode_and_apply_now() {
        let mut hub = EventHub::new();
        let mut room = cube_room();
        let mut controller =
            WallVisibilityController::new(VisibilityConfig::default()).with_events(hub.subscribe());

        hub.emit(RoomEvent::InspectEntered);
        assert!(controller.process_events(Some(&mut room), Some(CENTER)));
        assert_eq!(controller.mode(), ViewMode::Inspect);
        assert_eq!(target_of(&room, Face::Front, true), 0.0);

        hub.emit(RoomEvent::InspectExited);
        controller.process_events(Some(&mut room), Some(CENTER));
        assert_eq!(controller.mode(), ViewMode::Inside);
        assert_eq!(target_of(&room, Face::Front, true), 1.0);
    }

    #[test]
    fn room_load_clears_filter_state() {
        let mut hub = EventHub::new();
        let mut room = cube_room();
        let mut controller =
            WallVisibilityController::new(VisibilityConfig::default()).with_events(hub.subscribe());

        controller.update(Some(&mut room), Some(CENTER), DT);
        assert!(controller.filtered_dot(WallId(0)).is_some());

        hub.emit(loaded());
        assert!(controller.process_events(None, Some(CENTER)));
        assert_eq!(controller.filtered_dot(WallId(0)), None);
    }

    #[test]
    fn rotation_finished_reseeds_from_the_current_camera() {
        let mut hub = EventHub::new();
        let mut room = cube_room();
        let mut controller =
            WallVisibilityController::new(VisibilityConfig::default()).with_events(hub.subscribe());
        let back = wall_id(&room, Face::Back, true);

        // Side-on to the back wall, then one filtered step towards facing it.
        controller.update(Some(&mut room), Some(Vec3::new(20.0, 1.5, -3.0)), DT);
        controller.update(Some(&mut room), Some(Vec3::new(0.0, 1.5, 20.0)), DT);
        let carried = controller.filtered_dot(back).unwrap();
        assert!(carried > 0.0 && carried < 1.0, "{}", carried);

        hub.emit(RoomEvent::RotationFinished);
        assert!(controller.process_events(Some(&mut room), Some(Vec3::new(0.0, 1.5, 20.0))));

        assert_eq!(controller.filtered_dot(back), Some(1.0));
        assert_eq!(controller.last_sent(back), Some(1.0));
        assert_eq!(target_of(&room, Face::Back, true), 1.0);
    }

    #[test]
    fn unrelated_events_do_not_reset() {
        let mut hub = EventHub::new();
        let mut room = cube_room();
        let mut controller =
            WallVisibilityController::new(VisibilityConfig::default()).with_events(hub.subscribe());
        controller.update(Some(&mut room), Some(CENTER), DT);

        hub.emit(RoomEvent::Blocked("Invalid room index".into()));
        assert!(!controller.process_events(Some(&mut room), Some(CENTER)));
        assert!(controller.filtered_dot(WallId(0)).is_some());
    }
}

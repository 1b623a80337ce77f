//=========================================================================
// Wall Visual
//=========================================================================
//
// Smoothing actor that owns one wall's rendered fade.
//
// Per tick:
//   target ──exp smoothing (rise/fall sharpness)──> current
//   current ──apply epsilon──> renderer fade parameter
//   resting at zero for `disable_delay` ──> renderers disabled
//
// The visibility controller only ever sets the target; the current value
// is written here and nowhere else.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::collaborators::WallRenderer;
use crate::core::config::WallVisualConfig;
use crate::core::geometry::{exp_smoothing_factor, lerp};

//=== Constants ===========================================================

/// Values within this distance of the target snap onto it.
const SNAP_EPSILON: f32 = 0.0005;

/// Fades at or below this count as zero for the disable policy.
const ZERO_THRESHOLD: f32 = 0.001;

//=== WallVisual ==========================================================

pub struct WallVisual {
    config: WallVisualConfig,
    renderer: Option<Box<dyn WallRenderer>>,
    current: f32,
    target: f32,
    last_applied: f32,
    zero_timer: f32,
    renderers_enabled: bool,
    apply_count: u64,
}

impl WallVisual {
    //--- Construction -----------------------------------------------------

    /// Creates a fully visible wall and pushes that state once.
    pub fn new(config: WallVisualConfig) -> Self {
        let mut visual = Self {
            config,
            renderer: None,
            current: 1.0,
            target: 1.0,
            last_applied: 1.0,
            zero_timer: 0.0,
            renderers_enabled: true,
            apply_count: 0,
        };
        visual.apply(1.0);
        visual
    }

    pub fn with_renderer(config: WallVisualConfig, renderer: Box<dyn WallRenderer>) -> Self {
        let mut visual = Self::new(config);
        visual.renderer = Some(renderer);
        if let Some(renderer) = visual.renderer.as_mut() {
            renderer.set_enabled(true);
            renderer.set_fade(visual.current);
        }
        visual
    }

    //--- Target Control ---------------------------------------------------

    /// Sets the fade the wall should smoothly move towards.
    ///
    /// A target above zero re-enables disabled renderers right away so the
    /// fade-in starts on the very next step.
    pub fn set_fade_target(&mut self, fade: f32) {
        self.target = fade.clamp(0.0, 1.0);

        if self.config.disable_renderers_at_zero && self.target > ZERO_THRESHOLD {
            self.zero_timer = 0.0;
            self.set_renderers_enabled(true);
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.set_fade_target(if visible { 1.0 } else { 0.0 });
    }

    /// Jumps straight to `fade` without smoothing.
    pub fn set_fade_instant(&mut self, fade: f32) {
        let fade = fade.clamp(0.0, 1.0);
        self.current = fade;
        self.target = fade;
        self.zero_timer = 0.0;

        if self.config.disable_renderers_at_zero {
            self.set_renderers_enabled(fade > ZERO_THRESHOLD);
        }

        self.apply(fade);
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the smoothing by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        let sharpness = if self.target > self.current {
            self.config.fade_in_sharpness
        } else {
            self.config.fade_out_sharpness
        };

        let k = exp_smoothing_factor(sharpness, dt);
        self.current = lerp(self.current, self.target, k);

        if (self.current - self.target).abs() < SNAP_EPSILON {
            self.current = self.target;
        }

        if self.config.disable_renderers_at_zero {
            if self.current <= ZERO_THRESHOLD && self.target <= ZERO_THRESHOLD {
                self.zero_timer += dt;
            } else {
                self.zero_timer = 0.0;
            }
        }

        // The settled value is always pushed, even if the last step was
        // smaller than the apply epsilon.
        let moved = (self.current - self.last_applied).abs() >= self.config.apply_epsilon;
        let settled = self.current == self.target && self.last_applied != self.current;
        if moved || settled {
            // Keep renderers on while the disable grace period is running.
            if self.config.disable_renderers_at_zero
                && self.current <= ZERO_THRESHOLD
                && self.target <= ZERO_THRESHOLD
                && self.zero_timer < self.config.disable_delay
            {
                self.set_renderers_enabled(true);
            }
            self.apply(self.current);
        }

        if self.config.disable_renderers_at_zero && self.zero_timer >= self.config.disable_delay {
            self.set_renderers_enabled(false);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Value most recently written to the renderer.
    pub fn applied(&self) -> f32 {
        self.last_applied
    }

    /// Number of renderer writes so far.
    pub fn apply_count(&self) -> u64 {
        self.apply_count
    }

    pub fn renderers_enabled(&self) -> bool {
        self.renderers_enabled
    }

    /// Seconds spent resting at zero.
    pub fn time_at_zero(&self) -> f32 {
        self.zero_timer
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply(&mut self, fade: f32) {
        self.last_applied = fade;
        self.apply_count += 1;

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_fade(fade);
        }
    }

    fn set_renderers_enabled(&mut self, enabled: bool) {
        if self.renderers_enabled == enabled {
            return;
        }

        debug!("Wall renderers {}", if enabled { "enabled" } else { "disabled" });
        self.renderers_enabled = enabled;

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_enabled(enabled);
        }
    }
}

impl std::fmt::Debug for WallVisual {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WallVisual")
            .field("current", &self.current)
            .field("target", &self.target)
            .field("last_applied", &self.last_applied)
            .field("zero_timer", &self.zero_timer)
            .field("renderers_enabled", &self.renderers_enabled)
            .finish()
    }
}

//=== Tests ===============================================================

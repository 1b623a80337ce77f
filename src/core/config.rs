//=========================================================================
// Configuration
//=========================================================================
//
// Tuning knobs for rotation, visibility and wall fading. All structs have
// defaults and serde derives so hosts can load them from any format.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== VisibilityConfig ====================================================

/// Tuning for the per-frame wall visibility policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Filtered dot at or below this is fully hidden.
    pub hide_dot: f32,
    /// Filtered dot at or above this is fully visible.
    pub show_dot: f32,
    /// Apply smooth-step to the dot → fade curve.
    pub smooth_fade_curve: bool,
    /// Reaction rate of the dot low-pass filter. 10 to 25 is typical.
    pub dot_filter_sharpness: f32,
    /// Raw dot changes smaller than this are ignored.
    pub dot_deadzone: f32,
    /// Fade targets are only forwarded when they move at least this much.
    pub min_target_change: f32,
    /// In Inspect mode show exterior walls and hide interior ones.
    /// When false every wall is shown.
    pub inspect_shows_exterior_only: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            hide_dot: -0.10,
            show_dot: 0.35,
            smooth_fade_curve: true,
            dot_filter_sharpness: 18.0,
            dot_deadzone: 0.015,
            min_target_change: 0.02,
            inspect_shows_exterior_only: true,
        }
    }
}

//=== WallVisualConfig ====================================================

/// Tuning for a wall's fade smoothing actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallVisualConfig {
    pub fade_in_sharpness: f32,
    pub fade_out_sharpness: f32,
    /// Minimum movement before the fade is pushed to the renderer again.
    pub apply_epsilon: f32,
    /// Disable renderers after resting at zero for `disable_delay` seconds.
    pub disable_renderers_at_zero: bool,
    pub disable_delay: f32,
}

impl Default for WallVisualConfig {
    fn default() -> Self {
        Self {
            fade_in_sharpness: 16.0,
            fade_out_sharpness: 14.0,
            apply_epsilon: 0.005,
            disable_renderers_at_zero: true,
            disable_delay: 0.10,
        }
    }
}

//=== RotationConfig ======================================================

/// Tuning for a room's quarter-turn rotation and gravity coupling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Seconds per quarter turn.
    pub duration: f32,
    pub gravity_strength: f32,
    /// Rotate gravity together with the room.
    pub couple_gravity: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            duration: 0.25,
            gravity_strength: 9.8,
            couple_gravity: false,
        }
    }
}

//=== Tests ===============================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_defaults_have_ordered_thresholds() {
        let config = VisibilityConfig::default();
        assert!(config.hide_dot < config.show_dot);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: WallVisualConfig =
            serde_json::from_str(r#"{ "disable_delay": 0.5 }"#).unwrap();
        assert_eq!(config.disable_delay, 0.5);
        assert_eq!(config.fade_in_sharpness, 16.0);
        assert!(config.disable_renderers_at_zero);
    }

    #[test]
    fn rotation_config_from_json() {
        let config: RotationConfig =
            serde_json::from_str(r#"{ "duration": 1.0, "couple_gravity": true }"#).unwrap();
        assert_eq!(config.duration, 1.0);
        assert!(config.couple_gravity);
        assert_eq!(config.gravity_strength, 9.8);
    }
}

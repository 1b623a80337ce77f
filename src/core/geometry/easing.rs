//=========================================================================
// Easing and Smoothing
//=========================================================================
//
// Scalar helpers shared by rotation interpolation, the visibility filter
// and the wall fade actor.
//
//=========================================================================

/// Lower bound applied to every sharpness constant.
pub const MIN_SHARPNESS: f32 = 0.01;

/// Blend factor for frame-rate independent exponential smoothing.
///
/// Applying `value += (target - value) * k` with this factor every frame
/// converges at the same rate regardless of `dt`.
pub fn exp_smoothing_factor(sharpness: f32, dt: f32) -> f32 {
    let sharpness = sharpness.max(MIN_SHARPNESS);
    1.0 - (-sharpness * dt.max(0.0)).exp()
}

/// Hermite smooth-step of `t` on [0, 1]; input is clamped.
pub fn smooth_step(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Position of `value` between `a` and `b`, clamped to [0, 1].
///
/// A degenerate range maps everything to 0.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

//=== Tests ===============================================================

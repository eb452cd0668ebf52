// ascent_core/src/math.rs
use glam::{FloatExt, Vec4};

/// Hermite interpolation between `from` and `to` by `t`, clamped to [0, 1].
pub fn smooth_step(from: f32, to: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let t = -2.0 * t * t * t + 3.0 * t * t;
    to * t + from * (1.0 - t)
}

/// Linear interpolation with `t` clamped to [0, 1].
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a.lerp(b, t.clamp(0.0, 1.0))
}

/// Component-wise colour interpolation with `t` clamped to [0, 1].
pub fn lerp_color(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    a.lerp(b, t.clamp(0.0, 1.0))
}

//! Screen-space angle utilities.
//!
//! All screen positions are in canvas backing-store pixels with the origin at
//! the top-left corner and y growing downward. Angles follow the `atan2`
//! convention in that space, so a positive angle points *down* the screen.

use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Angle of the cursor as seen from `anchor`, in (-π, π].
#[inline]
pub fn screen_angle_from_cursor(cursor: Vec2, anchor: Vec2) -> f32 {
    (cursor.y - anchor.y).atan2(cursor.x - anchor.x)
}

/// Project a world-space point into canvas pixels.
///
/// `view_proj` is the camera's combined projection * view matrix.
#[inline]
pub fn project_world_to_screen(world: Vec3, view_proj: Mat4, width: f32, height: f32) -> Vec2 {
    let ndc = view_proj.project_point3(world);
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * width,
        (1.0 - ndc.y) * 0.5 * height,
    )
}

/// Shorter arc between two angles, in [0, π].
#[inline]
pub fn angular_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs().rem_euclid(TAU);
    d.min(TAU - d).clamp(0.0, PI)
}

/// Signed cosine similarity of two directions, in [-1, 1].
///
/// 1 when the directions coincide, -1 when they are opposite. Callers that
/// need a size multiplier apply [`highlight_multiplier`].
#[inline]
pub fn angular_proximity(a: f32, b: f32) -> f32 {
    angular_distance(a, b).cos()
}

/// Lift a proximity into the [0, 2] multiplier applied to feature sizes.
#[inline]
pub fn highlight_multiplier(proximity: f32) -> f32 {
    1.0 + proximity
}

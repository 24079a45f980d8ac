use glam::Vec2;

/// Map a client-space point (CSS pixels) into canvas backing-store pixels.
///
/// Returns `None` for a canvas with an empty bounding rect, which is how a
/// hidden or detached canvas reports itself.
#[inline]
pub fn client_to_canvas_px(
    client: Vec2,
    rect_origin: Vec2,
    rect_size: Vec2,
    backing: Vec2,
) -> Option<Vec2> {
    if rect_size.x <= 0.0 || rect_size.y <= 0.0 {
        return None;
    }
    Some((client - rect_origin) / rect_size * backing)
}

/// Backing-store size for a canvas whose CSS box is `css_size`.
#[inline]
pub fn backing_size(css_size: Vec2, device_pixel_ratio: f64) -> (u32, u32) {
    let w = (css_size.x as f64 * device_pixel_ratio) as u32;
    let h = (css_size.y as f64 * device_pixel_ratio) as u32;
    (w.max(1), h.max(1))
}

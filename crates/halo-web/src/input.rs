use glam::Vec2;
use halo_core::Viewport;
use web_sys as web;

use crate::coords;

/// Cursor position in the canvas' backing-store pixels, or `None` while the
/// canvas has no on-screen box.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    coords::client_to_canvas_px(
        Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
        Vec2::new(canvas.width() as f32, canvas.height() as f32),
    )
}

/// Backing-store viewport, empty when the canvas is hidden or detached.
#[inline]
pub fn canvas_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    if !canvas.is_connected() || rect.width() <= 0.0 || rect.height() <= 0.0 {
        return Viewport::new(0, 0);
    }
    Viewport::new(canvas.width(), canvas.height())
}

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::coords;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{id} is not a canvas: {:?}", e)))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            // hidden: keep the last size so the view resumes without a flash
            return;
        }
        let (w_px, h_px) = coords::backing_size(
            Vec2::new(rect.width() as f32, rect.height() as f32),
            w.device_pixel_ratio(),
        );
        if canvas.width() != w_px || canvas.height() != h_px {
            canvas.set_width(w_px);
            canvas.set_height(h_px);
        }
    }
}

#[inline]
pub fn set_visible(el: &web::HtmlElement, visible: bool) {
    _ = el
        .style()
        .set_property("display", if visible { "block" } else { "none" });
}

pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

/// Computed `background-color` of the nearest `.canvas-wrapper` around
/// `canvas`, or of its parent when there is none.
pub fn wrapper_background(canvas: &web::HtmlCanvasElement) -> Option<String> {
    let window = web::window()?;
    let wrapper = canvas
        .closest(".canvas-wrapper")
        .ok()
        .flatten()
        .or_else(|| canvas.parent_element())?;
    window
        .get_computed_style(&wrapper)
        .ok()
        .flatten()?
        .get_property_value("background-color")
        .ok()
}

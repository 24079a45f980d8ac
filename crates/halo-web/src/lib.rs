#![cfg(target_arch = "wasm32")]
use halo_core::AppConfig;
use wasm_bindgen::prelude::*;
use web_sys as web;

pub mod coords;
mod dom;
mod events;
mod fetch;
mod frame;
mod gui;
mod input;
mod render;
mod ring2d;
mod view3d;

use ring2d::Ring2dView;
use view3d::Scene3dView;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Configuration from the page URL query, e.g. `?post=0&level=2`.
fn page_config() -> AppConfig {
    let query = web::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default();
    AppConfig::from_query(&query)
}

#[wasm_bindgen]
pub struct Scene3dHandle {
    view: Scene3dView,
}

#[wasm_bindgen]
impl Scene3dHandle {
    pub fn show(&self) {
        self.view.show();
    }

    pub fn hide(&self) {
        self.view.hide();
    }

    #[wasm_bindgen(js_name = isVisible)]
    pub fn is_visible(&self) -> bool {
        self.view.is_visible()
    }

    /// Rejects levels outside 0..=5.
    pub fn set_subdivision_level(&self, level: i32) -> Result<(), JsValue> {
        self.view.set_subdivision_level(level as i64).map_err(js_err)
    }
}

#[wasm_bindgen]
pub struct Ring2dHandle {
    view: Ring2dView,
}

#[wasm_bindgen]
impl Ring2dHandle {
    pub fn refresh(&self) {
        self.view.refresh();
    }

    pub fn angle(&self) -> f32 {
        self.view.angle()
    }
}

/// Mount the 3D view on `canvas`, placing the subdivision slider in `gui_container`.
#[wasm_bindgen]
pub fn mount_scene3d(
    canvas: web::HtmlCanvasElement,
    gui_container: Option<web::HtmlElement>,
) -> Result<Scene3dHandle, JsValue> {
    let view = Scene3dView::mount(canvas, gui_container.as_deref(), page_config(), true)
        .map_err(js_err)?;
    Ok(Scene3dHandle { view })
}

#[wasm_bindgen]
pub fn mount_ring2d(canvas: web::HtmlCanvasElement) -> Result<Ring2dHandle, JsValue> {
    let view = Ring2dView::mount(canvas).map_err(js_err)?;
    Ok(Ring2dHandle { view })
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("halo-web starting");

    if let Err(e) = mount_default_page() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

/// Wire both views onto the stock page, starting in the 2D view.
fn mount_default_page() -> anyhow::Result<()> {
    let Some(document) = dom::window_document() else {
        return Ok(());
    };
    // Pages without the stock markup mount views themselves.
    if document.get_element_by_id("canvas-2d").is_none() {
        return Ok(());
    }
    let canvas_2d = dom::canvas_by_id(&document, "canvas-2d")?;
    let canvas_3d = dom::canvas_by_id(&document, "canvas-3d")?;
    let wrapper = document
        .query_selector(".canvas-wrapper")
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let ring = Ring2dView::mount(canvas_2d.clone())?;
    let scene = Scene3dView::mount(canvas_3d, wrapper.as_ref(), page_config(), false)?;
    dom::set_text(&document, "view-toggle", "Go 3D");

    let doc = document.clone();
    dom::add_click_listener(&document, "view-toggle", move || {
        if scene.is_visible() {
            scene.hide();
            dom::set_visible(&canvas_2d, true);
            ring.refresh();
            dom::set_text(&doc, "view-toggle", "Go 3D");
        } else {
            dom::set_visible(&canvas_2d, false);
            scene.show();
            dom::set_text(&doc, "view-toggle", "Go 2D");
        }
        log::info!("[view] 3d={}", scene.is_visible());
    });
    Ok(())
}

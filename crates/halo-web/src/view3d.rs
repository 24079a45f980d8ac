use crate::dom;
use crate::events::{self, Listener};
use crate::fetch::fetch_bytes;
use crate::frame::{start_loop, AnimationLoop, FrameContext};
use crate::gui::SubdivisionControl;
use crate::render::GpuState;
use halo_core::{
    clear_color_from_css, loader, AppConfig, MeshFormat, MeshSource, Stage, ViewLifecycle,
    CLEAR_COLOR,
};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// The mounted 3D view.
///
/// GPU state and the animation loop only exist while the view is shown:
/// hiding cancels the loop and releases them, showing initialises them
/// again. Dropping the view also removes its listeners and slider.
pub struct Scene3dView {
    stage: Rc<RefCell<Stage>>,
    canvas: web::HtmlCanvasElement,
    visible: Rc<Cell<bool>>,
    lifecycle: Rc<RefCell<ViewLifecycle>>,
    ctx: Rc<RefCell<FrameContext>>,
    animation: Rc<RefCell<Option<AnimationLoop>>>,
    post_enabled: bool,
    clear_color: [f32; 4],
    gui: Option<SubdivisionControl>,
    _listeners: Vec<Listener>,
}

impl Scene3dView {
    pub fn mount(
        canvas: web::HtmlCanvasElement,
        gui_container: Option<&web::Element>,
        config: AppConfig,
        start_visible: bool,
    ) -> anyhow::Result<Self> {
        let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        dom::sync_canvas_backing_size(&canvas);

        let post_enabled = config.post_process_enabled;
        let source = config.mesh_source.clone();
        let clear_color = dom::wrapper_background(&canvas)
            .map(|css| clear_color_from_css(&css))
            .unwrap_or(CLEAR_COLOR);
        let stage = Rc::new(RefCell::new(Stage::new(config)));
        let visible = Rc::new(Cell::new(false));

        let gui = gui_container
            .map(|container| SubdivisionControl::mount(&document, container, &stage))
            .transpose()?;

        let mut listeners = Vec::new();
        listeners.extend(events::wire_cursor(&canvas, &stage, &visible));
        listeners.extend(events::wire_orbit(&canvas, &stage, &visible));
        listeners.extend(events::wire_resize(&canvas, || {}));

        if let MeshSource::ExternalFile { path, format } = source {
            spawn_local(load_external(stage.clone(), path, format));
        }

        let ctx = Rc::new(RefCell::new(FrameContext::new(
            stage.clone(),
            canvas.clone(),
            visible.clone(),
        )));
        let view = Self {
            stage,
            canvas,
            visible,
            lifecycle: Rc::new(RefCell::new(ViewLifecycle::hidden())),
            ctx,
            animation: Rc::new(RefCell::new(None)),
            post_enabled,
            clear_color,
            gui,
            _listeners: listeners,
        };
        if start_visible {
            view.show();
        } else {
            view.hide();
        }
        Ok(view)
    }

    pub fn show(&self) {
        self.visible.set(true);
        dom::set_visible(&self.canvas, true);
        dom::sync_canvas_backing_size(&self.canvas);
        if let Some(gui) = &self.gui {
            gui.set_visible(true);
        }
        let epoch = self.lifecycle.borrow_mut().show();
        if let Some(epoch) = epoch {
            self.init_gpu(epoch);
        }
    }

    /// Hide the canvas and slider, stopping the loop and dropping GPU state.
    pub fn hide(&self) {
        self.visible.set(false);
        dom::set_visible(&self.canvas, false);
        if let Some(gui) = &self.gui {
            gui.set_visible(false);
        }
        self.stop();
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Apply a level from code rather than the slider; out-of-range levels
    /// leave the view untouched.
    pub fn set_subdivision_level(&self, level: i64) -> halo_core::Result<()> {
        let applied = {
            let mut stage = self.stage.borrow_mut();
            stage.set_subdivision_level(level)?;
            stage.subdivision.level()
        };
        if let Some(gui) = &self.gui {
            gui.show_level(applied);
        }
        Ok(())
    }

    fn stop(&self) {
        let was_running = self.lifecycle.borrow_mut().hide();
        let animation = self.animation.borrow_mut().take();
        if let Some(animation) = animation {
            animation.cancel();
        } else if was_running {
            log::warn!("[gpu] running view had no animation loop");
        }
    }

    fn init_gpu(&self, epoch: u64) {
        let ctx = self.ctx.clone();
        let canvas = self.canvas.clone();
        let lifecycle = self.lifecycle.clone();
        let animation = self.animation.clone();
        let post_enabled = self.post_enabled;
        let clear_color = self.clear_color;
        spawn_local(async move {
            match GpuState::new(&canvas, post_enabled, clear_color).await {
                Ok(gpu) => {
                    // Hidden (or hidden and shown again) while the adapter was requested.
                    if !lifecycle.borrow_mut().init_finished(epoch) {
                        log::debug!("[gpu] dropping stale init {epoch}");
                        return;
                    }
                    {
                        let mut ctx = ctx.borrow_mut();
                        ctx.gpu = Some(gpu);
                        ctx.last_instant = Instant::now();
                    }
                    *animation.borrow_mut() = Some(start_loop(ctx));
                }
                Err(e) => {
                    lifecycle.borrow_mut().init_failed(epoch);
                    log::error!("[gpu] init error: {:?}", e);
                }
            }
        });
    }
}

impl Drop for Scene3dView {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn load_external(stage: Rc<RefCell<Stage>>, path: String, format: MeshFormat) {
    log::info!("[loader] fetching {path}");
    let loaded = match fetch_bytes(&path).await {
        Ok(bytes) => loader::parse_mesh(format, &bytes),
        Err(e) => Err(e),
    };
    match loaded {
        Ok(node) => stage.borrow_mut().attach_loaded(node),
        Err(e) => {
            log::error!("[loader] {path}: {e}; showing placeholder icosahedron");
            stage.borrow_mut().fallback_to_icosahedron();
        }
    }
}

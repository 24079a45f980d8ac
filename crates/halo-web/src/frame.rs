use crate::input;
use crate::render::GpuState;
use halo_core::Stage;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub stage: Rc<RefCell<Stage>>,
    pub canvas: web::HtmlCanvasElement,
    pub visible: Rc<Cell<bool>>,
    pub gpu: Option<GpuState>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(stage: Rc<RefCell<Stage>>, canvas: web::HtmlCanvasElement, visible: Rc<Cell<bool>>) -> Self {
        Self {
            stage,
            canvas,
            visible,
            gpu: None,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        if !self.visible.get() {
            return;
        }
        let viewport = input::canvas_viewport(&self.canvas);
        {
            let mut stage = self.stage.borrow_mut();
            stage.resize(viewport);
            stage.advance(dt_sec);
        }
        if viewport.is_empty() {
            return;
        }

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(viewport);
        let stage = self.stage.borrow();
        match gpu.render(&stage) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::warn!("[gpu] frame dropped: {:?}", e),
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle of a running `requestAnimationFrame` loop.
pub struct AnimationLoop {
    tick: TickClosure,
    raf_id: Rc<Cell<Option<i32>>>,
    ctx: Rc<RefCell<FrameContext>>,
}

impl AnimationLoop {
    /// Stop scheduling frames and release the GPU state with its targets and buffers.
    pub fn cancel(&self) {
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Dropping the closure also breaks its self-reference.
        self.tick.borrow_mut().take();
        self.ctx.borrow_mut().gpu = None;
        log::info!("[gpu] animation loop cancelled");
    }
}

fn request_frame(tick: &TickClosure, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(closure) = tick.borrow().as_ref() {
        raf_id.set(w.request_animation_frame(closure.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> AnimationLoop {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let raf_id = Rc::new(Cell::new(None));

    let tick_clone = tick.clone();
    let raf_clone = raf_id.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_clone.set(None);
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone, &raf_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);

    AnimationLoop {
        tick,
        raf_id,
        ctx: frame_ctx,
    }
}

use crate::dom;
use crate::events::{self, Listener};
use crate::input;
use glam::Vec2;
use halo_core::{screen_angle_from_cursor, RingLayout, Viewport, RING_DOT_COLOR};
use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Flat twelve-marker ring drawn with the canvas 2D API.
pub struct Ring2d {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    angle: f32,
}

impl Ring2d {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!(format!("getContext(2d): {:?}", e)))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| anyhow::anyhow!("2d context has unexpected type"))?;
        Ok(Self {
            canvas,
            ctx,
            angle: 0.0,
        })
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Update the cursor angle and redraw; ignored while the canvas is hidden.
    pub fn on_cursor(&mut self, cursor: Vec2) {
        let viewport = input::canvas_viewport(&self.canvas);
        if viewport.is_empty() {
            return;
        }
        self.angle = screen_angle_from_cursor(cursor, viewport.center());
        self.draw();
    }

    pub fn draw(&self) {
        let viewport = Viewport::new(self.canvas.width(), self.canvas.height());
        let (w, h) = (viewport.width as f64, viewport.height as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(RING_DOT_COLOR);
        for circle in RingLayout::for_viewport(viewport).circles(self.angle) {
            self.ctx.begin_path();
            let drawn = self.ctx.arc(
                circle.center.x as f64,
                circle.center.y as f64,
                circle.radius.max(0.0) as f64,
                0.0,
                TAU,
            );
            if drawn.is_ok() {
                self.ctx.fill();
            }
        }
    }
}

/// A mounted ring view; dropping it detaches its listeners.
pub struct Ring2dView {
    ring: Rc<RefCell<Ring2d>>,
    _listeners: Vec<Listener>,
}

impl Ring2dView {
    pub fn mount(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        dom::sync_canvas_backing_size(&canvas);
        let ring = Rc::new(RefCell::new(Ring2d::new(canvas.clone())?));
        ring.borrow().draw();

        let mut listeners = Vec::new();
        {
            let ring = ring.clone();
            let canvas = canvas.clone();
            listeners.extend(Listener::on_window("mousemove", move |ev: web::Event| {
                let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
                    return;
                };
                if let Some(cursor) = input::pointer_canvas_px(ev, &canvas) {
                    ring.borrow_mut().on_cursor(cursor);
                }
            }));
        }
        {
            let ring = ring.clone();
            listeners.extend(events::wire_resize(&canvas, move || ring.borrow().draw()));
        }
        log::info!("[ring] mounted {}x{}", canvas.width(), canvas.height());
        Ok(Self {
            ring,
            _listeners: listeners,
        })
    }

    /// Resync the backing size and redraw, e.g. after the canvas is shown again.
    pub fn refresh(&self) {
        let ring = self.ring.borrow();
        dom::sync_canvas_backing_size(&ring.canvas);
        ring.draw();
    }

    pub fn angle(&self) -> f32 {
        self.ring.borrow().angle()
    }
}

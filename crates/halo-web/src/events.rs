use crate::dom;
use crate::input;
use glam::Vec2;
use halo_core::{HighlightOutcome, Stage};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// An event listener that is removed again when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        if let Err(e) = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()) {
            log::warn!("[events] add {kind} listener failed: {:?}", e);
        }
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }

    /// Listen on the global window.
    pub fn on_window(kind: &'static str, handler: impl FnMut(web::Event) + 'static) -> Option<Self> {
        let window = web::window()?;
        Some(Self::new(&window, kind, handler))
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Window `mousemove` feeding the 3D view's highlight controller.
pub fn wire_cursor(
    canvas: &web::HtmlCanvasElement,
    stage: &Rc<RefCell<Stage>>,
    visible: &Rc<Cell<bool>>,
) -> Option<Listener> {
    let canvas = canvas.clone();
    let stage = stage.clone();
    let visible = visible.clone();
    Listener::on_window("mousemove", move |ev: web::Event| {
        if !visible.get() {
            return;
        }
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let viewport = input::canvas_viewport(&canvas);
        let mut stage = stage.borrow_mut();
        stage.resize(viewport);
        let outcome = match input::pointer_canvas_px(ev, &canvas) {
            Some(cursor) => stage.cursor_moved(cursor),
            None => HighlightOutcome::Skipped,
        };
        if let HighlightOutcome::Updated { angle, features } = outcome {
            log::trace!("[highlight] angle={angle:.3} features={features}");
        }
    })
}

/// Window `resize` keeping the canvas backing store at CSS size × DPR.
pub fn wire_resize(
    canvas: &web::HtmlCanvasElement,
    mut after: impl FnMut() + 'static,
) -> Option<Listener> {
    let canvas = canvas.clone();
    Listener::on_window("resize", move |_| {
        dom::sync_canvas_backing_size(&canvas);
        after();
    })
}

fn client_pos(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Left-button drag on the canvas orbits the camera; the wheel zooms.
pub fn wire_orbit(
    canvas: &web::HtmlCanvasElement,
    stage: &Rc<RefCell<Stage>>,
    visible: &Rc<Cell<bool>>,
) -> Vec<Listener> {
    let drag: Rc<Cell<Option<Vec2>>> = Rc::new(Cell::new(None));
    let mut listeners = Vec::with_capacity(4);

    {
        let drag = drag.clone();
        let visible = visible.clone();
        listeners.push(Listener::new(canvas, "mousedown", move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
                return;
            };
            if ev.button() == 0 && visible.get() {
                drag.set(Some(client_pos(ev)));
            }
        }));
    }
    {
        let drag = drag.clone();
        let canvas = canvas.clone();
        let stage = stage.clone();
        listeners.extend(Listener::on_window("mousemove", move |ev: web::Event| {
            let (Some(last), Some(ev)) = (drag.get(), ev.dyn_ref::<web::MouseEvent>()) else {
                return;
            };
            let pos = client_pos(ev);
            drag.set(Some(pos));
            let height = canvas.get_bounding_client_rect().height() as f32;
            stage.borrow_mut().orbit(pos - last, height);
        }));
    }
    listeners.extend(Listener::on_window("mouseup", move |_| drag.set(None)));
    {
        let stage = stage.clone();
        let visible = visible.clone();
        listeners.push(Listener::new(canvas, "wheel", move |ev: web::Event| {
            let Some(ev) = ev.dyn_ref::<web::WheelEvent>() else {
                return;
            };
            if !visible.get() {
                return;
            }
            ev.prevent_default();
            stage.borrow_mut().zoom(ev.delta_y() as f32);
        }));
    }
    listeners
}

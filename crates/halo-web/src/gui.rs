use crate::dom;
use crate::events::Listener;
use halo_core::{Stage, SubdivisionLevel, SUBDIVISION_MAX, SUBDIVISION_MIN};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn create<T: JsCast>(document: &web::Document, tag: &str) -> anyhow::Result<T> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!(format!("create <{tag}>: {:?}", e)))?
        .dyn_into::<T>()
        .map_err(|_| anyhow::anyhow!("<{tag}> has unexpected type"))
}

/// The "Subdivision Level" slider, 0 to 5 in steps of one.
pub struct SubdivisionControl {
    root: web::HtmlElement,
    input: web::HtmlInputElement,
    readout: web::HtmlElement,
    _on_input: Listener,
}

impl SubdivisionControl {
    pub fn mount(
        document: &web::Document,
        container: &web::Element,
        stage: &Rc<RefCell<Stage>>,
    ) -> anyhow::Result<Self> {
        let root: web::HtmlElement = create(document, "div")?;
        root.set_class_name("gui-subdivision");
        let label: web::HtmlElement = create(document, "label")?;
        label.set_text_content(Some("Subdivision Level"));
        let input: web::HtmlInputElement = create(document, "input")?;
        input.set_type("range");
        input.set_min(&SUBDIVISION_MIN.to_string());
        input.set_max(&SUBDIVISION_MAX.to_string());
        input.set_step("1");
        let level = stage.borrow().subdivision.level();
        input.set_value(&level.get().to_string());
        let readout: web::HtmlElement = create(document, "span")?;
        readout.set_text_content(Some(&level.get().to_string()));

        let children: [&web::Node; 3] = [&label, &input, &readout];
        for child in children {
            root.append_child(child)
                .map_err(|e| anyhow::anyhow!(format!("append: {:?}", e)))?;
        }
        container
            .append_child(&root)
            .map_err(|e| anyhow::anyhow!(format!("append: {:?}", e)))?;

        let on_input = {
            let input_el = input.clone();
            let readout = readout.clone();
            let stage = stage.clone();
            Listener::new(&input, "input", move |_| {
                let Ok(raw) = input_el.value().parse::<i64>() else {
                    return;
                };
                if stage.borrow_mut().set_subdivision_level(raw).is_ok() {
                    readout.set_text_content(Some(&raw.to_string()));
                }
            })
        };

        Ok(Self {
            root,
            input,
            readout,
            _on_input: on_input,
        })
    }

    /// Reflect a level applied from outside the slider.
    pub fn show_level(&self, level: SubdivisionLevel) {
        let text = level.get().to_string();
        self.input.set_value(&text);
        self.readout.set_text_content(Some(&text));
    }

    pub fn set_visible(&self, visible: bool) {
        dom::set_visible(&self.root, visible);
    }
}

impl Drop for SubdivisionControl {
    fn drop(&mut self) {
        self.root.remove();
    }
}

// layers.rs - DOM-backed entities

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

use crate::config::ParallaxConfig;
use crate::scheduler::Updatable;
use crate::show::Parallax;
use crate::surface::Viewport;

/// Parallax applied to the content and snow layers as a CSS translate.
pub struct ParallaxLayers {
    parallax: Parallax,
    content: Option<HtmlElement>,
    snow: Option<HtmlElement>,
    applied: (f64, f64),
}

impl ParallaxLayers {
    pub fn new(document: &Document, cfg: ParallaxConfig, viewport: Viewport) -> Self {
        let content = document
            .query_selector(".content")
            .ok()
            .flatten()
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let snow = document
            .get_element_by_id("snowContainer")
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        Self {
            parallax: Parallax::new(cfg, viewport),
            content,
            snow,
            applied: (0.0, 0.0),
        }
    }
}

fn translate(el: &Option<HtmlElement>, (x, y): (f64, f64)) {
    if let Some(el) = el {
        let value = format!("translate({x:.2}px, {y:.2}px)");
        if let Err(e) = el.style().set_property("transform", &value) {
            log::warn!("parallax: transform rejected: {e:?}");
        }
    }
}

impl Updatable for ParallaxLayers {
    fn update(&mut self, pointer_x: f64, pointer_y: f64) {
        self.parallax.update(pointer_x, pointer_y);
        let offset = self.parallax.offset();
        if offset == self.applied {
            return;
        }
        self.applied = offset;
        translate(&self.content, self.parallax.content_offset());
        translate(&self.snow, self.parallax.snow_offset());
    }

    fn resize(&mut self, viewport: Viewport) {
        self.parallax.resize(viewport);
    }
}

/// Page-side entity: any JS object with an `update(x, y)` method and
/// optionally `resize(width, height, dpr)`.
pub struct JsEntity {
    target: Object,
}

impl JsEntity {
    pub fn new(target: Object) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &Object {
        &self.target
    }

    fn method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.target, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
    }
}

impl Updatable for JsEntity {
    fn update(&mut self, pointer_x: f64, pointer_y: f64) {
        if let Some(f) = self.method("update") {
            if let Err(e) = f.call2(&self.target, &pointer_x.into(), &pointer_y.into()) {
                log::warn!("js entity update threw: {e:?}");
            }
        }
    }

    fn resize(&mut self, viewport: Viewport) {
        if let Some(f) = self.method("resize") {
            let args = js_sys::Array::of3(
                &viewport.width.into(),
                &viewport.height.into(),
                &viewport.dpr.into(),
            );
            if let Err(e) = f.apply(&self.target, &args) {
                log::warn!("js entity resize threw: {e:?}");
            }
        }
    }
}

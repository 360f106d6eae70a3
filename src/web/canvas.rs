// canvas.rs - Surface over a browser 2D context

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::{EngineError, EngineResult};
use crate::surface::{Composite, Paint, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_id(document: &Document, id: &str) -> EngineResult<Self> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| EngineError::MissingElement(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| EngineError::MissingElement(id.to_string()))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or(EngineError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::ContextUnavailable)?;
        Ok(Self { canvas, ctx })
    }
}

impl Surface for CanvasSurface {
    fn resize_backing(&mut self, pixel_width: u32, pixel_height: u32) {
        self.canvas.set_width(pixel_width);
        self.canvas.set_height(pixel_height);
    }

    fn set_scale(&mut self, sx: f64, sy: f64) {
        if let Err(e) = self.ctx.set_transform(sx, 0.0, 0.0, sy, 0.0, 0.0) {
            log::warn!("canvas: set_transform failed: {e:?}");
        }
    }

    fn set_fill(&mut self, paint: Paint) {
        self.ctx.set_fill_style_str(&paint.to_string());
    }

    fn set_composite(&mut self, mode: Composite) {
        if let Err(e) = self.ctx.set_global_composite_operation(mode.as_css()) {
            log::warn!("canvas: composite {} rejected: {e:?}", mode.as_css());
        }
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.clear_rect(x, y, w, h);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64) {
        self.ctx.begin_path();
        if self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU).is_ok() {
            self.ctx.fill();
        }
    }
}

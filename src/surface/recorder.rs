// recorder.rs - Draw call recorder
//
// Keeps the same state a canvas context would (size, scale, fill,
// composite) and logs every pixel-touching call.

use super::{Composite, Paint, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { x: f64, y: f64, w: f64, h: f64 },
    Rect { x: f64, y: f64, w: f64, h: f64, paint: Paint, mode: Composite },
    Circle { x: f64, y: f64, r: f64, paint: Paint, mode: Composite },
}

#[derive(Debug, Clone)]
pub struct Recorder {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub scale: (f64, f64),
    fill: Paint,
    mode: Composite,
    ops: Vec<DrawOp>,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            pixel_width: 0,
            pixel_height: 0,
            scale: (1.0, 1.0),
            fill: Paint::Rgba(0, 0, 0, 1.0),
            mode: Composite::SourceOver,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. }))
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for Recorder {
    fn resize_backing(&mut self, pixel_width: u32, pixel_height: u32) {
        self.pixel_width = pixel_width;
        self.pixel_height = pixel_height;
        self.scale = (1.0, 1.0);
        self.ops.clear();
    }

    fn set_scale(&mut self, sx: f64, sy: f64) {
        self.scale = (sx, sy);
    }

    fn set_fill(&mut self, paint: Paint) {
        self.fill = paint;
    }

    fn set_composite(&mut self, mode: Composite) {
        self.mode = mode;
    }

    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::Clear { x, y, w, h });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::Rect { x, y, w, h, paint: self.fill, mode: self.mode });
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64) {
        self.ops.push(DrawOp::Circle { x, y, r, paint: self.fill, mode: self.mode });
    }
}

// parallax.rs - Pointer-driven layer offsets

use crate::config::ParallaxConfig;
use crate::scheduler::{POINTER_SENTINEL, Updatable};
use crate::surface::Viewport;

pub struct Parallax {
    cfg: ParallaxConfig,
    viewport: Viewport,
    offset: (f64, f64),
}

impl Parallax {
    pub fn new(cfg: ParallaxConfig, viewport: Viewport) -> Self {
        Self {
            cfg,
            viewport,
            offset: (0.0, 0.0),
        }
    }

    /// Offset at depth 1.0, in CSS pixels.
    pub fn offset(&self) -> (f64, f64) {
        self.offset
    }

    pub fn layer_offset(&self, depth: f64) -> (f64, f64) {
        (self.offset.0 * depth, self.offset.1 * depth)
    }

    pub fn content_offset(&self) -> (f64, f64) {
        self.layer_offset(self.cfg.content_depth)
    }

    pub fn snow_offset(&self) -> (f64, f64) {
        self.layer_offset(self.cfg.snow_depth)
    }
}

impl Updatable for Parallax {
    fn update(&mut self, pointer_x: f64, pointer_y: f64) {
        let (w, h) = (self.viewport.width, self.viewport.height);
        let unseen = pointer_x == POINTER_SENTINEL && pointer_y == POINTER_SENTINEL;
        if unseen || w <= 0.0 || h <= 0.0 {
            self.offset = (0.0, 0.0);
            return;
        }
        let s = self.cfg.strength;
        self.offset = ((pointer_x / w - 0.5) * s, (pointer_y / h - 0.5) * s);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parallax() -> Parallax {
        Parallax::new(ParallaxConfig::default(), Viewport::new(1000.0, 500.0, 1.0))
    }

    #[test]
    fn centre_is_neutral_and_edges_reach_half_strength() {
        let mut p = parallax();
        p.update(500.0, 250.0);
        assert_eq!(p.offset(), (0.0, 0.0));
        p.update(1000.0, 0.0);
        assert_eq!(p.offset(), (10.0, -10.0));
        assert_eq!(p.snow_offset(), (5.0, -5.0));
        assert_eq!(p.content_offset(), (10.0, -10.0));
    }

    #[test]
    fn no_offset_before_first_pointer() {
        let mut p = parallax();
        p.update(POINTER_SENTINEL, POINTER_SENTINEL);
        assert_eq!(p.offset(), (0.0, 0.0));
    }
}

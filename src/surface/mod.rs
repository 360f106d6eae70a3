// surface/ - 2D drawing surface
//
// The fireworks renderer only talks to this trait. The browser canvas
// lives in `web`; `Recorder` captures draw calls for tests and headless runs.

mod recorder;

pub use recorder::{DrawOp, Recorder};

use std::fmt;

/// Viewport in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr: if dpr > 0.0 { dpr } else { 1.0 },
        }
    }

    /// Backing store width in device pixels.
    pub fn pixel_width(&self) -> u32 {
        (self.width * self.dpr).round() as u32
    }

    pub fn pixel_height(&self) -> u32 {
        (self.height * self.dpr).round() as u32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Fill colour, rendered as a CSS colour string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Rgba(u8, u8, u8, f64),
    Hsla { h: f64, s: f64, l: f64, a: f64 },
}

impl Paint {
    pub fn alpha(&self) -> f64 {
        match *self {
            Paint::Rgba(_, _, _, a) => a,
            Paint::Hsla { a, .. } => a,
        }
    }
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Paint::Rgba(r, g, b, a) => write!(f, "rgba({r}, {g}, {b}, {a:.3})"),
            Paint::Hsla { h, s, l, a } => {
                write!(f, "hsla({:.1}, {s}%, {l}%, {a:.3})", h.rem_euclid(360.0))
            }
        }
    }
}

/// Compositing rule for new pixels against what is already drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composite {
    #[default]
    SourceOver,
    /// Erase existing pixels by the source alpha.
    DestinationOut,
    /// Additive blend.
    Lighter,
}

impl Composite {
    pub fn as_css(self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::DestinationOut => "destination-out",
            Composite::Lighter => "lighter",
        }
    }
}

pub trait Surface {
    /// Reallocate the backing store. Clears pixels and resets the transform.
    fn resize_backing(&mut self, pixel_width: u32, pixel_height: u32);
    /// Replace the current transform with a pure scale.
    fn set_scale(&mut self, sx: f64, sy: f64);
    fn set_fill(&mut self, paint: Paint);
    fn set_composite(&mut self, mode: Composite);
    fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_circle(&mut self, x: f64, y: f64, r: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_scales_by_density() {
        let vp = Viewport::new(800.0, 600.0, 2.0);
        assert_eq!((vp.pixel_width(), vp.pixel_height()), (1600, 1200));
    }

    #[test]
    fn viewport_rejects_bad_density() {
        assert_eq!(Viewport::new(10.0, 10.0, 0.0).dpr, 1.0);
        assert_eq!(Viewport::new(-5.0, 10.0, 1.0).width, 0.0);
    }

    #[test]
    fn paint_css_strings() {
        assert_eq!(Paint::Rgba(0, 0, 0, 0.18).to_string(), "rgba(0, 0, 0, 0.180)");
        let hsla = Paint::Hsla { h: 400.0, s: 100.0, l: 60.0, a: 0.5 };
        assert_eq!(hsla.to_string(), "hsla(40.0, 100%, 60%, 0.500)");
    }
}

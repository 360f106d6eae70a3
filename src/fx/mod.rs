// fx/ - Fireworks
//
// Bursts of particles painted onto a drawing surface. Each tick erases
// a fraction of the previous frame (trails), advances every particle,
// drops dead ones, and adds the survivors back with an additive blend.

mod burst;
mod particle;

pub use burst::Burst;
pub use particle::{EXPIRED, Particle};

use std::collections::VecDeque;

use fastrand::Rng;

use crate::config::FireworksConfig;
use crate::error::EngineResult;
use crate::scheduler::Updatable;
use crate::surface::{Composite, Paint, Surface, Viewport};

pub struct Fireworks<S: Surface> {
    // None when no drawing surface was available; everything is then a no-op.
    surface: Option<S>,
    cfg: FireworksConfig,
    viewport: Viewport,

    // Oldest first, so eviction pops the front.
    bursts: VecDeque<Burst>,

    rng: Rng,
    evicted: u64,
}

impl<S: Surface> Fireworks<S> {
    /// Fails only when `cfg` does not validate.
    pub fn new(
        surface: Option<S>,
        viewport: Viewport,
        cfg: FireworksConfig,
        rng: Rng,
    ) -> EngineResult<Self> {
        cfg.validate()?;
        if surface.is_none() {
            log::warn!("fireworks: no drawing surface, disabled");
        }
        let mut fw = Self {
            surface,
            cfg,
            viewport,
            bursts: VecDeque::new(),
            rng,
            evicted: 0,
        };
        fw.apply_viewport(viewport);
        Ok(fw)
    }

    pub fn is_inert(&self) -> bool {
        self.surface.is_none()
    }

    /// Start a burst at (x, y). Returns false only when the subsystem is inert.
    pub fn launch(&mut self, x: f64, y: f64) -> bool {
        if self.is_inert() {
            return false;
        }
        let burst = Burst::new(x, y, &self.cfg, &mut self.rng);
        log::debug!("fireworks: launch at ({x:.0}, {y:.0}) with {} particles", burst.len());
        self.push_burst(burst);
        true
    }

    /// Launch somewhere in the sky band at the top of the viewport.
    pub fn launch_random(&mut self) -> Option<(f64, f64)> {
        let x = self.rng.f64() * self.viewport.width;
        let y = self.rng.f64() * self.viewport.height * self.cfg.sky_fraction;
        self.launch(x, y).then_some((x, y))
    }

    /// Add a prepared burst, evicting the oldest ones over the cap.
    pub fn push_burst(&mut self, burst: Burst) {
        if self.is_inert() {
            return;
        }
        while self.bursts.len() >= self.cfg.max_bursts {
            self.bursts.pop_front();
            self.evicted += 1;
            log::debug!("fireworks: burst cap {} reached, dropped oldest", self.cfg.max_bursts);
        }
        self.bursts.push_back(burst);
    }

    pub fn bursts(&self) -> impl Iterator<Item = &Burst> {
        self.bursts.iter()
    }

    pub fn burst_count(&self) -> usize {
        self.bursts.len()
    }

    pub fn particle_count(&self) -> usize {
        self.bursts.iter().map(Burst::len).sum()
    }

    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &FireworksConfig {
        &self.cfg
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// One frame: fade, simulate, cull, paint.
    pub fn tick(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let (w, h) = (self.viewport.width, self.viewport.height);

        if self.bursts.is_empty() {
            surface.set_composite(Composite::SourceOver);
            surface.clear_rect(0.0, 0.0, w, h);
            return;
        }

        surface.set_composite(Composite::DestinationOut);
        surface.set_fill(Paint::Rgba(0, 0, 0, self.cfg.trail_alpha));
        surface.fill_rect(0.0, 0.0, w, h);

        surface.set_composite(Composite::Lighter);
        for burst in self.bursts.iter_mut() {
            burst.step();
            burst.draw(surface, &self.cfg, &mut self.rng);
        }
        self.bursts.retain(|b| !b.is_spent());

        surface.set_composite(Composite::SourceOver);
    }

    // Resizing the backing store wipes pixels and the transform, so the
    // density scale is reapplied every time.
    fn apply_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.resize_backing(viewport.pixel_width(), viewport.pixel_height());
        surface.set_scale(viewport.dpr, viewport.dpr);
        log::debug!(
            "fireworks: surface {}x{} at {}x",
            viewport.pixel_width(),
            viewport.pixel_height(),
            viewport.dpr
        );
    }
}

impl<S: Surface> Updatable for Fireworks<S> {
    fn update(&mut self, _pointer_x: f64, _pointer_y: f64) {
        self.tick();
    }

    fn resize(&mut self, viewport: Viewport) {
        self.apply_viewport(viewport);
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::surface::{DrawOp, Recorder};

    fn fireworks(cfg: FireworksConfig) -> Fireworks<Recorder> {
        Fireworks::new(
            Some(Recorder::new()),
            Viewport::new(800.0, 600.0, 2.0),
            cfg,
            Rng::with_seed(42),
        )
        .unwrap()
    }

    #[test]
    fn construction_sizes_surface() {
        let fw = fireworks(FireworksConfig::default());
        let s = fw.surface().unwrap();
        assert_eq!((s.pixel_width, s.pixel_height), (1600, 1200));
        assert_eq!(s.scale, (2.0, 2.0));
    }

    #[test]
    fn idle_tick_clears_whole_viewport() {
        let mut fw = fireworks(FireworksConfig::default());
        fw.tick();
        assert_eq!(
            fw.surface().unwrap().ops(),
            &[DrawOp::Clear { x: 0.0, y: 0.0, w: 800.0, h: 600.0 }]
        );
        assert_eq!(fw.burst_count(), 0);
    }

    #[test]
    fn busy_tick_fades_then_adds() {
        let mut fw = fireworks(FireworksConfig::default());
        fw.launch(100.0, 100.0);
        fw.tick();
        let ops = fw.surface().unwrap().ops();
        match &ops[0] {
            DrawOp::Rect { paint, mode, w, h, .. } => {
                assert_eq!(*mode, Composite::DestinationOut);
                assert_eq!(paint.alpha(), 0.18);
                assert_eq!((*w, *h), (800.0, 600.0));
            }
            op => panic!("expected fade rect, got {op:?}"),
        }
        assert!(ops[1..].iter().all(|op| matches!(
            op,
            DrawOp::Circle { mode: Composite::Lighter, .. }
        )));
    }

    #[test]
    fn cap_evicts_oldest_first() {
        let mut fw = fireworks(FireworksConfig {
            max_bursts: 3,
            ..Default::default()
        });
        for i in 0..5 {
            fw.launch(i as f64, 0.0);
        }
        assert_eq!(fw.burst_count(), 3);
        assert_eq!(fw.evicted(), 2);
        let xs: Vec<f64> = fw.bursts().map(|b| b.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn rejects_invalid_config() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        let zero_cap = FireworksConfig {
            max_bursts: 0,
            ..Default::default()
        };
        let inverted = FireworksConfig {
            particles_min: 90,
            particles_max: 10,
            ..Default::default()
        };
        let backwards_decay = FireworksConfig {
            decay_min: 0.05,
            decay_max: 0.01,
            ..Default::default()
        };
        for cfg in [zero_cap, inverted, backwards_decay] {
            let res = Fireworks::new(Some(Recorder::new()), vp, cfg, Rng::with_seed(1));
            assert!(matches!(res, Err(EngineError::Config(_))));
        }
    }

    #[test]
    fn single_burst_cap_replaces_previous() {
        let mut fw = fireworks(FireworksConfig {
            max_bursts: 1,
            ..Default::default()
        });
        assert!(fw.launch(1.0, 1.0));
        assert!(fw.launch(2.0, 2.0));
        assert_eq!(fw.burst_count(), 1);
        assert_eq!(fw.bursts().next().map(|b| b.x), Some(2.0));
    }

    #[test]
    fn missing_surface_is_inert() {
        let mut fw: Fireworks<Recorder> = Fireworks::new(
            None,
            Viewport::new(800.0, 600.0, 1.0),
            FireworksConfig::default(),
            Rng::with_seed(1),
        )
        .unwrap();
        assert!(fw.is_inert());
        assert!(!fw.launch(10.0, 10.0));
        assert_eq!(fw.launch_random(), None);
        fw.tick();
        assert_eq!(fw.burst_count(), 0);
    }
}

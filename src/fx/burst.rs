// burst.rs - One firework explosion
//
// Owns its particle pool. Particles are compacted in place each tick,
// so removal never skips an element.

use fastrand::Rng;

use super::particle::Particle;
use crate::config::FireworksConfig;
use crate::surface::{Paint, Surface};

/// Alpha multiplier on the dim phase of a twinkling spark.
const TWINKLE_DIM: f64 = 0.35;

#[derive(Debug, Clone)]
pub struct Burst {
    pub x: f64,
    pub y: f64,
    pub hue: f64,
    particles: Vec<Particle>,
}

impl Burst {
    pub fn new(x: f64, y: f64, cfg: &FireworksConfig, rng: &mut Rng) -> Self {
        let hue = rng.f64() * 360.0;
        let count = rng.usize(cfg.particles_min..=cfg.particles_max);
        let particles = (0..count).map(|_| Particle::spawn(x, y, cfg, rng)).collect();
        Self { x, y, hue, particles }
    }

    /// Burst with a caller-built pool.
    pub fn from_particles(x: f64, y: f64, hue: f64, particles: Vec<Particle>) -> Self {
        Self { x, y, hue, particles }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_spent(&self) -> bool {
        self.particles.is_empty()
    }

    /// Advance every particle and drop the burnt-out ones.
    pub fn step(&mut self) {
        let mut write = 0;
        for read in 0..self.particles.len() {
            if !self.particles[read].step() {
                continue;
            }
            self.particles.swap(write, read);
            write += 1;
        }
        self.particles.truncate(write);
    }

    pub fn draw<S: Surface>(&self, surface: &mut S, cfg: &FireworksConfig, rng: &mut Rng) {
        for p in &self.particles {
            let mut a = p.alpha.clamp(0.0, 1.0);
            if p.twinkle && rng.bool() {
                a *= TWINKLE_DIM;
            }
            surface.set_fill(Paint::Hsla {
                h: self.hue + p.hue_offset,
                s: cfg.saturation,
                l: cfg.lightness,
                a,
            });
            surface.fill_circle(p.x, p.y, p.radius);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, Recorder};

    fn spark(decay: f64) -> Particle {
        Particle {
            x: 5.0,
            y: 5.0,
            vx: 0.0,
            vy: 0.0,
            alpha: 1.0,
            hue_offset: 10.0,
            friction: 1.0,
            gravity: 0.0,
            decay,
            radius: 1.5,
            twinkle: false,
        }
    }

    #[test]
    fn particle_count_within_config_range() {
        let cfg = FireworksConfig::default();
        let mut rng = Rng::with_seed(3);
        for _ in 0..50 {
            let b = Burst::new(0.0, 0.0, &cfg, &mut rng);
            assert!((cfg.particles_min..=cfg.particles_max).contains(&b.len()));
            assert!((0.0..360.0).contains(&b.hue));
        }
    }

    #[test]
    fn step_removes_expired_without_skipping() {
        // Alternate short and long lived sparks so removals are adjacent to survivors.
        let particles = (0..10)
            .map(|i| spark(if i % 2 == 0 { 0.5 } else { 0.1 }))
            .collect();
        let mut b = Burst::from_particles(0.0, 0.0, 0.0, particles);
        b.step();
        assert_eq!(b.len(), 10);
        b.step();
        assert_eq!(b.len(), 5);
        assert!(b.particles().iter().all(|p| p.decay == 0.1));
    }

    #[test]
    fn count_never_grows() {
        let cfg = FireworksConfig::default();
        let mut rng = Rng::with_seed(11);
        let mut b = Burst::new(50.0, 50.0, &cfg, &mut rng);
        let mut last = b.len();
        while !b.is_spent() {
            b.step();
            assert!(b.len() <= last);
            last = b.len();
        }
    }

    #[test]
    fn draw_uses_burst_hue_and_particle_alpha() {
        let mut p = spark(0.25);
        p.step();
        let b = Burst::from_particles(0.0, 0.0, 200.0, vec![p]);
        let mut rec = Recorder::new();
        b.draw(&mut rec, &FireworksConfig::default(), &mut Rng::with_seed(1));
        match &rec.ops()[0] {
            DrawOp::Circle { x, r, paint, .. } => {
                assert_eq!((*x, *r), (5.0, 1.5));
                assert_eq!(
                    *paint,
                    Paint::Hsla { h: 210.0, s: 100.0, l: 60.0, a: 0.75 }
                );
            }
            op => panic!("unexpected op {op:?}"),
        }
    }
}

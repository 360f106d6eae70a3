// particle.rs - Single spark
//
// Position and velocity in CSS pixels per tick. Alpha starts at 1 and
// only ever goes down; the owning burst drops the particle the tick it
// reaches zero.

use fastrand::Rng;

use super::lerp;
use crate::config::FireworksConfig;

/// Alpha at or below this counts as zero, so `1 / decay` ticks always
/// expire a particle despite float rounding.
pub const EXPIRED: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub alpha: f64,
    pub hue_offset: f64,
    pub friction: f64,
    pub gravity: f64,
    pub decay: f64,
    pub radius: f64,
    pub twinkle: bool,
}

impl Particle {
    /// Spark leaving (x, y) in a uniformly random direction.
    pub fn spawn(x: f64, y: f64, cfg: &FireworksConfig, rng: &mut Rng) -> Self {
        let angle = rng.f64() * std::f64::consts::TAU;
        let speed = lerp(cfg.speed_min, cfg.speed_max, rng.f64());
        Self {
            x,
            y,
            vx: angle.cos() * speed,
            vy: angle.sin() * speed,
            alpha: 1.0,
            hue_offset: rng.f64() * cfg.hue_spread,
            friction: cfg.friction,
            gravity: cfg.gravity,
            decay: lerp(cfg.decay_min, cfg.decay_max, rng.f64()),
            radius: lerp(cfg.radius_min, cfg.radius_max, rng.f64()),
            twinkle: rng.f64() < cfg.twinkle_chance,
        }
    }

    /// Advance one tick. Returns false once the spark has burnt out.
    #[inline]
    pub fn step(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += self.gravity;
        self.vx *= self.friction;
        self.vy *= self.friction;
        self.alpha -= self.decay;
        self.alpha > EXPIRED
    }
}

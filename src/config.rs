// config.rs - Tunable constants
//
// Every section defaults independently, so a partial JSON document
// only overrides the keys it names.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fireworks: FireworksConfig,
    pub salvo: SalvoConfig,
    pub parallax: ParallaxConfig,
    pub countdown: CountdownConfig,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> EngineResult<()> {
        self.fireworks.validate()?;
        self.salvo.validate()
    }
}

/// Burst and particle physics. Velocities are in CSS pixels per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireworksConfig {
    pub particles_min: usize,
    pub particles_max: usize,
    pub speed_min: f64,
    pub speed_max: f64,
    pub gravity: f64,
    /// Velocity multiplier applied every tick; 1.0 means no damping.
    pub friction: f64,
    pub decay_min: f64,
    pub decay_max: f64,
    pub radius_min: f64,
    pub radius_max: f64,
    pub hue_spread: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub twinkle_chance: f64,
    /// Alpha of the erase pass; smaller keeps longer trails.
    pub trail_alpha: f64,
    /// Share of the viewport height, from the top, that random launches use.
    pub sky_fraction: f64,
    pub max_bursts: usize,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            particles_min: 70,
            particles_max: 110,
            speed_min: 1.5,
            speed_max: 6.0,
            gravity: 0.05,
            friction: 0.985,
            decay_min: 0.010,
            decay_max: 0.018,
            radius_min: 1.2,
            radius_max: 2.8,
            hue_spread: 60.0,
            saturation: 100.0,
            lightness: 60.0,
            twinkle_chance: 0.2,
            trail_alpha: 0.18,
            sky_fraction: 0.45,
            max_bursts: 32,
        }
    }
}

impl FireworksConfig {
    pub fn validate(&self) -> EngineResult<()> {
        if self.particles_min == 0 || self.particles_min > self.particles_max {
            return Err(EngineError::config(format!(
                "particle range {}..={} is empty",
                self.particles_min, self.particles_max
            )));
        }
        if self.speed_min < 0.0 || self.speed_min > self.speed_max {
            return Err(EngineError::config("speed range must be ordered and non-negative"));
        }
        if !(self.decay_min > 0.0 && self.decay_min <= self.decay_max) {
            return Err(EngineError::config("decay range must be positive and ordered"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(EngineError::config(format!("friction {} outside (0, 1]", self.friction)));
        }
        if self.radius_min < 0.0 || self.radius_min > self.radius_max {
            return Err(EngineError::config("radius range must be ordered and non-negative"));
        }
        if !(self.trail_alpha > 0.0 && self.trail_alpha <= 1.0) {
            return Err(EngineError::config("trail_alpha outside (0, 1]"));
        }
        if !(self.sky_fraction > 0.0 && self.sky_fraction <= 0.5) {
            return Err(EngineError::config("sky_fraction outside (0, 0.5]"));
        }
        if !(0.0..=1.0).contains(&self.twinkle_chance) {
            return Err(EngineError::config("twinkle_chance outside [0, 1]"));
        }
        if self.max_bursts == 0 {
            return Err(EngineError::config("max_bursts must be at least 1"));
        }
        Ok(())
    }
}

/// Timed launch volleys, all times in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalvoConfig {
    pub per_click: usize,
    pub click_spacing_ms: f64,

    pub opening_delay_ms: f64,
    pub opening_count: usize,
    pub opening_spacing_ms: f64,
    pub opening_waves: usize,
    pub opening_wave_start_ms: f64,
    pub opening_wave_every_ms: f64,
    pub opening_wave_size: usize,

    pub celebration_delay_ms: f64,
    pub celebration_count: usize,
    pub celebration_spacing_ms: f64,
    pub celebration_waves: usize,
    pub celebration_wave_start_ms: f64,
    pub celebration_wave_every_ms: f64,
    pub celebration_wave_size: usize,

    pub wave_spacing_ms: f64,
}

impl Default for SalvoConfig {
    fn default() -> Self {
        Self {
            per_click: 5,
            click_spacing_ms: 200.0,

            opening_delay_ms: 2000.0,
            opening_count: 5,
            opening_spacing_ms: 150.0,
            opening_waves: 2,
            opening_wave_start_ms: 5000.0,
            opening_wave_every_ms: 10_000.0,
            opening_wave_size: 3,

            celebration_delay_ms: 800.0,
            celebration_count: 12,
            celebration_spacing_ms: 120.0,
            celebration_waves: 5,
            celebration_wave_start_ms: 2000.0,
            celebration_wave_every_ms: 5000.0,
            celebration_wave_size: 4,

            wave_spacing_ms: 200.0,
        }
    }
}

impl SalvoConfig {
    pub fn validate(&self) -> EngineResult<()> {
        let times = [
            self.click_spacing_ms,
            self.opening_delay_ms,
            self.opening_spacing_ms,
            self.opening_wave_start_ms,
            self.opening_wave_every_ms,
            self.celebration_delay_ms,
            self.celebration_spacing_ms,
            self.celebration_wave_start_ms,
            self.celebration_wave_every_ms,
            self.wave_spacing_ms,
        ];
        if times.iter().any(|t| !t.is_finite() || *t < 0.0) {
            return Err(EngineError::config("salvo timings must be finite and non-negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Offset in CSS pixels when the pointer sits on a viewport edge, peak to peak.
    pub strength: f64,
    pub content_depth: f64,
    pub snow_depth: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            strength: 20.0,
            content_depth: 1.0,
            snow_depth: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Target instant in milliseconds since the Unix epoch. `None` disables the countdown.
    pub target_ms: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = EngineConfig::from_json(r#"{ "fireworks": { "max_bursts": 4 } }"#).unwrap();
        assert_eq!(cfg.fireworks.max_bursts, 4);
        assert_eq!(cfg.fireworks.particles_min, 70);
        assert_eq!(cfg.salvo, SalvoConfig::default());
    }

    #[test]
    fn rejects_inverted_particle_range() {
        let err = EngineConfig::from_json(
            r#"{ "fireworks": { "particles_min": 90, "particles_max": 10 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn rejects_sky_below_half_viewport() {
        let cfg = FireworksConfig {
            sky_fraction: 0.8,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_timing() {
        let cfg = SalvoConfig {
            wave_spacing_ms: -1.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_json_is_json_error() {
        assert!(matches!(
            EngineConfig::from_json("{").unwrap_err(),
            EngineError::Json(_)
        ));
    }
}

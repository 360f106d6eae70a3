// salvo.rs - Timed launch queue
//
// Volleys are expanded into absolute launch times up front and fired
// from the frame loop as they come due.

use crate::config::SalvoConfig;
use crate::fx::Fireworks;
use crate::surface::Surface;

pub struct Salvo {
    cfg: SalvoConfig,
    // Sorted latest first so the next due launch is at the end.
    due: Vec<f64>,
}

impl Salvo {
    pub fn new(cfg: SalvoConfig) -> Self {
        Self { cfg, due: Vec::new() }
    }

    pub fn schedule(&mut self, at_ms: f64) {
        let idx = self.due.partition_point(|&t| t > at_ms);
        self.due.insert(idx, at_ms);
    }

    fn volley(&mut self, start_ms: f64, count: usize, spacing_ms: f64) {
        for i in 0..count {
            self.schedule(start_ms + i as f64 * spacing_ms);
        }
    }

    /// Page-load show: a short volley, then a few sparse waves.
    pub fn opening(&mut self, start_ms: f64) {
        let c = self.cfg.clone();
        self.volley(start_ms + c.opening_delay_ms, c.opening_count, c.opening_spacing_ms);
        for wave in 0..c.opening_waves {
            let at = start_ms + c.opening_wave_start_ms + wave as f64 * c.opening_wave_every_ms;
            self.volley(at, c.opening_wave_size, c.wave_spacing_ms);
        }
    }

    /// Countdown finale: a dense volley followed by regular waves.
    pub fn celebration(&mut self, start_ms: f64) {
        let c = self.cfg.clone();
        let start = start_ms + c.celebration_delay_ms;
        self.volley(start, c.celebration_count, c.celebration_spacing_ms);
        for wave in 0..c.celebration_waves {
            let at = start + c.celebration_wave_start_ms + wave as f64 * c.celebration_wave_every_ms;
            self.volley(at, c.celebration_wave_size, c.wave_spacing_ms);
        }
    }

    /// Launch button press.
    pub fn click(&mut self, start_ms: f64) {
        let (n, spacing) = (self.cfg.per_click, self.cfg.click_spacing_ms);
        self.volley(start_ms, n, spacing);
    }

    pub fn pending(&self) -> usize {
        self.due.len()
    }

    pub fn next_due(&self) -> Option<f64> {
        self.due.last().copied()
    }

    /// Fire every launch due at `now_ms`. Returns how many fired.
    pub fn poll<S: Surface>(&mut self, now_ms: f64, fireworks: &mut Fireworks<S>) -> usize {
        let mut fired = 0;
        while self.due.last().is_some_and(|&t| t <= now_ms) {
            self.due.pop();
            fireworks.launch_random();
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_keeps_earliest_last() {
        let mut s = Salvo::new(SalvoConfig::default());
        for t in [30.0, 10.0, 20.0, 10.0] {
            s.schedule(t);
        }
        assert_eq!(s.due, vec![30.0, 20.0, 10.0, 10.0]);
        assert_eq!(s.next_due(), Some(10.0));
    }

    #[test]
    fn opening_counts_and_first_launch() {
        let mut s = Salvo::new(SalvoConfig::default());
        s.opening(1000.0);
        assert_eq!(s.pending(), 5 + 2 * 3);
        assert_eq!(s.next_due(), Some(3000.0));
    }

    #[test]
    fn celebration_counts_and_last_launch() {
        let mut s = Salvo::new(SalvoConfig::default());
        s.celebration(0.0);
        assert_eq!(s.pending(), 12 + 5 * 4);
        // Last wave: 800 + 2000 + 4 * 5000, plus three 200 ms gaps.
        assert_eq!(s.due.first().copied(), Some(23_400.0));
    }
}

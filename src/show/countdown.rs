// countdown.rs - Time left until the target instant

const SECOND_MS: f64 = 1000.0;
const MINUTE_MS: f64 = 60.0 * SECOND_MS;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;

/// Remaining time at which the page switches to its last-minute mode.
pub const LAST_MINUTE_MS: f64 = MINUTE_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Counting,
    LastMinute,
    Celebrating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Remaining {
    fn from_ms(distance: f64) -> Self {
        Self {
            days: (distance / DAY_MS).floor() as u64,
            hours: ((distance % DAY_MS) / HOUR_MS).floor() as u8,
            minutes: ((distance % HOUR_MS) / MINUTE_MS).floor() as u8,
            seconds: ((distance % MINUTE_MS) / SECOND_MS).floor() as u8,
        }
    }

    /// Days, hours, minutes, seconds, each zero-padded to two digits.
    pub fn digits(&self) -> [String; 4] {
        [
            format!("{:02}", self.days),
            format!("{:02}", self.hours),
            format!("{:02}", self.minutes),
            format!("{:02}", self.seconds),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Countdown {
    target_ms: f64,
    celebrated: bool,
}

impl Countdown {
    pub fn new(target_ms: f64) -> Self {
        Self {
            target_ms,
            celebrated: false,
        }
    }

    pub fn target_ms(&self) -> f64 {
        self.target_ms
    }

    /// `None` once the target has passed.
    pub fn remaining(&self, now_ms: f64) -> Option<Remaining> {
        let distance = self.target_ms - now_ms;
        (distance >= 0.0).then(|| Remaining::from_ms(distance))
    }

    pub fn phase(&self, now_ms: f64) -> Phase {
        let distance = self.target_ms - now_ms;
        if distance < 0.0 {
            Phase::Celebrating
        } else if distance > 0.0 && distance <= LAST_MINUTE_MS {
            Phase::LastMinute
        } else {
            Phase::Counting
        }
    }

    /// True exactly once: on the first poll after the target passed.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if self.celebrated || self.phase(now_ms) != Phase::Celebrating {
            return false;
        }
        self.celebrated = true;
        log::info!("countdown: target reached, celebrating");
        true
    }

    pub fn has_celebrated(&self) -> bool {
        self.celebrated
    }
}

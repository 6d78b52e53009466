//! Playback clock driving successive render passes

use hifitime::{Duration, Epoch};

use crate::time::JulianDate;

const DAYS_PER_YEAR: f64 = 365.25;
const PLAYBACK_SPAN_DAYS: f64 = 5000.0 * DAYS_PER_YEAR;

/// Simulation clock with variable playback rate, clamped to J2000 ± 5000 years
pub struct TimeController {
    current: Epoch,
    min_epoch: Epoch,
    max_epoch: Epoch,
    /// Sim seconds per real second; negative runs backwards
    rate: f64,
    paused: bool,
    /// Pause once playback reaches this instant
    stop: Option<Epoch>,
}

impl TimeController {
    /// Clock at J2000 running one day per second
    pub fn new() -> Self {
        let j2000 = JulianDate::J2000.to_epoch();

        Self {
            current: j2000,
            min_epoch: j2000 - Duration::from_days(PLAYBACK_SPAN_DAYS),
            max_epoch: j2000 + Duration::from_days(PLAYBACK_SPAN_DAYS),
            rate: rates::DAY_PER_SEC,
            paused: false,
            stop: None,
        }
    }

    /// Clock starting at `epoch` (clamped to the playback span)
    pub fn at_epoch(epoch: Epoch) -> Self {
        let mut tc = Self::new();
        tc.set_time(epoch);
        tc
    }

    /// Current simulation time
    pub fn current(&self) -> Epoch {
        self.current
    }

    /// Current simulation time as a Julian date
    pub fn julian(&self) -> JulianDate {
        JulianDate::from_epoch(self.current)
    }

    /// Set current time, clamped to the playback span
    pub fn set_time(&mut self, epoch: Epoch) {
        self.current = epoch.clamp(self.min_epoch, self.max_epoch);
    }

    /// Set rate in sim seconds per real second
    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate.clamp(-1e12, 1e12);
    }

    /// Set rate in Julian years per real second
    pub fn set_rate_years_per_second(&mut self, years: f64) {
        self.set_rate(years * DAYS_PER_YEAR * 86400.0);
    }

    /// Current rate in Julian years per real second
    pub fn rate_years_per_second(&self) -> f64 {
        self.rate / (DAYS_PER_YEAR * 86400.0)
    }

    /// Pause simulation
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Check if paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause when playback reaches `year`, from either direction
    pub fn stop_at_year(&mut self, year: f64) {
        let stop = JulianDate::J2000.plus_days((year - 2000.0) * DAYS_PER_YEAR);
        self.stop = Some(stop.to_epoch().clamp(self.min_epoch, self.max_epoch));
    }

    /// Advance by `real_dt_seconds` of wall time, scaled by the rate
    pub fn tick(&mut self, real_dt_seconds: f64) -> Epoch {
        if self.paused {
            return self.current;
        }

        let previous = self.current;
        let mut next = previous + Duration::from_seconds(real_dt_seconds * self.rate);

        if let Some(stop) = self.stop {
            let forward = previous < stop && next >= stop;
            let backward = previous > stop && next <= stop;
            if forward || backward || previous == stop {
                next = stop;
                self.paused = true;
                self.stop = None;
            }
        }

        self.set_time(next);
        self.current
    }

    /// Decimal year (Julian years from J2000)
    pub fn year(&self) -> f64 {
        2000.0 + self.julian().centuries_since_j2000() * 100.0
    }
}

impl Default for TimeController {
    fn default() -> Self {
        Self::new()
    }
}

/// Preset playback rates (sim seconds per real second)
pub mod rates {
    pub const DAY_PER_SEC: f64 = 86400.0;
    pub const WEEK_PER_SEC: f64 = 7.0 * 86400.0;
}

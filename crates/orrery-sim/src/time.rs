//! Wall-clock to Julian date conversion

use hifitime::Epoch;
use orrery_core::constants::{DAYS_PER_CENTURY, J2000, SECONDS_PER_DAY, UNIX_EPOCH_JULIAN};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Continuous day count (Julian date)
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JulianDate(pub f64);

impl JulianDate {
    pub const J2000: Self = Self(J2000);

    pub const fn days(self) -> f64 {
        self.0
    }

    pub fn from_posix_seconds(posix_seconds: f64) -> Self {
        julian_time(posix_seconds)
    }

    /// Calendar epoch to Julian date, through the same POSIX offset as [`julian_time`]
    pub fn from_epoch(epoch: Epoch) -> Self {
        julian_time(epoch.to_unix_seconds())
    }

    /// Inverse of [`JulianDate::from_epoch`]
    pub fn to_epoch(self) -> Epoch {
        Epoch::from_unix_seconds((self.0 - UNIX_EPOCH_JULIAN) * SECONDS_PER_DAY)
    }

    /// Current system time
    pub fn now() -> Self {
        let seconds = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_secs_f64(),
            Err(before) => -before.duration().as_secs_f64(),
        };
        julian_time(seconds)
    }

    /// Time argument of the secular element rates
    pub fn centuries_since_j2000(self) -> f64 {
        (self.0 - J2000) / DAYS_PER_CENTURY
    }

    pub fn plus_days(self, days: f64) -> Self {
        Self(self.0 + days)
    }
}

impl fmt::Display for JulianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.5}", self.0)
    }
}

/// POSIX seconds to Julian date
pub fn julian_time(posix_seconds: f64) -> JulianDate {
    let days = posix_seconds / SECONDS_PER_DAY;
    JulianDate(UNIX_EPOCH_JULIAN + days)
}

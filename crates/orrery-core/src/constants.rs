/// Julian date of the J2000.0 reference epoch
pub const J2000: f64 = 2451545.0;

/// Days in one Julian century
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/// Seconds in one day
pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Julian date assigned to the POSIX epoch (1970-01-01)
pub const UNIX_EPOCH_JULIAN: f64 = 2440588.0;

/// Kilometers to astronomical units
pub const KM_TO_AU: f64 = 6.6845871226706e-9;

/// Mean solar radius in km
pub const SUN_RADIUS_KM: f64 = 696340.0;

/// Mean obliquity of the ecliptic at J2000 (degrees)
pub const J2000_OBLIQUITY_DEG: f64 = 23.43928;

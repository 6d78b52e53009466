//! Keplerian orbital elements and their secular drift

use orrery_core::Degrees;
use serde::{Deserialize, Serialize};

use crate::time::JulianDate;

/// Six-element heliocentric orbit description referenced to the ecliptic
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU)
    pub semi_major_axis_au: f64,
    /// Eccentricity, in [0, 1) for the supported bodies
    pub eccentricity: f64,
    /// Inclination to the ecliptic
    pub inclination: Degrees,
    /// Mean longitude L
    pub mean_longitude: Degrees,
    /// Longitude of periapsis ϖ
    pub long_periapsis: Degrees,
    /// Longitude of the ascending node Ω
    pub long_ascending_node: Degrees,
}

impl OrbitalElements {
    pub const fn new(
        semi_major_axis_au: f64,
        eccentricity: f64,
        inclination: Degrees,
        mean_longitude: Degrees,
        long_periapsis: Degrees,
        long_ascending_node: Degrees,
    ) -> Self {
        Self {
            semi_major_axis_au,
            eccentricity,
            inclination,
            mean_longitude,
            long_periapsis,
            long_ascending_node,
        }
    }

    /// M = L - ϖ (unreduced)
    pub fn mean_anomaly(&self) -> Degrees {
        self.mean_longitude - self.long_periapsis
    }

    /// ω = ϖ - Ω
    pub fn argument_of_periapsis(&self) -> Degrees {
        self.long_periapsis - self.long_ascending_node
    }

    pub fn semi_minor_axis_au(&self) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }

    /// Bound orbit: a > 0 and 0 ≤ e < 1
    pub fn is_elliptical(&self) -> bool {
        self.semi_major_axis_au > 0.0 && (0.0..1.0).contains(&self.eccentricity)
    }

    /// True anomaly from eccentric anomaly
    pub fn true_anomaly(&self, eccentric_anomaly: Degrees) -> Degrees {
        let e = self.eccentricity;
        let half = eccentric_anomaly.to_radians().0 / 2.0;
        // tan(ν/2) = sqrt((1+e)/(1-e)) * tan(E/2), quadrant-safe
        let nu = 2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos());
        Degrees(nu.to_degrees())
    }

    /// Focal distance at a given true anomaly (AU)
    pub fn radius_at(&self, true_anomaly: Degrees) -> f64 {
        let e = self.eccentricity;
        self.semi_major_axis_au * (1.0 - e * e) / (1.0 + e * true_anomaly.cos())
    }

    /// Focal distance at a given eccentric anomaly (AU)
    pub fn radius_at_eccentric(&self, eccentric_anomaly: Degrees) -> f64 {
        self.semi_major_axis_au * (1.0 - self.eccentricity * eccentric_anomaly.cos())
    }

    /// Apply linear secular rates over `centuries`
    pub fn advanced(&self, rates: &SecularRates, centuries: f64) -> OrbitalElements {
        OrbitalElements {
            semi_major_axis_au: self.semi_major_axis_au + rates.semi_major_axis_au * centuries,
            eccentricity: self.eccentricity + rates.eccentricity * centuries,
            inclination: self.inclination + rates.inclination * centuries,
            mean_longitude: self.mean_longitude + rates.mean_longitude * centuries,
            long_periapsis: self.long_periapsis + rates.long_periapsis * centuries,
            long_ascending_node: self.long_ascending_node + rates.long_ascending_node * centuries,
        }
    }

    /// Elements valid at `t`, given that `self` is valid at J2000
    pub fn propagate(&self, rates: &SecularRates, t: JulianDate) -> OrbitalElements {
        self.advanced(rates, t.centuries_since_j2000())
    }
}

/// Per-Julian-century rate of change of each element
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SecularRates {
    /// AU / century
    pub semi_major_axis_au: f64,
    /// 1 / century
    pub eccentricity: f64,
    pub inclination: Degrees,
    pub mean_longitude: Degrees,
    pub long_periapsis: Degrees,
    pub long_ascending_node: Degrees,
}

impl SecularRates {
    pub const fn new(
        semi_major_axis_au: f64,
        eccentricity: f64,
        inclination: Degrees,
        mean_longitude: Degrees,
        long_periapsis: Degrees,
        long_ascending_node: Degrees,
    ) -> Self {
        Self {
            semi_major_axis_au,
            eccentricity,
            inclination,
            mean_longitude,
            long_periapsis,
            long_ascending_node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn mars_like() -> (OrbitalElements, SecularRates) {
        (
            OrbitalElements::new(
                1.52371034,
                0.09339410,
                Degrees(1.84969142),
                Degrees(-4.55343205),
                Degrees(-23.94362959),
                Degrees(49.55953891),
            ),
            SecularRates::new(
                0.00001847,
                0.00007882,
                Degrees(-0.00813131),
                Degrees(19140.30268499),
                Degrees(0.44441088),
                Degrees(-0.29257343),
            ),
        )
    }

    #[test]
    fn test_zero_centuries_is_identity() {
        let (base, rates) = mars_like();
        assert_eq!(base.advanced(&rates, 0.0), base);
    }

    #[test]
    fn test_fields_are_independent_and_linear() {
        let (base, rates) = mars_like();
        let half = base.advanced(&rates, 0.5);
        let full = base.advanced(&rates, 1.0);

        assert_abs_diff_eq!(
            full.mean_longitude.0 - half.mean_longitude.0,
            half.mean_longitude.0 - base.mean_longitude.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(full.eccentricity - base.eccentricity, rates.eccentricity, epsilon = 1e-15);

        // Zero rate leaves a field untouched
        let frozen = SecularRates { mean_longitude: Degrees::ZERO, ..rates };
        assert_eq!(base.advanced(&frozen, 3.0).mean_longitude, base.mean_longitude);
    }

    #[test]
    fn test_derived_angles() {
        let (base, _) = mars_like();
        assert_abs_diff_eq!(base.mean_anomaly().0, 19.39019754, epsilon = 1e-12);
        assert_abs_diff_eq!(base.argument_of_periapsis().0, -73.5031685, epsilon = 1e-12);
    }

    #[test]
    fn test_true_anomaly_at_apsides() {
        let (base, _) = mars_like();
        assert_abs_diff_eq!(base.true_anomaly(Degrees(0.0)).0, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(base.true_anomaly(Degrees(180.0)).0.abs(), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(base.radius_at(Degrees(0.0)), 1.52371034 * (1.0 - 0.09339410), epsilon = 1e-12);
    }

    #[test]
    fn test_semi_minor_axis() {
        let circle = OrbitalElements::new(2.0, 0.0, Degrees::ZERO, Degrees::ZERO, Degrees::ZERO, Degrees::ZERO);
        assert_eq!(circle.semi_minor_axis_au(), 2.0);
        assert!(circle.is_elliptical());

        let parabola = OrbitalElements { eccentricity: 1.0, ..circle };
        assert!(!parabola.is_elliptical());
    }
}

//! Body catalog
//!
//! Keplerian elements and secular rates from the JPL approximate planetary
//! positions tables (valid 1800-2050 AD), reference epoch J2000.0.

use orrery_core::constants::KM_TO_AU;
use orrery_core::Degrees;
use serde::{Deserialize, Serialize};

use crate::elements::{OrbitalElements, SecularRates};
use crate::time::JulianDate;

/// Body identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyId {
    Mercury,
    Venus,
    Earth,
    Mars,
}

impl BodyId {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Mars => "Mars",
        }
    }

    /// Catalog entry for this body
    pub fn body(&self) -> &'static Body {
        match self {
            Self::Mercury => &CATALOG[0],
            Self::Venus => &CATALOG[1],
            Self::Earth => &CATALOG[2],
            Self::Mars => &CATALOG[3],
        }
    }

    pub fn all() -> &'static [BodyId] {
        &[Self::Mercury, Self::Venus, Self::Earth, Self::Mars]
    }
}

impl std::str::FromStr for BodyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|id| id.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown body: {s}"))
    }
}

/// Immutable body record: physical size plus J2000 elements and their drift
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub id: BodyId,
    /// Mean radius in km
    pub radius_km: f64,
    pub base: OrbitalElements,
    pub rates: SecularRates,
}

impl Body {
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn radius_au(&self) -> f64 {
        self.radius_km * KM_TO_AU
    }

    /// Elements propagated to `t`
    pub fn elements_at(&self, t: JulianDate) -> OrbitalElements {
        propagate(self, t)
    }
}

/// Element set valid at `t`: base + rate · centuries since J2000, per field
pub fn propagate(body: &Body, t: JulianDate) -> OrbitalElements {
    body.base.propagate(&body.rates, t)
}

/// All catalogued bodies, innermost first
pub fn catalog() -> &'static [Body] {
    &CATALOG
}

//                                  a (AU)       e            i (deg)                L (deg)                   ϖ (deg)                  Ω (deg)
static CATALOG: [Body; 4] = [
    Body {
        id: BodyId::Mercury,
        radius_km: 2439.7,
        base: OrbitalElements::new(0.38709927, 0.20563593, Degrees(7.00497902), Degrees(252.25032350), Degrees(77.45779628), Degrees(48.33076593)),
        rates: SecularRates::new(0.00000037, 0.00001906, Degrees(-0.00594749), Degrees(149472.67411175), Degrees(0.16047689), Degrees(-0.12534081)),
    },
    Body {
        id: BodyId::Venus,
        radius_km: 6051.8,
        base: OrbitalElements::new(0.72333566, 0.00677672, Degrees(3.39467605), Degrees(181.97909950), Degrees(131.60246718), Degrees(76.67984255)),
        rates: SecularRates::new(0.00000390, -0.00004107, Degrees(-0.00078890), Degrees(58517.81538729), Degrees(0.00268329), Degrees(-0.27769418)),
    },
    Body {
        id: BodyId::Earth,
        radius_km: 6371.0,
        base: OrbitalElements::new(1.00000261, 0.01671123, Degrees(-0.00001531), Degrees(100.46457166), Degrees(102.93768193), Degrees(0.0)),
        rates: SecularRates::new(0.00000562, -0.00004392, Degrees(-0.01294668), Degrees(35999.37244981), Degrees(0.32327364), Degrees(0.0)),
    },
    Body {
        id: BodyId::Mars,
        radius_km: 3389.5,
        base: OrbitalElements::new(1.52371034, 0.09339410, Degrees(1.84969142), Degrees(-4.55343205), Degrees(-23.94362959), Degrees(49.55953891)),
        rates: SecularRates::new(0.00001847, 0.00007882, Degrees(-0.00813131), Degrees(19140.30268499), Degrees(0.44441088), Degrees(-0.29257343)),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_lookup() {
        let ids: Vec<BodyId> = catalog().iter().map(|b| b.id).collect();
        assert_eq!(ids, BodyId::all());
        for id in BodyId::all() {
            assert_eq!(id.body().id, *id);
        }
        assert_eq!("mars".parse::<BodyId>(), Ok(BodyId::Mars));
        assert!("pluto".parse::<BodyId>().is_err());
    }

    #[test]
    fn test_elements_are_elliptical() {
        for body in catalog() {
            assert!(body.base.is_elliptical(), "{} base", body.name());
            assert!(body.base.eccentricity < 0.21);
            assert!(body.elements_at(JulianDate::J2000.plus_days(36525.0)).is_elliptical());
        }
    }

    #[test]
    fn test_propagate_at_j2000_is_base() {
        for body in catalog() {
            assert_eq!(propagate(body, JulianDate::J2000), body.base);
        }
    }

    #[test]
    fn test_propagate_one_century() {
        let t = JulianDate(2451545.0 + 36525.0);
        for body in catalog() {
            let p = propagate(body, t);
            let (b, r) = (&body.base, &body.rates);
            assert_eq!(p.semi_major_axis_au, b.semi_major_axis_au + r.semi_major_axis_au);
            assert_eq!(p.eccentricity, b.eccentricity + r.eccentricity);
            assert_eq!(p.inclination, b.inclination + r.inclination);
            assert_eq!(p.mean_longitude, b.mean_longitude + r.mean_longitude);
            assert_eq!(p.long_periapsis, b.long_periapsis + r.long_periapsis);
            assert_eq!(p.long_ascending_node, b.long_ascending_node + r.long_ascending_node);
        }
    }

    #[test]
    fn test_propagate_is_bit_identical() {
        let t = JulianDate(2460423.7319);
        for body in catalog() {
            let first = propagate(body, t);
            let second = propagate(body, t);
            assert_eq!(first.mean_longitude.0.to_bits(), second.mean_longitude.0.to_bits());
            assert_eq!(first.eccentricity.to_bits(), second.eccentricity.to_bits());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_radius_scaling() {
        let earth = BodyId::Earth.body();
        assert!((earth.radius_au() * 1e3 - 4.26e-2).abs() < 1e-3);
    }
}

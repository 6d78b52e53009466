//! Ellipse geometry for drawing an orbit

use orrery_core::{Degrees, Point2D};
use serde::{Deserialize, Serialize};

use crate::elements::OrbitalElements;

/// Ellipse parameters for a drawing backend.
///
/// Backends draw ellipses about their geometric center, so the Sun (one focus)
/// sits `focus_offset_au` from the center along the major axis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitShape {
    pub semi_major_axis_au: f64,
    pub semi_minor_axis_au: f64,
    /// a·e
    pub focus_offset_au: f64,
    /// Longitude of periapsis ϖ
    pub rotation: Degrees,
    /// Longitude of the ascending node Ω
    pub node: Degrees,
}

impl OrbitShape {
    /// Major-axis angle in the node-referenced display frame (ω = ϖ - Ω)
    pub fn display_rotation(&self) -> Degrees {
        self.rotation - self.node
    }

    /// Geometric center of the ellipse in the display frame
    pub fn center(&self) -> Point2D {
        Point2D::new(-self.focus_offset_au, 0.0).rotated(self.display_rotation().to_radians())
    }

    /// Point on the ellipse at a given eccentric anomaly, in the display frame
    pub fn point_at(&self, eccentric_anomaly: Degrees) -> Point2D {
        let local = Point2D::new(
            self.semi_major_axis_au * eccentric_anomaly.cos(),
            self.semi_minor_axis_au * eccentric_anomaly.sin(),
        );
        self.center() + local.rotated(self.display_rotation().to_radians())
    }

    pub fn periapsis_distance_au(&self) -> f64 {
        self.semi_major_axis_au - self.focus_offset_au
    }

    pub fn apoapsis_distance_au(&self) -> f64 {
        self.semi_major_axis_au + self.focus_offset_au
    }
}

pub fn shape(elements: &OrbitalElements) -> OrbitShape {
    OrbitShape {
        semi_major_axis_au: elements.semi_major_axis_au,
        semi_minor_axis_au: elements.semi_minor_axis_au(),
        focus_offset_au: elements.semi_major_axis_au * elements.eccentricity,
        rotation: elements.long_periapsis,
        node: elements.long_ascending_node,
    }
}

//! Eccentric anomaly + elements to heliocentric coordinates
//!
//! The flattened display position keeps only the ecliptic x/y components and
//! then de-rotates them by -Ω into the node-referenced frame the renderer uses.

use nalgebra::{Matrix3, Rotation2, Vector2, Vector3};
use orrery_core::constants::J2000_OBLIQUITY_DEG;
use orrery_core::{Degrees, Point2D};

use crate::elements::OrbitalElements;

/// Position in the orbital plane, x towards periapsis (AU)
pub fn perifocal(elements: &OrbitalElements, eccentric_anomaly: Degrees) -> Vector2<f64> {
    let a = elements.semi_major_axis_au;
    let e = elements.eccentricity;
    Vector2::new(
        a * (eccentric_anomaly.cos() - e),
        a * (1.0 - e * e).sqrt() * eccentric_anomaly.sin(),
    )
}

/// Rotation from the perifocal frame to the heliocentric ecliptic frame
pub fn perifocal_to_ecliptic(elements: &OrbitalElements) -> Matrix3<f64> {
    let w = elements.argument_of_periapsis();
    let (cos_w, sin_w) = (w.cos(), w.sin());
    let (cos_o, sin_o) = (elements.long_ascending_node.cos(), elements.long_ascending_node.sin());
    let (cos_i, sin_i) = (elements.inclination.cos(), elements.inclination.sin());

    // R_z(Ω) · R_x(i) · R_z(ω)
    Matrix3::new(
        cos_w * cos_o - sin_w * sin_o * cos_i,
        -sin_w * cos_o - cos_w * sin_o * cos_i,
        sin_o * sin_i,

        cos_w * sin_o + sin_w * cos_o * cos_i,
        -sin_w * sin_o + cos_w * cos_o * cos_i,
        -cos_o * sin_i,

        sin_w * sin_i,
        cos_w * sin_i,
        cos_i,
    )
}

/// Heliocentric ecliptic vector (x_ecl, y_ecl, z_ecl) in AU
pub fn ecliptic(elements: &OrbitalElements, eccentric_anomaly: Degrees) -> Vector3<f64> {
    let p = perifocal(elements, eccentric_anomaly);
    perifocal_to_ecliptic(elements) * Vector3::new(p.x, p.y, 0.0)
}

/// Heliocentric equatorial vector, rotated about x by the J2000 obliquity
pub fn equatorial(elements: &OrbitalElements, eccentric_anomaly: Degrees) -> Vector3<f64> {
    let ecl = ecliptic(elements, eccentric_anomaly);
    let eps = Degrees(J2000_OBLIQUITY_DEG);
    let (cos_e, sin_e) = (eps.cos(), eps.sin());
    Vector3::new(
        ecl.x,
        cos_e * ecl.y - sin_e * ecl.z,
        sin_e * ecl.y + cos_e * ecl.z,
    )
}

/// Flattened 2D placement in the node-referenced display frame (AU, Sun at origin)
pub fn project(elements: &OrbitalElements, eccentric_anomaly: Degrees) -> Point2D {
    let ecl = ecliptic(elements, eccentric_anomaly);
    let derotate = Rotation2::new((-elements.long_ascending_node).to_radians().0);
    let flat = derotate * Vector2::new(ecl.x, ecl.y);
    Point2D::new(flat.x, flat.y)
}

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::angle::Radians;

/// Heliocentric position in the display plane (AU, origin at the Sun)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Polar angle measured from +x
    pub fn angle(&self) -> Radians {
        Radians::atan2(self.y, self.x)
    }

    pub fn distance_to(&self, other: Point2D) -> f64 {
        (*self - other).magnitude()
    }

    /// Rotate counter-clockwise about the origin
    pub fn rotated(&self, angle: Radians) -> Self {
        let (s, c) = angle.0.sin_cos();
        Self::new(c * self.x - s * self.y, s * self.x + c * self.y)
    }
}

impl Add for Point2D {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

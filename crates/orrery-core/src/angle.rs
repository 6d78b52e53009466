//! Angle units
//!
//! Orbital elements mix degree and radian quantities. Wrapping each in its own
//! type keeps the conversions explicit at every call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Angle in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

macro_rules! angle_arithmetic {
    ($unit:ident) => {
        impl $unit {
            pub const ZERO: Self = Self(0.0);

            /// Wrap a raw value in this unit
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Raw value in this unit
            pub const fn value(self) -> f64 {
                self.0
            }

            /// Magnitude, same unit
            pub fn abs(self) -> Self {
                Self(self.0.abs())
            }
        }

        impl Add for $unit {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $unit {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl AddAssign for $unit {
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl SubAssign for $unit {
            fn sub_assign(&mut self, rhs: Self) {
                self.0 -= rhs.0;
            }
        }

        impl Neg for $unit {
            type Output = Self;
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $unit {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $unit {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }
    };
}

angle_arithmetic!(Degrees);
angle_arithmetic!(Radians);

impl Degrees {
    /// Convert to radians
    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }

    /// Sine of the angle
    pub fn sin(self) -> f64 {
        self.to_radians().sin()
    }

    /// Cosine of the angle
    pub fn cos(self) -> f64 {
        self.to_radians().cos()
    }

    /// Floating-point remainder by a full turn, keeping the sign: result is in (-360, 360)
    pub fn reduced(self) -> Self {
        Self(self.0 % 360.0)
    }

    /// Wrap into [0, 360)
    pub fn normalized(self) -> Self {
        Self(self.0.rem_euclid(360.0))
    }
}

impl Radians {
    /// Convert to degrees
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }

    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    pub fn cos(self) -> f64 {
        self.0.cos()
    }

    /// Four-quadrant angle of the vector (x, y)
    pub fn atan2(y: f64, x: f64) -> Self {
        Self(y.atan2(x))
    }
}

impl From<Degrees> for Radians {
    fn from(angle: Degrees) -> Self {
        angle.to_radians()
    }
}

impl From<Radians> for Degrees {
    fn from(angle: Radians) -> Self {
        angle.to_degrees()
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(precision) = f.precision() {
            write!(f, "{:.*}°", precision, self.0)
        } else {
            write!(f, "{}°", self.0)
        }
    }
}

impl fmt::Display for Radians {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(precision) = f.precision() {
            write!(f, "{:.*} rad", precision, self.0)
        } else {
            write!(f, "{} rad", self.0)
        }
    }
}

//! Units, constants and value types shared across the orrery crates

pub mod angle;
pub mod color;
pub mod constants;
pub mod coordinates;


pub use angle::{Degrees, Radians};
pub use color::{parse_hex, Color, ColorParseError};
pub use coordinates::Point2D;

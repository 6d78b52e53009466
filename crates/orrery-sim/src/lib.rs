//! Keplerian orbital mechanics for the inner planets
//!
//! wall time → [`time`] → [`planets::propagate`] → [`kepler`] → [`projector`]
//! → position + [`shape`]

pub mod elements;
pub mod kepler;
pub mod planets;
pub mod projector;
pub mod shape;
pub mod system;
pub mod time;
pub mod time_controller;

pub use elements::{OrbitalElements, SecularRates};
pub use kepler::{eccentric_anomaly, KeplerSolution, KeplerSolver};
pub use planets::{catalog, propagate, Body, BodyId};
pub use projector::project;
pub use shape::{shape, OrbitShape};
pub use system::{BodyState, SolarSystem};
pub use time::{julian_time, JulianDate};
pub use time_controller::{rates, TimeController};

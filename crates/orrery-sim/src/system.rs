//! Per-frame snapshot of every catalogued body

use hifitime::Epoch;
use orrery_core::Point2D;
use tracing::{debug, warn};

use crate::elements::OrbitalElements;
use crate::kepler::{KeplerSolution, KeplerSolver};
use crate::planets::{catalog, propagate, Body, BodyId};
use crate::projector::project;
use crate::shape::{shape, OrbitShape};
use crate::time::JulianDate;

/// Body state at a specific time
#[derive(Clone, Debug)]
pub struct BodyState {
    pub body: &'static Body,
    pub elements: OrbitalElements,
    pub solution: KeplerSolution,
    /// Display-frame position (AU)
    pub position: Point2D,
    pub shape: OrbitShape,
}

impl BodyState {
    pub fn compute(body: &'static Body, t: JulianDate, solver: &KeplerSolver) -> Self {
        let elements = propagate(body, t);
        if !elements.is_elliptical() {
            warn!(
                body = body.name(),
                eccentricity = elements.eccentricity,
                "propagated orbit is not elliptical"
            );
        }
        let solution = solver.solve(elements.mean_anomaly(), elements.eccentricity);

        if solution.residual > solver.tolerance {
            warn!(
                body = body.name(),
                residual = solution.residual,
                eccentricity = elements.eccentricity,
                "Kepler solution did not converge"
            );
        }

        let position = project(&elements, solution.eccentric_anomaly);
        debug!(body = body.name(), x = position.x, y = position.y, "propagated");

        Self {
            body,
            elements,
            solution,
            position,
            shape: shape(&elements),
        }
    }
}

/// Propagated catalog at one instant
#[derive(Clone, Debug)]
pub struct SolarSystem {
    time: JulianDate,
    solver: KeplerSolver,
    bodies: &'static [Body],
    states: Vec<BodyState>,
}

impl SolarSystem {
    /// Catalog at J2000
    pub fn new() -> Self {
        Self::at(JulianDate::J2000)
    }

    pub fn at(time: JulianDate) -> Self {
        Self::with_bodies(catalog(), time, KeplerSolver::default())
    }

    pub fn at_epoch(epoch: Epoch) -> Self {
        Self::at(JulianDate::from_epoch(epoch))
    }

    pub fn with_bodies(bodies: &'static [Body], time: JulianDate, solver: KeplerSolver) -> Self {
        let mut system = Self {
            time,
            solver,
            bodies,
            states: Vec::with_capacity(bodies.len()),
        };
        system.update_states();
        system
    }

    pub fn set_time(&mut self, time: JulianDate) {
        self.time = time;
        self.update_states();
    }

    pub fn time(&self) -> JulianDate {
        self.time
    }

    fn update_states(&mut self) {
        self.states.clear();
        for body in self.bodies {
            self.states.push(BodyState::compute(body, self.time, &self.solver));
        }
    }

    /// States in catalog order
    pub fn states(&self) -> &[BodyState] {
        &self.states
    }

    pub fn state(&self, id: BodyId) -> Option<&BodyState> {
        self.states.iter().find(|s| s.body.id == id)
    }

    /// (body, propagated elements) pairs for the render adapter
    pub fn frame(&self) -> impl Iterator<Item = (&'static Body, OrbitalElements)> + '_ {
        self.states.iter().map(|s| (s.body, s.elements))
    }

    /// Separation between two bodies in the display plane (AU)
    pub fn separation(&self, a: BodyId, b: BodyId) -> Option<f64> {
        Some(self.state(a)?.position.distance_to(self.state(b)?.position))
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

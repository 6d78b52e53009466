//! Kepler's equation M = E - e·sin(E), solved in the degree domain

use orrery_core::Degrees;

/// Corrections applied by the solver regardless of convergence
pub const KEPLER_ITERATIONS: usize = 50;

/// Step size below which an iterate is reported as converged (degrees)
pub const DEFAULT_TOLERANCE_DEG: f64 = 1e-9;

/// Solver output with convergence diagnostics
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolution {
    /// Final iterate
    pub eccentric_anomaly: Degrees,
    /// |M - (E - e*·sin E)| after the last iteration (degrees)
    pub residual: f64,
    /// First iteration whose correction fell below the tolerance
    pub converged_after: Option<usize>,
}

impl KeplerSolution {
    pub fn converged(&self) -> bool {
        self.converged_after.is_some()
    }
}

/// Fixed-count Newton solver.
///
/// The iteration count never depends on convergence; `tolerance` only feeds the
/// diagnostics in [`KeplerSolution`]. Calibrated for e < 0.21, behaviour as e → 1
/// is not guaranteed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeplerSolver {
    pub iterations: usize,
    pub tolerance: f64,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            iterations: KEPLER_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE_DEG,
        }
    }
}

impl KeplerSolver {
    pub fn solve(&self, mean_anomaly: Degrees, eccentricity: f64) -> KeplerSolution {
        let m = mean_anomaly.reduced();
        // e in degrees: scales the radian-domain sine term
        let estar = eccentricity.to_degrees();

        let mut ea = m - Degrees(estar * m.sin());
        let mut converged_after = None;

        for i in 0..self.iterations {
            let dm = m - (ea - Degrees(estar * ea.sin()));
            let step = dm / (1.0 - eccentricity * ea.cos());
            ea += step;

            if converged_after.is_none() && step.0.abs() < self.tolerance {
                converged_after = Some(i + 1);
            }
        }

        let residual = (m - (ea - Degrees(estar * ea.sin()))).0.abs();

        KeplerSolution {
            eccentric_anomaly: ea,
            residual,
            converged_after,
        }
    }
}

/// Eccentric anomaly for `mean_anomaly` using the default 50-step solver
pub fn eccentric_anomaly(mean_anomaly: Degrees, eccentricity: f64) -> Degrees {
    KeplerSolver::default().solve(mean_anomaly, eccentricity).eccentric_anomaly
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_circular_returns_mean_anomaly() {
        for m in [-359.0, -180.0, -2.47311027, 0.0, 0.5, 45.0, 123.456, 270.0, 359.9] {
            assert_eq!(eccentric_anomaly(Degrees(m), 0.0), Degrees(m));
        }
    }

    #[test]
    fn test_mean_anomaly_is_reduced() {
        assert_eq!(eccentric_anomaly(Degrees(370.0), 0.0), Degrees(10.0));
        assert_eq!(eccentric_anomaly(Degrees(-725.0), 0.0), Degrees(-5.0));
    }

    #[test]
    fn test_satisfies_keplers_equation() {
        for e in [0.00677672, 0.01671123, 0.09339410, 0.20563593] {
            for m in [-300.0, -90.0, -2.5, 0.0, 17.0, 100.0, 179.0, 250.0] {
                let ea = eccentric_anomaly(Degrees(m), e).to_radians().0;
                let m_rad = Degrees(m).to_radians().0;
                assert_abs_diff_eq!(ea - e * ea.sin(), m_rad, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_apsides_are_fixed_points() {
        assert_abs_diff_eq!(eccentric_anomaly(Degrees(0.0), 0.2).0, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eccentric_anomaly(Degrees(180.0), 0.2).0, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_diagnostics_for_inner_planets() {
        let solver = KeplerSolver::default();
        let solution = solver.solve(Degrees(174.79), 0.20563593);
        assert!(solution.converged());
        assert!(solution.converged_after.unwrap() < 10);
        assert!(solution.residual < 1e-9);
    }

    #[test]
    fn test_too_few_iterations_are_reported() {
        let solver = KeplerSolver { iterations: 1, ..KeplerSolver::default() };
        let solution = solver.solve(Degrees(100.0), 0.20563593);
        assert!(!solution.converged());
        assert!(solution.residual > solver.tolerance);
    }

    #[test]
    fn test_iteration_count_does_not_change_result_once_converged() {
        let short = KeplerSolver { iterations: 20, ..KeplerSolver::default() };
        let long = KeplerSolver::default();
        let a = short.solve(Degrees(63.0), 0.0934).eccentric_anomaly;
        let b = long.solve(Degrees(63.0), 0.0934).eccentric_anomaly;
        assert_abs_diff_eq!(a.0, b.0, epsilon = 1e-10);
    }
}

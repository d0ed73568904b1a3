//! Mass conservation monitoring.
//!
//! Collision and periodic streaming conserve Σρ exactly up to rounding; open
//! inflow/outflow boundaries let it drift. Tracking the drift against a
//! baseline flags runs whose mass is leaking away.

use karman_lbm::DistributionField;

/// Baseline total mass to track drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassBaseline {
    pub total_mass: f64,
}

impl MassBaseline {
    pub fn new(f: &DistributionField) -> Self {
        Self {
            total_mass: f.total_mass(),
        }
    }
}

/// Mass drift at the current timestep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassMonitor {
    /// Current Σρ.
    pub total_mass: f64,
    /// Relative drift: |M - M₀| / |M₀|
    pub relative_drift: f64,
}

impl MassMonitor {
    /// Compare the current field against the baseline.
    pub fn check(baseline: &MassBaseline, f: &DistributionField) -> Self {
        let total_mass = f.total_mass();
        let diff = (total_mass - baseline.total_mass).abs();

        // Relative drift (avoid division by zero)
        let relative_drift = if baseline.total_mass.abs() > 1e-12 {
            diff / baseline.total_mass.abs()
        } else {
            diff
        };

        Self {
            total_mass,
            relative_drift,
        }
    }

    /// True if the drift exceeds `tolerance`, or is not a number.
    pub fn is_violated(&self, tolerance: f64) -> bool {
        !(self.relative_drift <= tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use karman_lbm::{Grid, LbmSolver, Relaxation};

    #[test]
    fn test_periodic_run_has_no_drift() {
        let grid = Grid::new(16, 12).unwrap();
        let solver = LbmSolver::periodic(grid, Relaxation::from_omega(1.5).unwrap()).unwrap();
        let f0 = solver.uniform_field(1.0, [0.02, 0.01]);
        let baseline = MassBaseline::new(&f0);
        let f = solver.advance(f0, 50);
        let monitor = MassMonitor::check(&baseline, &f);
        assert!(!monitor.is_violated(1e-12), "drift {}", monitor.relative_drift);
    }

    #[test]
    fn test_drift_is_relative() {
        let grid = Grid::new(2, 2).unwrap();
        let f0 = DistributionField::filled(grid, [0.25; 9]);
        let baseline = MassBaseline::new(&f0);
        assert_relative_eq!(baseline.total_mass, 9.0, epsilon = 1e-14);

        let f1 = DistributionField::filled(grid, [0.275; 9]);
        let monitor = MassMonitor::check(&baseline, &f1);
        assert_relative_eq!(monitor.relative_drift, 0.1, epsilon = 1e-12);
        assert!(monitor.is_violated(0.05));
        assert!(!monitor.is_violated(0.2));
    }

    #[test]
    fn test_nan_mass_is_violation() {
        let grid = Grid::new(2, 2).unwrap();
        let baseline = MassBaseline::new(&DistributionField::filled(grid, [0.25; 9]));
        let mut f = DistributionField::filled(grid, [0.25; 9]);
        f.get_mut(1, 1)[4] = f64::NAN;
        assert!(MassMonitor::check(&baseline, &f).is_violated(1.0));
    }
}

//! Flow-health assessment and summary statistics.

use karman_lbm::{ScalarField, VectorField, C_S};

use crate::conservation::MassMonitor;
use crate::divergence::find_divergence;

/// Coarse run-health levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowHealth {
    /// Densities finite and positive, mass drift within tolerance
    Healthy,
    /// Densities valid but mass drift beyond tolerance
    Drifting,
    /// Some density is non-finite or non-positive
    Diverged,
}

impl FlowHealth {
    /// Assess from the current density and mass monitor.
    pub fn assess(rho: &ScalarField, monitor: &MassMonitor, drift_tolerance: f64) -> Self {
        if find_divergence(rho).is_some() {
            Self::Diverged
        } else if monitor.is_violated(drift_tolerance) {
            Self::Drifting
        } else {
            Self::Healthy
        }
    }

    pub fn is_acceptable(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}

/// Extremes of the macroscopic fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowStats {
    pub min_density: f64,
    pub max_density: f64,
    pub mean_density: f64,
    pub max_speed: f64,
    /// max |u| / c_s
    pub max_mach: f64,
}

impl FlowStats {
    /// Any NaN cell makes the affected statistics NaN.
    pub fn compute(rho: &ScalarField, u: &VectorField) -> Self {
        let max_speed = u.map(|v| (v[0] * v[0] + v[1] * v[1]).sqrt()).max();
        Self {
            min_density: rho.min(),
            max_density: rho.max(),
            mean_density: rho.sum() / rho.grid().len() as f64,
            max_speed,
            max_mach: max_speed / C_S,
        }
    }
}

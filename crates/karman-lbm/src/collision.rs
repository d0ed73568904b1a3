//! BGK collision operator.
//!
//! f_i^post = f_i - ω (f_i - f_i^eq), with ω = 1 / (3ν + 0.5).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{LbmError, Result};
use crate::field::{DistributionField, Field};
use crate::lattice::Q;

/// Single-relaxation-time parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Relaxation {
    /// Kinematic viscosity in lattice units.
    pub nu: f64,
    /// Relaxation frequency ω = 1/τ.
    pub omega: f64,
}

impl Relaxation {
    /// From a relaxation frequency. Rejects ω outside (0, 2).
    pub fn from_omega(omega: f64) -> Result<Self> {
        if !(omega.is_finite() && omega > 0.0 && omega < 2.0) {
            return Err(LbmError::UnstableRelaxation { omega });
        }
        Ok(Self {
            nu: (1.0 / omega - 0.5) / 3.0,
            omega,
        })
    }

    /// From a kinematic viscosity: τ = 3ν + 0.5.
    pub fn from_viscosity(nu: f64) -> Result<Self> {
        let omega = 1.0 / (3.0 * nu + 0.5);
        Self::from_omega(omega).map(|r| Self { nu, ..r })
    }

    /// ν = U · L / Re for characteristic velocity `u` and length `length`.
    pub fn from_reynolds(u: f64, length: f64, reynolds: f64) -> Result<Self> {
        if !(reynolds.is_finite() && reynolds > 0.0) {
            return Err(LbmError::InvalidParameter(format!(
                "Reynolds number must be positive, got {reynolds}"
            )));
        }
        Self::from_viscosity(u * length / reynolds)
    }

    /// Relaxation time τ = 1/ω.
    pub fn tau(&self) -> f64 {
        1.0 / self.omega
    }
}

/// Relax one cell toward its equilibrium.
#[inline]
pub fn collide_cell(f: &[f64; Q], feq: &[f64; Q], omega: f64) -> [f64; Q] {
    std::array::from_fn(|i| f[i] - omega * (f[i] - feq[i]))
}

/// BGK collision over the whole grid. `f` is left untouched so that solid
/// cells can still be reflected from their pre-collision values.
///
/// # Panics
/// If `f` and `feq` cover different grids.
pub fn collide(f: &DistributionField, feq: &DistributionField, omega: f64) -> DistributionField {
    assert_eq!(f.grid(), feq.grid(), "equilibrium grid mismatch");
    let data = f
        .as_slice()
        .par_iter()
        .zip(feq.as_slice().par_iter())
        .map(|(cell, eq)| collide_cell(cell, eq, omega))
        .collect();
    Field::from_parts(f.grid(), data)
}

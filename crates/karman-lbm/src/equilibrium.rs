//! Second-order Maxwell-Boltzmann equilibrium.
//!
//! f_i^eq = w_i ρ [1 + 3(c_i·u) + 9/2(c_i·u)² - 3/2(u·u)]

use rayon::prelude::*;

use crate::field::{DistributionField, Field, ScalarField, VectorField};
use crate::lattice::{Lattice, Q};

/// Equilibrium population of direction `i`.
#[inline]
pub fn equilibrium_component(lattice: &Lattice, i: usize, rho: f64, u: [f64; 2]) -> f64 {
    let d = &lattice.directions[i];
    let cu = d.dot(u);
    let uu = u[0] * u[0] + u[1] * u[1];
    d.weight * rho * (1.0 + 3.0 * cu + 4.5 * cu * cu - 1.5 * uu)
}

/// All nine equilibrium populations of one cell.
#[inline]
pub fn equilibrium_cell(lattice: &Lattice, rho: f64, u: [f64; 2]) -> [f64; Q] {
    std::array::from_fn(|i| equilibrium_component(lattice, i, rho, u))
}

/// Equilibrium distribution for a whole grid.
///
/// # Panics
/// If `u` and `rho` cover different grids.
pub fn equilibrium(lattice: &Lattice, u: &VectorField, rho: &ScalarField) -> DistributionField {
    assert_eq!(u.grid(), rho.grid(), "velocity/density grid mismatch");
    let data = u
        .as_slice()
        .par_iter()
        .zip(rho.as_slice().par_iter())
        .map(|(&uc, &r)| equilibrium_cell(lattice, r, uc))
        .collect();
    Field::from_parts(u.grid(), data)
}

//! Macroscopic moments: density ρ = Σ f_i and velocity **u** = Σ c_i f_i / ρ.
//!
//! Derived fields are recomputed from the distributions whenever needed and
//! never cached across timesteps.

use rayon::prelude::*;

use crate::field::{DistributionField, Field, ScalarField, VectorField};
use crate::lattice::{Lattice, Q};

#[inline]
pub fn cell_density(f: &[f64; Q]) -> f64 {
    f.iter().sum()
}

/// Momentum density Σ c_i f_i.
#[inline]
pub fn cell_momentum(lattice: &Lattice, f: &[f64; Q]) -> [f64; 2] {
    let mut m = [0.0, 0.0];
    for (d, &fi) in lattice.iter().zip(f) {
        m[0] += fi * d.velocity[0] as f64;
        m[1] += fi * d.velocity[1] as f64;
    }
    m
}

/// Velocity of one cell. Requires `rho > 0`.
#[inline]
pub fn cell_velocity(lattice: &Lattice, f: &[f64; Q], rho: f64) -> [f64; 2] {
    let m = cell_momentum(lattice, f);
    [m[0] / rho, m[1] / rho]
}

/// Density at every cell.
pub fn density(f: &DistributionField) -> ScalarField {
    let data = f.as_slice().par_iter().map(cell_density).collect();
    Field::from_parts(f.grid(), data)
}

/// Velocity at every cell.
///
/// Division by ρ is unguarded: a zero density yields non-finite velocity,
/// which the divergence check reports.
///
/// # Panics
/// If `rho` was computed for a different grid.
pub fn velocity(lattice: &Lattice, f: &DistributionField, rho: &ScalarField) -> VectorField {
    assert_eq!(f.grid(), rho.grid(), "density field grid mismatch");
    let data = f
        .as_slice()
        .par_iter()
        .zip(rho.as_slice().par_iter())
        .map(|(cell, &r)| cell_velocity(lattice, cell, r))
        .collect();
    Field::from_parts(f.grid(), data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equilibrium::equilibrium_cell;
    use crate::field::Grid;
    use crate::lattice::D2Q9;
    use approx::assert_relative_eq;

    #[test]
    fn test_moments_of_equilibrium() {
        let f = equilibrium_cell(&D2Q9, 1.2, [0.05, -0.02]);
        let rho = cell_density(&f);
        assert_relative_eq!(rho, 1.2, epsilon = 1e-14);
        let u = cell_velocity(&D2Q9, &f, rho);
        assert_relative_eq!(u[0], 0.05, epsilon = 1e-14);
        assert_relative_eq!(u[1], -0.02, epsilon = 1e-14);
    }

    #[test]
    fn test_single_population_momentum() {
        let mut f = [0.0; Q];
        f[5] = 0.5;
        assert_eq!(cell_momentum(&D2Q9, &f), [0.5, 0.5]);
        assert_eq!(cell_velocity(&D2Q9, &f, 0.5), [1.0, 1.0]);
    }

    #[test]
    fn test_field_extraction() {
        let grid = Grid::new(6, 4).unwrap();
        let f = DistributionField::from_fn(grid, |x, y| {
            equilibrium_cell(&D2Q9, 1.0 + 0.01 * x as f64, [0.001 * y as f64, 0.0])
        });
        let rho = density(&f);
        let u = velocity(&D2Q9, &f, &rho);
        for (x, y) in grid.cells() {
            assert_relative_eq!(rho.get(x, y), 1.0 + 0.01 * x as f64, epsilon = 1e-14);
            assert_relative_eq!(u.get(x, y)[0], 0.001 * y as f64, epsilon = 1e-14);
            assert_relative_eq!(u.get(x, y)[1], 0.0, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_zero_density_gives_non_finite_velocity() {
        let f = [0.0; Q];
        let u = cell_velocity(&D2Q9, &f, cell_density(&f));
        assert!(!u[0].is_finite());
    }
}

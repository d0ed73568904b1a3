//! Channel boundary conditions.
//!
//! - Outflow (right edge): zero-gradient copy of the leftward populations.
//! - Inflow (left edge): Zou/He velocity inlet.
//! - Obstacle: full bounce-back on solid cells (no-slip, stationary wall).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::equilibrium::equilibrium_cell;
use crate::field::{DistributionField, ScalarField, VectorField};
use crate::lattice::{Lattice, Q};
use crate::obstacle::ObstacleMask;

/// Shape of the prescribed inlet velocity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflowKind {
    /// Same horizontal velocity on every row.
    #[default]
    Uniform,
    /// Poiseuille profile peaking mid-channel, zero at the walls.
    Parabolic,
}

/// Prescribed velocity on the inlet column, one entry per row.
#[derive(Debug, Clone, PartialEq)]
pub struct InflowProfile {
    velocity: Vec<[f64; 2]>,
}

impl InflowProfile {
    pub fn uniform(ny: usize, ux: f64) -> Self {
        Self {
            velocity: vec![[ux, 0.0]; ny],
        }
    }

    /// u_x(y) = 4 u_max y (H - y) / H², H = ny - 1.
    pub fn parabolic(ny: usize, u_max: f64) -> Self {
        let h = ny.saturating_sub(1).max(1) as f64;
        let velocity = (0..ny)
            .map(|y| {
                let y = y as f64;
                [4.0 * u_max * y * (h - y) / (h * h), 0.0]
            })
            .collect();
        Self { velocity }
    }

    pub fn new(kind: InflowKind, ny: usize, u_max: f64) -> Self {
        match kind {
            InflowKind::Uniform => Self::uniform(ny, u_max),
            InflowKind::Parabolic => Self::parabolic(ny, u_max),
        }
    }

    pub fn from_rows(velocity: Vec<[f64; 2]>) -> Self {
        Self { velocity }
    }

    #[inline]
    pub fn at(&self, y: usize) -> [f64; 2] {
        self.velocity[y]
    }

    /// Number of rows covered.
    pub fn len(&self) -> usize {
        self.velocity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocity.is_empty()
    }

    pub fn max_speed(&self) -> f64 {
        self.velocity
            .iter()
            .map(|u| (u[0] * u[0] + u[1] * u[1]).sqrt())
            .fold(0.0, f64::max)
    }
}

/// Copy the leftward populations of column `nx - 2` into column `nx - 1`.
pub fn apply_outflow(lattice: &Lattice, f: &mut DistributionField) {
    let nx = f.grid().nx;
    if nx < 2 {
        return;
    }
    let ny = f.grid().ny;
    let (head, last) = f.as_mut_slice().split_at_mut((nx - 1) * ny);
    let penultimate = &head[(nx - 2) * ny..];
    for (dst, src) in last.iter_mut().zip(penultimate) {
        for &i in &lattice.leftward {
            dst[i] = src[i];
        }
    }
}

/// Zou/He inlet density for a cell whose horizontal velocity is `ux`:
/// ρ = (Σ pure-vertical f + 2 Σ leftward f) / (1 - u_x).
#[inline]
pub fn inlet_density(lattice: &Lattice, f: &[f64; Q], ux: f64) -> f64 {
    let vertical: f64 = lattice.pure_vertical.iter().map(|&i| f[i]).sum();
    let leftward: f64 = lattice.leftward.iter().map(|&i| f[i]).sum();
    (vertical + 2.0 * leftward) / (1.0 - ux)
}

/// Impose the inlet profile on column 0.
///
/// Sets `u` to the profile on rows `1..ny-1` (corner rows keep their
/// computed velocity), recomputes column-0 density with the Zou/He formula on
/// every row, then overwrites the rightward populations of column 0 with the
/// equilibrium of the corrected (ρ, u).
///
/// # Panics
/// If the fields cover different grids or the profile length differs from `ny`.
pub fn apply_inflow(
    lattice: &Lattice,
    f: &mut DistributionField,
    rho: &mut ScalarField,
    u: &mut VectorField,
    profile: &InflowProfile,
) {
    let grid = f.grid();
    assert_eq!(grid, rho.grid(), "density field grid mismatch");
    assert_eq!(grid, u.grid(), "velocity field grid mismatch");
    assert_eq!(profile.len(), grid.ny, "inflow profile length mismatch");

    let ny = grid.ny;
    let u_in = u.column_mut(0);
    for (y, uy) in u_in.iter_mut().enumerate().take(ny.saturating_sub(1)).skip(1) {
        *uy = profile.at(y);
    }

    let f_in = f.column_mut(0);
    let rho_in = rho.column_mut(0);
    let u_in = u.column(0);
    for ((cell, r), uc) in f_in.iter_mut().zip(rho_in.iter_mut()).zip(u_in) {
        *r = inlet_density(lattice, cell, uc[0]);
        let feq = equilibrium_cell(lattice, *r, *uc);
        for &i in &lattice.rightward {
            cell[i] = feq[i];
        }
    }
}

/// Overwrite every solid cell of `post` with the reflected pre-collision
/// populations: `post[i] = pre[opposite(i)]`.
///
/// # Panics
/// If `pre`, `post` and `mask` cover different grids.
pub fn bounce_back(
    lattice: &Lattice,
    pre: &DistributionField,
    post: &mut DistributionField,
    mask: &ObstacleMask,
) {
    assert_eq!(pre.grid(), post.grid(), "pre/post grid mismatch");
    assert_eq!(pre.grid(), mask.grid(), "obstacle mask grid mismatch");
    post.as_mut_slice()
        .par_iter_mut()
        .zip(pre.as_slice().par_iter())
        .zip(mask.as_slice().par_iter())
        .filter(|(_, &solid)| solid)
        .for_each(|((out, cell), _)| {
            *out = std::array::from_fn(|i| cell[lattice.opposite(i)]);
        });
}

//! Flow-field diagnostics for visualisation.
//!
//! The wake is usually shown as either the velocity magnitude or the
//! vorticity `∂u_x/∂y − ∂u_y/∂x`. Derivatives use central differences in the
//! interior and first-order one-sided differences on the edges.

use karman_lbm::{Grid, ScalarField, VectorField};
use rayon::prelude::*;

/// Velocity magnitude |u| per cell.
pub fn speed(u: &VectorField) -> ScalarField {
    u.map(|[ux, uy]| ux.hypot(uy))
}

/// Derivative of `value` along one axis at position `i` of `n` samples.
#[inline]
fn gradient(n: usize, i: usize, value: impl Fn(usize) -> f64) -> f64 {
    if n < 2 {
        0.0
    } else if i == 0 {
        value(1) - value(0)
    } else if i == n - 1 {
        value(n - 1) - value(n - 2)
    } else {
        0.5 * (value(i + 1) - value(i - 1))
    }
}

/// Vorticity `∂u_x/∂y − ∂u_y/∂x` per cell.
///
/// Positive where the flow turns clockwise in the (x, y) plane with y up,
/// e.g. above a cylinder in rightward flow.
pub fn vorticity(u: &VectorField) -> ScalarField {
    let grid = u.grid();
    let Grid { nx, ny } = grid;
    let mut w = ScalarField::filled(grid, 0.0);
    w.as_mut_slice()
        .par_chunks_mut(ny)
        .enumerate()
        .for_each(|(x, column)| {
            for (y, out) in column.iter_mut().enumerate() {
                let dux_dy = gradient(ny, y, |yy| u.get(x, yy)[0]);
                let duy_dx = gradient(nx, x, |xx| u.get(xx, y)[1]);
                *out = dux_dy - duy_dx;
            }
        });
    w
}

/// Macroscopic state handed to run observers.
#[derive(Debug, Clone)]
pub struct FlowSnapshot {
    /// Timesteps completed when the snapshot was taken.
    pub iteration: usize,
    pub density: ScalarField,
    pub velocity: VectorField,
}

impl FlowSnapshot {
    pub fn speed(&self) -> ScalarField {
        speed(&self.velocity)
    }

    pub fn vorticity(&self) -> ScalarField {
        vorticity(&self.velocity)
    }
}

//! Solid obstacle geometry.

use crate::field::{Field, Grid};

/// Cells treated as solid wall by the bounce-back stage. Immutable for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleMask {
    solid: Field<bool>,
}

impl ObstacleMask {
    /// Mask with no solid cells.
    pub fn empty(grid: Grid) -> Self {
        Self {
            solid: Field::filled(grid, false),
        }
    }

    /// Lattice points strictly inside a circle of `radius` around `center`.
    pub fn cylinder(grid: Grid, center: [f64; 2], radius: f64) -> Self {
        Self::from_fn(grid, |x, y| {
            let dx = x as f64 - center[0];
            let dy = y as f64 - center[1];
            (dx * dx + dy * dy).sqrt() < radius
        })
    }

    pub fn from_fn(grid: Grid, f: impl FnMut(usize, usize) -> bool) -> Self {
        Self {
            solid: Field::from_fn(grid, f),
        }
    }

    #[inline]
    pub fn grid(&self) -> Grid {
        self.solid.grid()
    }

    #[inline]
    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        self.solid.get(x, y)
    }

    /// Flags in field storage order.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        self.solid.as_slice()
    }

    pub fn solid_count(&self) -> usize {
        self.solid.as_slice().iter().filter(|&&s| s).count()
    }

    /// Coordinates of every solid cell.
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.solid
            .iter_cells()
            .filter(|(_, &s)| s)
            .map(|(xy, _)| xy)
    }
}

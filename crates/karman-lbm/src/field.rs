//! Grid and per-cell field storage.
//!
//! Every field is a flat buffer over the `nx × ny` grid, x-major:
//! cell `(x, y)` lives at `x * ny + y`, so each column is contiguous.

use crate::error::{LbmError, Result};
use crate::lattice::Q;

/// Fixed-size 2D lattice. `x` is streamwise, `y` cross-stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    pub nx: usize,
    pub ny: usize,
}

impl Grid {
    pub fn new(nx: usize, ny: usize) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(LbmError::InvalidGrid { nx, ny });
        }
        Ok(Self { nx, ny })
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.nx * self.ny
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.nx && y < self.ny, "({x}, {y}) outside {self:?}");
        x * self.ny + y
    }

    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.ny, index % self.ny)
    }

    /// Periodic neighbour of `(x, y)` displaced by `(dx, dy)`.
    #[inline]
    pub fn wrap(&self, x: usize, y: usize, dx: i32, dy: i32) -> (usize, usize) {
        let xw = (x as i64 + dx as i64).rem_euclid(self.nx as i64) as usize;
        let yw = (y as i64 + dy as i64).rem_euclid(self.ny as i64) as usize;
        (xw, yw)
    }

    /// All `(x, y)` pairs in storage order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.nx).flat_map(move |x| (0..self.ny).map(move |y| (x, y)))
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.nx, self.ny)
    }
}

/// A value per grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Field<T> {
    grid: Grid,
    data: Vec<T>,
}

/// Per-cell scalar, e.g. density ρ.
pub type ScalarField = Field<f64>;

/// Per-cell 2D vector, e.g. velocity **u**.
pub type VectorField = Field<[f64; 2]>;

/// Particle distributions f_i, nine per cell. The only evolving state of a run.
pub type DistributionField = Field<[f64; Q]>;

impl<T> Field<T> {
    /// Build a field by evaluating `f(x, y)` for every cell.
    pub fn from_fn(grid: Grid, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let data = grid.cells().map(|(x, y)| f(x, y)).collect();
        Self { grid, data }
    }

    /// Wrap an x-major buffer. Fails if its length does not match the grid.
    pub fn from_vec(grid: Grid, data: Vec<T>) -> Result<Self> {
        if data.len() != grid.len() {
            return Err(LbmError::ShapeMismatch {
                expected: format!("{} cells ({grid})", grid.len()),
                found: format!("{} cells", data.len()),
            });
        }
        Ok(Self { grid, data })
    }

    /// Internal constructor for buffers produced by iterating the grid itself.
    pub(crate) fn from_parts(grid: Grid, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), grid.len());
        Self { grid, data }
    }

    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    pub fn get_ref(&self, x: usize, y: usize) -> &T {
        &self.data[self.grid.index(x, y)]
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut T {
        let idx = self.grid.index(x, y);
        &mut self.data[idx]
    }

    /// Cells of column `x`, bottom to top.
    pub fn column(&self, x: usize) -> &[T] {
        let ny = self.grid.ny;
        &self.data[x * ny..(x + 1) * ny]
    }

    pub fn column_mut(&mut self, x: usize) -> &mut [T] {
        let ny = self.grid.ny;
        &mut self.data[x * ny..(x + 1) * ny]
    }

    /// `((x, y), value)` in storage order.
    pub fn iter_cells(&self) -> impl Iterator<Item = ((usize, usize), &T)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(move |(i, v)| (self.grid.coords(i), v))
    }

    /// Check that `other` was built for the same grid.
    pub fn ensure_grid(&self, other: Grid) -> Result<()> {
        if self.grid != other {
            return Err(LbmError::ShapeMismatch {
                expected: other.to_string(),
                found: self.grid.to_string(),
            });
        }
        Ok(())
    }
}

impl<T: Clone> Field<T> {
    pub fn filled(grid: Grid, value: T) -> Self {
        Self {
            grid,
            data: vec![value; grid.len()],
        }
    }
}

impl<T: Copy> Field<T> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.grid.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.grid.index(x, y);
        self.data[idx] = value;
    }

    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Field<U> {
        Field {
            grid: self.grid,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Periodic shift: `out[x, y] = self[(x - dx) mod nx, (y - dy) mod ny]`.
    pub fn rolled(&self, dx: i32, dy: i32) -> Self {
        Self::from_fn(self.grid, |x, y| {
            let (xs, ys) = self.grid.wrap(x, y, -dx, -dy);
            self.get(xs, ys)
        })
    }
}

impl ScalarField {
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Smallest value; NaN if any cell is NaN.
    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, |a, b| {
            if a.is_nan() || b.is_nan() {
                f64::NAN
            } else {
                a.min(b)
            }
        })
    }

    /// Largest value; NaN if any cell is NaN.
    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, |a, b| {
            if a.is_nan() || b.is_nan() {
                f64::NAN
            } else {
                a.max(b)
            }
        })
    }
}

impl DistributionField {
    /// Scalar field of a single direction's populations.
    pub fn component(&self, i: usize) -> ScalarField {
        self.map(|cell| cell[i])
    }

    /// Total mass Σ_cells Σ_i f_i.
    pub fn total_mass(&self) -> f64 {
        self.data.iter().map(|cell| cell.iter().sum::<f64>()).sum()
    }
}

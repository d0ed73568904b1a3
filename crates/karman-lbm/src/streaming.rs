//! Periodic streaming.
//!
//! Each population moves one cell along its velocity, wrapping on both axes:
//! `out[x, y, i] = post[(x - dx_i) mod nx, (y - dy_i) mod ny, i]`.
//! Implemented as a pull into a separate buffer so no cell observes a
//! partially streamed neighbour.

use rayon::prelude::*;

use crate::field::DistributionField;
use crate::lattice::Lattice;

/// Stream `post` into a freshly allocated field.
pub fn stream(lattice: &Lattice, post: &DistributionField) -> DistributionField {
    let mut out = post.clone();
    stream_into(lattice, post, &mut out);
    out
}

/// Stream `post` into `out`, overwriting every population of `out`.
///
/// # Panics
/// If `post` and `out` cover different grids.
pub fn stream_into(lattice: &Lattice, post: &DistributionField, out: &mut DistributionField) {
    let grid = post.grid();
    assert_eq!(grid, out.grid(), "streaming buffer grid mismatch");
    out.as_mut_slice()
        .par_chunks_mut(grid.ny)
        .enumerate()
        .for_each(|(x, column)| {
            for (y, cell) in column.iter_mut().enumerate() {
                for d in lattice.iter() {
                    let (xs, ys) = grid.wrap(x, y, -d.velocity[0], -d.velocity[1]);
                    cell[d.index] = post.get_ref(xs, ys)[d.index];
                }
            }
        });
}

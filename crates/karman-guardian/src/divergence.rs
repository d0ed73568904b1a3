//! Divergence detection.
//!
//! A density that is NaN, infinite, zero or negative means the run has blown
//! up; every later step only spreads the damage.

use karman_lbm::{density, DistributionField, LbmError, Result, ScalarField};
use rayon::prelude::*;

#[inline]
fn is_healthy(rho: f64) -> bool {
    rho.is_finite() && rho > 0.0
}

/// First diverged cell in storage order, as `(x, y, density)`.
pub fn find_divergence(rho: &ScalarField) -> Option<(usize, usize, f64)> {
    let grid = rho.grid();
    rho.as_slice()
        .par_iter()
        .position_first(|&r| !is_healthy(r))
        .map(|idx| {
            let (x, y) = grid.coords(idx);
            (x, y, rho.as_slice()[idx])
        })
}

/// Fail with [`LbmError::Divergence`] if any cell has a non-finite or
/// non-positive density.
pub fn check_density(rho: &ScalarField) -> Result<()> {
    match find_divergence(rho) {
        Some((x, y, density)) => {
            log::error!("divergence at ({x}, {y}): density = {density}");
            Err(LbmError::Divergence { x, y, density })
        }
        None => Ok(()),
    }
}

/// Compute the density of `f` and check it. Returns the density on success so
/// callers need not recompute it.
pub fn check_field(f: &DistributionField) -> Result<ScalarField> {
    let rho = density(f);
    check_density(&rho)?;
    Ok(rho)
}

#[cfg(test)]
mod tests {
    use super::*;
    use karman_lbm::Grid;

    #[test]
    fn test_healthy_field_passes() {
        let rho = ScalarField::filled(Grid::new(5, 4).unwrap(), 1.0);
        assert!(check_density(&rho).is_ok());
        assert_eq!(find_divergence(&rho), None);
    }

    #[test]
    fn test_reports_first_bad_cell() {
        let mut rho = ScalarField::filled(Grid::new(5, 4).unwrap(), 1.0);
        rho.set(3, 1, -0.2);
        rho.set(4, 0, f64::NAN);
        match check_density(&rho) {
            Err(LbmError::Divergence { x, y, density }) => {
                assert_eq!((x, y), (3, 1));
                assert_eq!(density, -0.2);
            }
            other => panic!("expected divergence, got {other:?}"),
        }
    }

    #[test]
    fn test_detects_nan_inf_and_zero() {
        for bad in [f64::NAN, f64::INFINITY, 0.0] {
            let mut rho = ScalarField::filled(Grid::new(3, 3).unwrap(), 1.0);
            rho.set(1, 2, bad);
            let (x, y, _) = find_divergence(&rho).unwrap();
            assert_eq!((x, y), (1, 2));
        }
    }

    #[test]
    fn test_check_field_returns_density() {
        let grid = Grid::new(4, 3).unwrap();
        let f = DistributionField::filled(grid, [0.1; 9]);
        let rho = check_field(&f).unwrap();
        assert!((rho.get(2, 2) - 0.9).abs() < 1e-15);

        let empty = DistributionField::filled(grid, [0.0; 9]);
        assert!(check_field(&empty).is_err());
    }
}

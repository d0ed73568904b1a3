//! Timestep orchestration.
//!
//! One step threads the distribution field through:
//! outflow → moments → inflow → equilibrium → collision → bounce-back → streaming.
//! The solver holds only immutable setup data, so `step` is a deterministic
//! function of its input field.

use crate::boundary::{apply_inflow, apply_outflow, bounce_back, InflowProfile};
use crate::collision::{collide, Relaxation};
use crate::equilibrium::{equilibrium, equilibrium_cell};
use crate::error::{LbmError, Result};
use crate::field::{DistributionField, Field, Grid, ScalarField, VectorField};
use crate::lattice::{Lattice, D2Q9};
use crate::macroscopic;
use crate::obstacle::ObstacleMask;
use crate::params::ChannelParams;
use crate::streaming::stream_into;

/// D2Q9 BGK solver with optional channel boundaries.
///
/// Without inflow, outflow and obstacle the domain is fully periodic.
#[derive(Debug, Clone)]
pub struct LbmSolver {
    lattice: &'static Lattice,
    grid: Grid,
    relaxation: Relaxation,
    obstacle: Option<ObstacleMask>,
    inflow: Option<InflowProfile>,
    outflow: bool,
}

/// Builder for [`LbmSolver`].
#[derive(Debug, Clone)]
pub struct SolverBuilder {
    grid: Grid,
    relaxation: Option<Relaxation>,
    obstacle: Option<ObstacleMask>,
    inflow: Option<InflowProfile>,
    outflow: bool,
}

impl SolverBuilder {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            relaxation: None,
            obstacle: None,
            inflow: None,
            outflow: false,
        }
    }

    pub fn relaxation(mut self, relaxation: Relaxation) -> Self {
        self.relaxation = Some(relaxation);
        self
    }

    pub fn obstacle(mut self, mask: ObstacleMask) -> Self {
        self.obstacle = Some(mask);
        self
    }

    pub fn inflow(mut self, profile: InflowProfile) -> Self {
        self.inflow = Some(profile);
        self
    }

    /// Enable the zero-gradient outflow on the right edge.
    pub fn outflow(mut self, enabled: bool) -> Self {
        self.outflow = enabled;
        self
    }

    pub fn build(self) -> Result<LbmSolver> {
        let relaxation = self.relaxation.ok_or_else(|| {
            LbmError::InvalidParameter("solver needs a relaxation frequency".to_string())
        })?;
        Relaxation::from_omega(relaxation.omega)?;

        if let Some(mask) = &self.obstacle {
            if mask.grid() != self.grid {
                return Err(LbmError::ShapeMismatch {
                    expected: self.grid.to_string(),
                    found: format!("obstacle mask {}", mask.grid()),
                });
            }
        }
        if let Some(profile) = &self.inflow {
            if profile.len() != self.grid.ny {
                return Err(LbmError::ShapeMismatch {
                    expected: format!("{} inflow rows", self.grid.ny),
                    found: format!("{} inflow rows", profile.len()),
                });
            }
            if profile.max_speed() >= 1.0 {
                return Err(LbmError::InvalidParameter(format!(
                    "inflow speed {} must stay below 1",
                    profile.max_speed()
                )));
            }
        }
        if self.outflow && self.grid.nx < 2 {
            return Err(LbmError::InvalidGrid {
                nx: self.grid.nx,
                ny: self.grid.ny,
            });
        }

        Ok(LbmSolver {
            lattice: &D2Q9,
            grid: self.grid,
            relaxation,
            obstacle: self.obstacle,
            inflow: self.inflow,
            outflow: self.outflow,
        })
    }
}

impl LbmSolver {
    pub fn builder(grid: Grid) -> SolverBuilder {
        SolverBuilder::new(grid)
    }

    /// Fully periodic solver: no inflow, outflow or obstacle.
    pub fn periodic(grid: Grid, relaxation: Relaxation) -> Result<Self> {
        SolverBuilder::new(grid).relaxation(relaxation).build()
    }

    /// Cylinder-in-channel solver from validated parameters.
    pub fn channel(params: &ChannelParams) -> Result<Self> {
        let relaxation = params.validate()?;
        let mask = params.obstacle_mask()?;
        log::debug!(
            "cylinder at ({}, {}) r = {} covers {} cells",
            params.cylinder.center[0],
            params.cylinder.center[1],
            params.cylinder.radius,
            mask.solid_count()
        );
        SolverBuilder::new(params.grid()?)
            .relaxation(relaxation)
            .obstacle(mask)
            .inflow(params.inflow())
            .outflow(true)
            .build()
    }

    #[inline]
    pub fn lattice(&self) -> &'static Lattice {
        self.lattice
    }

    #[inline]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[inline]
    pub fn relaxation(&self) -> Relaxation {
        self.relaxation
    }

    pub fn obstacle(&self) -> Option<&ObstacleMask> {
        self.obstacle.as_ref()
    }

    pub fn inflow(&self) -> Option<&InflowProfile> {
        self.inflow.as_ref()
    }

    pub fn has_outflow(&self) -> bool {
        self.outflow
    }

    /// Equilibrium field for a uniform density and velocity.
    pub fn uniform_field(&self, rho: f64, u: [f64; 2]) -> DistributionField {
        Field::filled(self.grid, equilibrium_cell(self.lattice, rho, u))
    }

    /// Starting field: unit density with the inflow profile replicated over
    /// every column, or fluid at rest when there is no inflow.
    pub fn initial_field(&self) -> DistributionField {
        match &self.inflow {
            Some(profile) => Field::from_fn(self.grid, |_, y| {
                equilibrium_cell(self.lattice, 1.0, profile.at(y))
            }),
            None => self.uniform_field(1.0, [0.0, 0.0]),
        }
    }

    /// Advance `f` by one timestep.
    ///
    /// # Panics
    /// If `f` was built for a different grid.
    pub fn step(&self, mut f: DistributionField) -> DistributionField {
        self.step_in_place(&mut f);
        f
    }

    /// Advance `f` by one timestep, reusing its buffer for the result.
    ///
    /// # Panics
    /// If `f` was built for a different grid.
    pub fn step_in_place(&self, f: &mut DistributionField) {
        assert_eq!(f.grid(), self.grid, "distribution field grid mismatch");
        let lattice = self.lattice;

        if self.outflow {
            apply_outflow(lattice, f);
        }

        let mut rho = macroscopic::density(f);
        let mut u = macroscopic::velocity(lattice, f, &rho);

        if let Some(profile) = &self.inflow {
            apply_inflow(lattice, f, &mut rho, &mut u, profile);
        }

        let feq = equilibrium(lattice, &u, &rho);
        let mut post = collide(f, &feq, self.relaxation.omega);

        if let Some(mask) = &self.obstacle {
            bounce_back(lattice, f, &mut post, mask);
        }

        // The pre-collision field is no longer needed; stream into its buffer.
        stream_into(lattice, &post, f);
    }

    /// Like [`step`](Self::step) but reports a grid mismatch as an error.
    pub fn try_step(&self, f: DistributionField) -> Result<DistributionField> {
        f.ensure_grid(self.grid)?;
        Ok(self.step(f))
    }

    /// Advance `f` by `n` timesteps.
    pub fn advance(&self, mut f: DistributionField, n: usize) -> DistributionField {
        for _ in 0..n {
            f = self.step(f);
        }
        f
    }

    pub fn density(&self, f: &DistributionField) -> ScalarField {
        macroscopic::density(f)
    }

    pub fn velocity(&self, f: &DistributionField, rho: &ScalarField) -> VectorField {
        macroscopic::velocity(self.lattice, f, rho)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn periodic(nx: usize, ny: usize, omega: f64) -> LbmSolver {
        let grid = Grid::new(nx, ny).unwrap();
        LbmSolver::periodic(grid, Relaxation::from_omega(omega).unwrap()).unwrap()
    }

    #[test]
    fn test_rest_equilibrium_is_fixed_point() {
        let solver = periodic(12, 8, 1.3);
        let f0 = solver.uniform_field(1.0, [0.0, 0.0]);
        let f1 = solver.step(f0.clone());
        for (a, b) in f0.as_slice().iter().zip(f1.as_slice()) {
            for i in 0..9 {
                assert_relative_eq!(a[i], b[i], epsilon = 1e-14);
            }
        }
    }

    #[test]
    fn test_uniform_flow_is_fixed_point() {
        let solver = periodic(10, 6, 1.8);
        let f0 = solver.uniform_field(1.02, [0.05, -0.02]);
        let f1 = solver.advance(f0.clone(), 5);
        for (a, b) in f0.as_slice().iter().zip(f1.as_slice()) {
            for i in 0..9 {
                assert_relative_eq!(a[i], b[i], epsilon = 1e-13);
            }
        }
    }

    #[test]
    fn test_periodic_mass_conservation() {
        let solver = periodic(24, 16, 1.6);
        let grid = solver.grid();
        let lattice = solver.lattice();
        // Gaussian density bump with a small shear.
        let f0 = DistributionField::from_fn(grid, |x, y| {
            let r2 = (x as f64 - 12.0).powi(2) + (y as f64 - 8.0).powi(2);
            let rho = 1.0 + 0.05 * (-r2 / 8.0).exp();
            let ux = 0.02 * (y as f64 / 16.0 - 0.5);
            equilibrium_cell(lattice, rho, [ux, 0.0])
        });
        let m0 = f0.total_mass();
        let f = solver.advance(f0, 200);
        assert_relative_eq!(f.total_mass(), m0, max_relative = 1e-12);
    }

    #[test]
    fn test_channel_setup() {
        let solver = LbmSolver::channel(&ChannelParams::with_grid(60, 20)).unwrap();
        assert_eq!(solver.grid(), Grid::new(60, 20).unwrap());
        assert!(solver.has_outflow());
        assert!(solver.obstacle().unwrap().solid_count() > 0);
        assert_eq!(solver.inflow().unwrap().len(), 20);
    }

    #[test]
    fn test_initial_field_matches_inflow() {
        let solver = LbmSolver::channel(&ChannelParams::with_grid(40, 12)).unwrap();
        let f = solver.initial_field();
        let rho = solver.density(&f);
        let u = solver.velocity(&f, &rho);
        for (x, y) in solver.grid().cells() {
            assert_relative_eq!(rho.get(x, y), 1.0, epsilon = 1e-14);
            assert_relative_eq!(u.get(x, y)[0], 0.04, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_obstacle_cells_are_reflected_then_streamed() {
        let grid = Grid::new(9, 9).unwrap();
        let mask = ObstacleMask::from_fn(grid, |x, y| x == 4 && y == 4);
        let solver = LbmSolver::builder(grid)
            .relaxation(Relaxation::from_omega(1.0).unwrap())
            .obstacle(mask)
            .build()
            .unwrap();
        let f0 = solver.uniform_field(1.0, [0.03, 0.0]);
        let f1 = solver.step(f0.clone());
        // The eastward population leaving the solid cell is its reflected
        // westward population from before the step.
        let lattice = solver.lattice();
        for d in lattice.iter() {
            let (tx, ty) = grid.wrap(4, 4, d.velocity[0], d.velocity[1]);
            assert_eq!(f1.get(tx, ty)[d.index], f0.get(4, 4)[d.opposite]);
        }
    }

    #[test]
    fn test_build_validation() {
        let grid = Grid::new(8, 8).unwrap();
        assert!(LbmSolver::builder(grid).build().is_err());

        let other = Grid::new(8, 9).unwrap();
        let err = LbmSolver::builder(grid)
            .relaxation(Relaxation::from_omega(1.0).unwrap())
            .obstacle(ObstacleMask::empty(other))
            .build();
        assert!(matches!(err, Err(LbmError::ShapeMismatch { .. })));

        let err = LbmSolver::builder(grid)
            .relaxation(Relaxation::from_omega(1.0).unwrap())
            .inflow(InflowProfile::uniform(3, 0.04))
            .build();
        assert!(matches!(err, Err(LbmError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_try_step_rejects_wrong_grid() {
        let solver = periodic(6, 6, 1.0);
        let f = DistributionField::filled(Grid::new(5, 6).unwrap(), [0.0; 9]);
        assert!(matches!(solver.try_step(f), Err(LbmError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_step_is_deterministic() {
        let solver = LbmSolver::channel(&ChannelParams::with_grid(50, 18)).unwrap();
        let f = solver.advance(solver.initial_field(), 3);
        assert_eq!(solver.step(f.clone()), solver.step(f));
    }
}

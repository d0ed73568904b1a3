//! Run loop over an [`LbmSolver`].

use karman_format::{RunParams, Scenario};
use karman_guardian::check_field;
use karman_lbm::{ChannelParams, DistributionField, LbmSolver, Result};

use crate::diagnostics::FlowSnapshot;

/// When a run hands snapshots to its observer.
///
/// The loop index `i` (zero-based, of the step just completed) is sampled
/// when `i % every == 0 && i > skip_first`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSchedule {
    pub every: usize,
    pub skip_first: usize,
}

impl SampleSchedule {
    pub fn new(every: usize, skip_first: usize) -> Self {
        Self { every, skip_first }
    }

    /// Never sample.
    pub fn never() -> Self {
        Self {
            every: 0,
            skip_first: 0,
        }
    }

    #[inline]
    pub fn should_sample(&self, index: usize) -> bool {
        self.every != 0 && index % self.every == 0 && index > self.skip_first
    }
}

impl From<&RunParams> for SampleSchedule {
    fn from(run: &RunParams) -> Self {
        Self::new(run.sample_every, run.skip_first)
    }
}

/// Owns a solver and the current distribution field.
#[derive(Debug)]
pub struct Simulator {
    solver: LbmSolver,
    field: DistributionField,
    iteration: usize,
    check_every: Option<usize>,
}

impl Simulator {
    /// Start from the solver's initial field.
    pub fn new(solver: LbmSolver) -> Self {
        let field = solver.initial_field();
        Self {
            solver,
            field,
            iteration: 0,
            check_every: None,
        }
    }

    /// Start from an explicit field.
    pub fn from_field(solver: LbmSolver, field: DistributionField) -> Result<Self> {
        field.ensure_grid(solver.grid())?;
        Ok(Self {
            solver,
            field,
            iteration: 0,
            check_every: None,
        })
    }

    /// Cylinder-in-channel simulator.
    pub fn channel(params: &ChannelParams) -> Result<Self> {
        Ok(Self::new(LbmSolver::channel(params)?))
    }

    /// Channel simulator with the scenario's divergence check.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        scenario.run.validate()?;
        let check = scenario.run.divergence_check();
        Ok(Self::channel(&scenario.channel)?.with_divergence_check(check))
    }

    /// Check the density every `every` steps during [`run_with`](Self::run_with).
    pub fn with_divergence_check(mut self, every: Option<usize>) -> Self {
        self.check_every = every.filter(|&n| n > 0);
        self
    }

    pub fn solver(&self) -> &LbmSolver {
        &self.solver
    }

    pub fn field(&self) -> &DistributionField {
        &self.field
    }

    pub fn into_field(self) -> DistributionField {
        self.field
    }

    /// Timesteps completed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn step(&mut self) {
        self.solver.step_in_place(&mut self.field);
        self.iteration += 1;
    }

    /// Advance `n` steps without sampling or checks.
    pub fn run(&mut self, n: usize) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Advance `n` steps, calling `observer` on every scheduled sample.
    ///
    /// Stops with [`LbmError::Divergence`](karman_lbm::LbmError::Divergence)
    /// if the divergence check is enabled and trips.
    pub fn run_with(
        &mut self,
        n: usize,
        schedule: &SampleSchedule,
        mut observer: impl FnMut(&FlowSnapshot),
    ) -> Result<()> {
        log::info!(
            "running {n} steps on {} from iteration {}",
            self.solver.grid(),
            self.iteration
        );
        let progress_every = (n / 10).max(1);

        for i in 0..n {
            let index = self.iteration;
            self.step();

            if let Some(every) = self.check_every {
                if self.iteration % every == 0 {
                    check_field(&self.field)?;
                }
            }
            if schedule.should_sample(index) {
                log::debug!("sampling at iteration {index}");
                observer(&self.snapshot());
            }
            if (i + 1) % progress_every == 0 {
                log::info!("{}/{n} steps", i + 1);
            }
        }
        Ok(())
    }

    /// Macroscopic state of the current field.
    pub fn snapshot(&self) -> FlowSnapshot {
        let density = self.solver.density(&self.field);
        let velocity = self.solver.velocity(&self.field, &density);
        FlowSnapshot {
            iteration: self.iteration,
            density,
            velocity,
        }
    }
}

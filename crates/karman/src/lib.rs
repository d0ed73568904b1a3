//! karman: lattice Boltzmann channel flow past a cylinder.
//!
//! This is the umbrella crate that provides the [`Simulator`] run loop,
//! flow diagnostics, and re-exports core types from sub-crates.

pub mod diagnostics;
pub mod simulator;

pub use karman_format::{self, load_scenario, save_scenario, FormatError, RunParams, Scenario};
pub use karman_guardian::{self, check_density, FlowHealth, FlowStats, MassBaseline, MassMonitor};
pub use karman_lbm::{
    self, ChannelParams, Cylinder, DistributionField, Grid, InflowKind, InflowProfile, LbmError,
    LbmSolver, ObstacleMask, Relaxation, ScalarField, VectorField,
};

pub use diagnostics::{speed, vorticity, FlowSnapshot};
pub use simulator::{SampleSchedule, Simulator};

//! Lattice Boltzmann Method (LBM) for 2D incompressible channel flow past a cylinder.
//!
//! Implements the D2Q9 lattice with a BGK collision operator, a Zou/He velocity
//! inlet, a zero-gradient outlet and bounce-back on solid cells. Streaming
//! wraps periodically on both axes; the vertical wrap acts as the channel's
//! top/bottom boundary.
//!
//! # Example
//!
//! ```
//! use karman_lbm::{ChannelParams, LbmSolver};
//!
//! // Small wake: 60x20 grid, cylinder at (12, 10) with radius 2, Re = 80
//! let solver = LbmSolver::channel(&ChannelParams::with_grid(60, 20))?;
//! let mut f = solver.initial_field();
//!
//! for _ in 0..100 {
//!     f = solver.step(f);
//! }
//!
//! let rho = solver.density(&f);
//! let u = solver.velocity(&f, &rho);
//! println!("Velocity behind the cylinder: {:?}", u.get(20, 10));
//! # Ok::<(), karman_lbm::LbmError>(())
//! ```

pub mod boundary;
pub mod collision;
pub mod equilibrium;
pub mod error;
pub mod field;
pub mod lattice;
pub mod macroscopic;
pub mod obstacle;
pub mod params;
pub mod solver;
pub mod streaming;

pub use boundary::{apply_inflow, apply_outflow, bounce_back, InflowKind, InflowProfile};
pub use collision::{collide, Relaxation};
pub use equilibrium::{equilibrium, equilibrium_cell};
pub use error::{LbmError, Result};
pub use field::{DistributionField, Field, Grid, ScalarField, VectorField};
pub use lattice::{Lattice, LatticeDirection, D2Q9, Q};
pub use macroscopic::{density, velocity};
pub use obstacle::ObstacleMask;
pub use params::{ChannelParams, Cylinder};
pub use solver::{LbmSolver, SolverBuilder};
pub use streaming::{stream, stream_into};

/// Lattice sound speed: c_s = 1/sqrt(3)
pub const C_S: f64 = 0.5773502691896258;

/// Lattice sound speed squared
pub const C_S_SQ: f64 = 1.0 / 3.0;

//! Channel-flow setup parameters and their validation.

use serde::{Deserialize, Serialize};

use crate::boundary::{InflowKind, InflowProfile};
use crate::collision::Relaxation;
use crate::error::{LbmError, Result};
use crate::field::Grid;
use crate::obstacle::ObstacleMask;

/// Inflow Mach numbers above this are outside the low-Mach regime the
/// equilibrium expansion assumes.
const HIGH_INFLOW_VELOCITY: f64 = 0.1;

/// ω above this is close enough to 2 to be under-resolved.
const NEAR_UNSTABLE_OMEGA: f64 = 1.9;

/// Circular obstacle in grid-cell units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    pub center: [f64; 2],
    pub radius: f64,
}

/// Everything needed to set up a channel run. Defaults reproduce the
/// reference wake: 300×50 grid, cylinder at (nx/5, ny/2) with radius ny/9,
/// Re = 80, inflow 0.04.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelParams {
    pub nx: usize,
    pub ny: usize,
    pub reynolds: f64,
    pub max_inflow_velocity: f64,
    pub inflow_profile: InflowKind,
    pub cylinder: Cylinder,
}

impl Default for ChannelParams {
    fn default() -> Self {
        Self::with_grid(300, 50)
    }
}

impl ChannelParams {
    /// Reference parameters scaled to an `nx × ny` grid.
    pub fn with_grid(nx: usize, ny: usize) -> Self {
        Self {
            nx,
            ny,
            reynolds: 80.0,
            max_inflow_velocity: 0.04,
            inflow_profile: InflowKind::Uniform,
            cylinder: Cylinder {
                center: [(nx / 5) as f64, (ny / 2) as f64],
                radius: (ny / 9) as f64,
            },
        }
    }

    pub fn grid(&self) -> Result<Grid> {
        if self.nx < 2 || self.ny < 3 {
            return Err(LbmError::InvalidGrid {
                nx: self.nx,
                ny: self.ny,
            });
        }
        Grid::new(self.nx, self.ny)
    }

    /// Run every setup check and return the derived relaxation.
    ///
    /// The characteristic length in Re = U·R/ν is the cylinder radius.
    pub fn validate(&self) -> Result<Relaxation> {
        let grid = self.grid()?;
        self.check_cylinder(grid)?;

        let u = self.max_inflow_velocity;
        if !(u.is_finite() && u > 0.0 && u < 1.0) {
            return Err(LbmError::InvalidParameter(format!(
                "max inflow velocity must lie in (0, 1), got {u}"
            )));
        }
        if u > HIGH_INFLOW_VELOCITY {
            log::warn!("inflow velocity {u} exceeds the low-Mach range (<= {HIGH_INFLOW_VELOCITY})");
        }

        let relaxation = Relaxation::from_reynolds(u, self.cylinder.radius, self.reynolds)?;
        if relaxation.omega > NEAR_UNSTABLE_OMEGA {
            log::warn!(
                "relaxation frequency {:.4} is close to 2; the run may be under-resolved",
                relaxation.omega
            );
        }
        log::debug!(
            "channel {grid}: Re = {}, nu = {:.6}, omega = {:.6}",
            self.reynolds,
            relaxation.nu,
            relaxation.omega
        );
        Ok(relaxation)
    }

    fn check_cylinder(&self, grid: Grid) -> Result<()> {
        let Cylinder { center, radius } = self.cylinder;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(LbmError::InvalidObstacle(format!(
                "radius must be positive, got {radius}"
            )));
        }
        let limit = grid.nx.min(grid.ny) as f64 / 2.0;
        if radius >= limit {
            return Err(LbmError::InvalidObstacle(format!(
                "radius {radius} reaches the channel walls (must be < {limit})"
            )));
        }
        let inside = |c: f64, n: usize| c.is_finite() && c >= 0.0 && c <= (n - 1) as f64;
        if !(inside(center[0], grid.nx) && inside(center[1], grid.ny)) {
            return Err(LbmError::InvalidObstacle(format!(
                "center ({}, {}) lies outside the {grid} grid",
                center[0], center[1]
            )));
        }
        Ok(())
    }

    /// Validated relaxation parameters.
    pub fn relaxation(&self) -> Result<Relaxation> {
        self.validate()
    }

    pub fn obstacle_mask(&self) -> Result<ObstacleMask> {
        let grid = self.grid()?;
        self.check_cylinder(grid)?;
        Ok(ObstacleMask::cylinder(
            grid,
            self.cylinder.center,
            self.cylinder.radius,
        ))
    }

    pub fn inflow(&self) -> InflowProfile {
        InflowProfile::new(self.inflow_profile, self.ny, self.max_inflow_velocity)
    }
}

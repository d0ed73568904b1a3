//! Opt-in health checks for lattice Boltzmann runs.
//!
//! This crate provides:
//! - Divergence detection (non-finite or non-positive density)
//! - Mass-drift monitoring against a baseline
//! - Flow-health assessment and summary statistics

pub mod conservation;
pub mod divergence;
pub mod health;

pub use conservation::{MassBaseline, MassMonitor};
pub use divergence::{check_density, check_field, find_divergence};
pub use health::{FlowHealth, FlowStats};

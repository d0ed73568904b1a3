//! Scenario files for karman channel-flow runs.
//!
//! A scenario bundles the channel setup (grid, cylinder, Reynolds number,
//! inflow) with the run schedule (iteration count, sampling cadence,
//! divergence-check cadence). Files are JSON or TOML, chosen by extension.

pub mod error;
pub mod scenario;

pub use error::{FormatError, Result};
pub use scenario::{
    export_scenario_json, export_scenario_toml, load_scenario, parse_scenario_json,
    parse_scenario_toml, save_scenario, RunParams, Scenario,
};

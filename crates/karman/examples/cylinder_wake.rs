//! Headless von Karman vortex street run.
//!
//! ```sh
//! RUST_LOG=info cargo run --release -p karman --example cylinder_wake [scenario.toml]
//! ```
//!
//! Without a scenario file the reference run is used: 300×50 channel,
//! cylinder of radius 5 at (60, 25), Re = 80, 15000 steps.

use karman::{load_scenario, FlowStats, SampleSchedule, Scenario, Simulator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let scenario = match std::env::args().nth(1) {
        Some(path) => load_scenario(path)?,
        None => Scenario::default(),
    };
    let relaxation = scenario.channel.validate()?;
    println!(
        "{}: {}x{} grid, Re = {}, nu = {:.5}, omega = {:.4}",
        scenario.name,
        scenario.channel.nx,
        scenario.channel.ny,
        scenario.channel.reynolds,
        relaxation.nu,
        relaxation.omega
    );

    let mut sim = Simulator::from_scenario(&scenario)?;
    let schedule = SampleSchedule::from(&scenario.run);
    sim.run_with(scenario.run.iterations, &schedule, |snap| {
        let stats = FlowStats::compute(&snap.density, &snap.velocity);
        let w = snap.vorticity();
        println!(
            "step {:6}  rho [{:.4}, {:.4}]  |u|max {:.4}  Ma {:.3}  curl [{:+.5}, {:+.5}]",
            snap.iteration,
            stats.min_density,
            stats.max_density,
            stats.max_speed,
            stats.max_mach,
            w.min(),
            w.max()
        );
    })?;

    Ok(())
}

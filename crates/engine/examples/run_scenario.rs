//! Runs every scenario for a typical patient and prints the results as JSON.
//!
//! ```text
//! RUST_LOG=glucoloop_engine=debug cargo run -p glucoloop-engine --example run_scenario -- 42
//! ```
//!
//! The optional argument seeds the noise source.

use glucoloop_engine::{
    DEFAULT_DURATION_MINUTES, Scenario, ScenarioKind, Simulator, SimulatorParameters,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut simulator = match std::env::args().nth(1) {
        Some(seed) => Simulator::seeded(seed.parse()?),
        None => Simulator::new(),
    };

    let parameters = SimulatorParameters {
        weight: 70.0,
        carb_intake: 45.0,
        insulin_sensitivity_factor: 50.0,
        basal_rate: 1.0,
        target_glucose: 110.0,
        correction_factor: 50.0,
    };

    for kind in ScenarioKind::ALL {
        let scenario = Scenario::new(kind, 0.5);
        let output = simulator.run(&parameters, &scenario, DEFAULT_DURATION_MINUTES)?;

        for entry in &output.algorithm_logs {
            eprintln!("{entry}");
        }
        println!("{}", serde_json::to_string(&output)?);
    }

    Ok(())
}

use glucoloop_engine::{
    DEFAULT_DURATION_MINUTES, Scenario, Simulator, SimulatorParameters, noise::NoiseSource,
};
use tracing::debug;

use crate::{error::StoreError, record::SimulationResult, storage::Storage};

/// Runs a default-length simulation and persists the result.
///
/// The record is stamped with [`Storage::now`].
///
/// Inputs are validated by the engine before any step runs, so a rejected
/// request leaves `storage` untouched.
///
/// # Errors
///
/// Returns [`StoreError::Simulation`] if the engine rejects the inputs.
pub fn run_and_save<S, N>(
    storage: &S,
    simulator: &mut Simulator<N>,
    parameters: &SimulatorParameters,
    scenario: &Scenario,
) -> Result<SimulationResult, StoreError>
where
    S: Storage + ?Sized,
    N: NoiseSource,
{
    let output = simulator.run(parameters, scenario, DEFAULT_DURATION_MINUTES)?;
    let result = SimulationResult::new(*parameters, *scenario, output, storage.now());
    debug!(id = %result.id, scenario = %scenario.kind, "simulation finished");
    Ok(storage.save(result))
}

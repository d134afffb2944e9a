use thiserror::Error;

use crate::{params::ParameterError, scenario::ScenarioError};

/// Errors that stop a simulation before its first step.
///
/// Every variant is detected up front; a run that starts always completes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("invalid scenario: {0}")]
    InvalidScenario(#[from] ScenarioError),

    #[error("invalid duration: {minutes} min is not a positive multiple of the {timestep} min step")]
    InvalidDuration { minutes: u32, timestep: u32 },
}

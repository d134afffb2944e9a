use glucoloop_engine::{DataPoint, LogEntry, Scenario, SimulationOutput, SimulatorParameters};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A finished run together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub id: Uuid,
    pub parameters: SimulatorParameters,
    pub scenario: Scenario,
    pub data_points: Vec<DataPoint>,
    pub algorithm_logs: Vec<LogEntry>,
    pub created_at: Timestamp,
}

impl SimulationResult {
    /// Wraps `output` in a record with a fresh v4 id.
    #[must_use]
    pub fn new(
        parameters: SimulatorParameters,
        scenario: Scenario,
        output: SimulationOutput,
        created_at: Timestamp,
    ) -> Self {
        let SimulationOutput {
            data_points,
            algorithm_logs,
        } = output;
        Self {
            id: Uuid::new_v4(),
            parameters,
            scenario,
            data_points,
            algorithm_logs,
            created_at,
        }
    }

    /// Returns the run's output, dropping the record metadata.
    #[must_use]
    pub fn output(&self) -> SimulationOutput {
        SimulationOutput {
            data_points: self.data_points.clone(),
            algorithm_logs: self.algorithm_logs.clone(),
        }
    }
}

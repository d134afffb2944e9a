use serde::Serialize;

use crate::output::DataPoint;

/// The engine's internal state at the end of a step.
///
/// A fresh state is created for every run and dropped when it returns.
/// Observers receive a copy through [`StepEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    /// Unrounded glucose in mg/dL.
    pub glucose: f64,
    /// Insulin still active, in units.
    pub insulin_on_board: f64,
    /// Carbohydrate still being absorbed, in grams.
    pub carbs_on_board: f64,
    /// Controller integral of error over time.
    pub pid_integral: f64,
    /// Controller error from this step.
    pub previous_error: f64,
}

/// Event emitted by the engine after each committed step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepEvent {
    /// Zero-based step index.
    pub step: u32,

    /// Internal state after the step.
    pub state: SimulationState,

    /// The data point recorded for this step.
    pub data_point: DataPoint,
}

impl StepEvent {
    /// Minutes from the start of the run.
    #[must_use]
    pub fn time(&self) -> u32 {
        self.data_point.time
    }
}

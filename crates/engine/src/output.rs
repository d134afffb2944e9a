use serde::{Deserialize, Serialize};

use crate::narration::LogEntry;

/// One sample of the simulated trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Minutes from the start of the run.
    pub time: u32,
    /// Glucose in mg/dL, rounded to one decimal.
    pub glucose: f64,
    /// Insulin delivery rate in U/h, rounded to two decimals.
    pub insulin: f64,
    /// Carbohydrates eaten at this step, in grams.
    pub carbs: f64,
}

/// Everything a run produces: the trajectory and its narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutput {
    pub data_points: Vec<DataPoint>,
    pub algorithm_logs: Vec<LogEntry>,
}

impl SimulationOutput {
    /// Returns the mean of the recorded (rounded) glucose values.
    ///
    /// Returns `None` when there are no data points.
    #[must_use]
    pub fn mean_glucose(&self) -> Option<f64> {
        mean_glucose(&self.data_points)
    }
}

pub(crate) fn mean_glucose(points: &[DataPoint]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    let total: f64 = points.iter().map(|point| point.glucose).sum();
    #[allow(clippy::cast_precision_loss)]
    Some(total / points.len() as f64)
}

/// Rounds `value` to the given number of decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10_f64.powi(decimals);
    (value * scale).round() / scale
}

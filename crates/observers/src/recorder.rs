use glucoloop_core::Observer;
use glucoloop_engine::{SimulationState, StepEvent};

/// Records the engine's internal state after every step.
///
/// # Example
///
/// ```
/// use glucoloop_engine::{Scenario, ScenarioKind, Simulator, SimulatorParameters};
/// use glucoloop_observers::StateRecorder;
///
/// let parameters = SimulatorParameters {
///     weight: 70.0,
///     carb_intake: 45.0,
///     insulin_sensitivity_factor: 50.0,
///     basal_rate: 1.0,
///     target_glucose: 110.0,
///     correction_factor: 50.0,
/// };
/// let scenario = Scenario::new(ScenarioKind::Normal, 0.0);
///
/// let mut recorder = StateRecorder::new();
/// Simulator::seeded(1)
///     .run_observed(&parameters, &scenario, 120, &mut recorder)
///     .unwrap();
///
/// assert_eq!(recorder.states().len(), 24);
/// assert!(recorder.peak_insulin_on_board() > 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StateRecorder {
    states: Vec<(u32, SimulationState)>,
}

impl StateRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(minute, state)` pairs in step order.
    #[must_use]
    pub fn states(&self) -> &[(u32, SimulationState)] {
        &self.states
    }

    /// Returns the largest insulin-on-board seen, or zero if nothing was recorded.
    #[must_use]
    pub fn peak_insulin_on_board(&self) -> f64 {
        self.states
            .iter()
            .map(|(_, state)| state.insulin_on_board)
            .fold(0.0, f64::max)
    }

    /// Returns the largest carbs-on-board seen, or zero if nothing was recorded.
    #[must_use]
    pub fn peak_carbs_on_board(&self) -> f64 {
        self.states
            .iter()
            .map(|(_, state)| state.carbs_on_board)
            .fold(0.0, f64::max)
    }

    /// Consumes the recorder and returns its states.
    #[must_use]
    pub fn into_states(self) -> Vec<(u32, SimulationState)> {
        self.states
    }
}

impl Observer<StepEvent> for StateRecorder {
    fn observe(&mut self, event: &StepEvent) {
        self.states.push((event.time(), event.state));
    }
}

use glucoloop_core::Observer;
use glucoloop_engine::{
    DEFAULT_DURATION_MINUTES, Scenario, ScenarioKind, Simulator, SimulatorParameters, StepEvent,
};
use glucoloop_observers::{StateRecorder, TimeInRange};

fn typical() -> SimulatorParameters {
    SimulatorParameters {
        weight: 70.0,
        carb_intake: 45.0,
        insulin_sensitivity_factor: 50.0,
        basal_rate: 1.0,
        target_glucose: 110.0,
        correction_factor: 50.0,
    }
}

#[test]
fn tally_agrees_with_the_output_series() {
    let mut tally = TimeInRange::default();
    let output = Simulator::seeded(42)
        .run_observed(
            &typical(),
            &Scenario::new(ScenarioKind::Stress, 0.5),
            DEFAULT_DURATION_MINUTES,
            &mut tally,
        )
        .unwrap();

    let mut replay = TimeInRange::default();
    replay.extend(&output.data_points);

    assert_eq!(tally.summary(), replay.summary());
    assert_eq!(tally.summary().total(), 48);
}

#[test]
fn observers_combine_in_a_closure() {
    let mut recorder = StateRecorder::new();
    let mut tally = TimeInRange::new(80.0, 160.0).unwrap();

    let output = Simulator::seeded(3)
        .run_observed(
            &typical(),
            &Scenario::new(ScenarioKind::Meal, 1.0),
            DEFAULT_DURATION_MINUTES,
            &mut |event: &StepEvent| {
                recorder.observe(event);
                tally.observe(event);
            },
        )
        .unwrap();

    let states = recorder.states();
    assert_eq!(states.len(), output.data_points.len());
    for ((minute, state), point) in states.iter().zip(&output.data_points) {
        assert_eq!(*minute, point.time);
        assert!((state.glucose - point.glucose).abs() <= 0.05 + f64::EPSILON * 400.0);
    }
    assert_eq!(tally.summary().total(), 48);
}

use std::{sync::Arc, thread};

use glucoloop_engine::{
    Parameter, Scenario, ScenarioKind, SimulationError, Simulator, SimulatorParameters,
};
use glucoloop_store::{ManualClock, MemStorage, Storage, StoreError, run_and_save};
use jiff::{SignedDuration, Timestamp};

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
fn saved_runs_cover_the_default_horizon() {
    let storage = MemStorage::new();
    let mut simulator = Simulator::seeded(21);

    let saved = run_and_save(
        &storage,
        &mut simulator,
        &typical(),
        &Scenario::new(ScenarioKind::Exercise, 0.7),
    )
    .unwrap();

    assert_eq!(saved.data_points.len(), 48);
    assert_eq!(saved.data_points.last().unwrap().time, 235);
    assert_eq!(saved.scenario.kind, ScenarioKind::Exercise);
    assert_eq!(storage.list(), vec![saved]);
}

#[test]
fn records_are_stamped_by_the_store_clock() {
    let start: Timestamp = "2025-09-01T07:30:00Z".parse().unwrap();
    let clock = ManualClock::new(start);
    let storage = MemStorage::with_clock(&clock);
    let scenario = Scenario::new(ScenarioKind::Normal, 0.0);

    let first = run_and_save(&storage, &mut Simulator::seeded(4), &typical(), &scenario).unwrap();
    clock.advance(SignedDuration::from_mins(10));
    let second = run_and_save(&storage, &mut Simulator::seeded(4), &typical(), &scenario).unwrap();

    assert_eq!(first.created_at, start);
    assert_eq!(second.created_at.to_string(), "2025-09-01T07:40:00Z");
    assert_eq!(storage.get(&second.id).unwrap().created_at, second.created_at);
}

#[test]
fn seeded_runs_store_the_same_series() {
    let storage = MemStorage::new();
    let scenario = Scenario::new(ScenarioKind::Stress, 0.3);

    let first = run_and_save(&storage, &mut Simulator::seeded(8), &typical(), &scenario).unwrap();
    let second = run_and_save(&storage, &mut Simulator::seeded(8), &typical(), &scenario).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(first.output(), second.output());
    assert_eq!(storage.len(), 2);
}

#[test]
fn rejected_inputs_store_nothing() {
    let storage = MemStorage::new();
    let parameters = SimulatorParameters {
        correction_factor: 5.0,
        ..typical()
    };

    let err = run_and_save(
        &storage,
        &mut Simulator::seeded(0),
        &parameters,
        &Scenario::new(ScenarioKind::Normal, 0.0),
    )
    .unwrap_err();

    match err {
        StoreError::Simulation(SimulationError::InvalidParameters(err)) => {
            assert_eq!(err.parameter, Parameter::CorrectionFactor);
        }
        other => panic!("expected invalid parameters, got {other:?}"),
    }
    assert!(storage.is_empty());

    let err = run_and_save(
        &storage,
        &mut Simulator::seeded(0),
        &typical(),
        &Scenario::new(ScenarioKind::Meal, 1.5),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Simulation(SimulationError::InvalidScenario(_))
    ));
    assert!(storage.is_empty());
}

#[test]
fn concurrent_saves_are_all_kept() {
    let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());

    let handles: Vec<_> = ScenarioKind::ALL
        .into_iter()
        .enumerate()
        .map(|(index, kind)| {
            let storage = Arc::clone(&storage);
            thread::spawn(move || {
                let mut simulator = Simulator::seeded(index as u64);
                run_and_save(
                    storage.as_ref(),
                    &mut simulator,
                    &typical(),
                    &Scenario::new(kind, 0.5),
                )
                .unwrap()
                .id
            })
        })
        .collect();

    let ids: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(storage.list().len(), ScenarioKind::ALL.len());
    for id in ids {
        assert!(storage.get(&id).is_some());
    }
}

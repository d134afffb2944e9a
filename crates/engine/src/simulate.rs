//! The closed-loop simulation engine.
//!
//! [`simulate`] is the whole contract: parameters, scenario, and duration in;
//! trajectory and narration out. [`simulate_with`] and [`Simulator`] expose the
//! same run with an injectable [`EngineConfig`], [`NoiseSource`], and per-step
//! [`Observer`].

use glucoloop_core::Observer;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::{
    compartment::Pool,
    config::EngineConfig,
    error::SimulationError,
    event::{SimulationState, StepEvent},
    narration::{GlucoseBand, Narrator},
    noise::{NoiseSource, UniformNoise},
    output::{DataPoint, SimulationOutput, mean_glucose, round_to},
    params::SimulatorParameters,
    pid::PidController,
    scenario::Scenario,
};

/// Runs one simulation with the default config and entropy-seeded noise.
///
/// # Errors
///
/// Returns a [`SimulationError`] if the parameters, scenario, or duration are
/// invalid. Nothing is simulated in that case.
pub fn simulate(
    parameters: &SimulatorParameters,
    scenario: &Scenario,
    duration_minutes: u32,
) -> Result<SimulationOutput, SimulationError> {
    Simulator::new().run(parameters, scenario, duration_minutes)
}

/// Runs one simulation with an explicit config, noise source, and observer.
///
/// # Algorithm
///
/// 1. Validate the parameters, the scenario, and the duration, which must be a
///    positive multiple of the timestep.
/// 2. Start glucose at the target plus initial noise, with empty carb and
///    insulin pools and a zeroed controller.
/// 3. For each step:
///    - At the meal offset, if any carbs are eaten, deposit them and deliver a
///      bolus of `carbs / correction_factor * insulin_multiplier` units.
///    - Release this step's share of each pool. Absorbed carbs raise glucose by
///      `absorbed * timestep * glucose_multiplier`; decayed insulin lowers it by
///      `decayed * insulin_sensitivity_factor * insulin_multiplier`.
///    - Update the PID controller and deliver
///      `(prorated basal + correction) * insulin_multiplier` into the insulin pool.
///    - Apply both effects plus step noise to glucose, clamped to the limits.
///    - Record a data point, classify glucose on the configured cadence, and
///      emit a [`StepEvent`] to the observer.
/// 4. Close the log with the mean of the recorded glucose values.
///
/// # Errors
///
/// Returns a [`SimulationError`] if the inputs are invalid.
pub fn simulate_with<N, O>(
    parameters: &SimulatorParameters,
    scenario: &Scenario,
    duration_minutes: u32,
    config: &EngineConfig,
    noise: &mut N,
    observer: &mut O,
) -> Result<SimulationOutput, SimulationError>
where
    N: NoiseSource,
    O: Observer<StepEvent>,
{
    parameters.validate()?;
    scenario.validate()?;
    let steps = step_count(duration_minutes, config)?;

    debug!(
        scenario = %scenario.kind,
        intensity = scenario.intensity,
        duration_minutes,
        steps,
        "starting simulation"
    );

    let SimulatorParameters {
        carb_intake,
        insulin_sensitivity_factor,
        basal_rate,
        target_glucose,
        correction_factor,
        ..
    } = *parameters;
    let multipliers = scenario.multipliers();
    let limits = config.glucose_limits();
    let timestep = config.timestep_minutes();
    let dt = f64::from(timestep);
    let carb_steps = config.carb_absorption_steps();
    let insulin_steps = config.insulin_action_steps();

    let mut glucose = target_glucose + noise.sample(config.initial_noise());
    let mut carbs = Pool::empty();
    let mut insulin = Pool::empty();
    let mut pid = PidController::new(config.gains());

    let mut narrator = Narrator::new();
    narrator.started(scenario.kind, target_glucose, basal_rate);

    let mut data_points = Vec::with_capacity(steps as usize);

    for step in 0..steps {
        let time = step * timestep;
        let is_meal = time == config.meal_time_minutes();

        if is_meal && carb_intake > 0.0 {
            let bolus = carb_intake / correction_factor * multipliers.insulin;
            carbs.deposit(carb_intake);
            insulin.deposit(bolus);
            narrator.meal(time, carb_intake, bolus);
            debug!(time, carb_intake, bolus, "meal bolus delivered");
        }

        let carb_effect = carbs.release(carb_steps) * dt * multipliers.glucose;
        let insulin_effect =
            insulin.release(insulin_steps) * insulin_sensitivity_factor * multipliers.insulin;

        let output = pid.update(target_glucose, glucose, dt);
        let basal = basal_rate / 60.0 * dt;
        let correction = PidController::correction(output, config.correction_divisor());
        let delivered = (basal + correction) * multipliers.insulin;
        insulin.deposit(delivered);

        let change = carb_effect - insulin_effect + noise.sample(config.step_noise());
        glucose = (glucose + change).clamp(*limits.min(), *limits.max());

        let data_point = DataPoint {
            time,
            glucose: round_to(glucose, 1),
            insulin: round_to(delivered / dt * 60.0, 2),
            carbs: if is_meal { carb_intake } else { 0.0 },
        };
        data_points.push(data_point);

        if step % config.classify_every() == 0 {
            let band = GlucoseBand::classify(
                glucose,
                target_glucose,
                config.high_margin(),
                config.low_margin(),
            );
            narrator.classified(time, glucose, band);
        }

        let state = SimulationState {
            glucose,
            insulin_on_board: insulin.amount(),
            carbs_on_board: carbs.amount(),
            pid_integral: pid.integral(),
            previous_error: pid.previous_error(),
        };
        trace!(step, time, glucose, delivered, "step committed");
        observer.observe(&StepEvent {
            step,
            state,
            data_point,
        });
    }

    let mean = mean_glucose(&data_points).unwrap_or(glucose);
    narrator.completed(duration_minutes, mean);
    debug!(mean_glucose = mean, "simulation complete");

    Ok(SimulationOutput {
        data_points,
        algorithm_logs: narrator.finish(),
    })
}

/// Returns the number of steps in a run of `duration_minutes`.
fn step_count(duration_minutes: u32, config: &EngineConfig) -> Result<u32, SimulationError> {
    let timestep = config.timestep_minutes();
    if duration_minutes == 0 || duration_minutes % timestep != 0 {
        return Err(SimulationError::InvalidDuration {
            minutes: duration_minutes,
            timestep,
        });
    }
    Ok(duration_minutes / timestep)
}

/// A reusable engine handle that owns its config and noise source.
///
/// Successive runs draw from the same noise source, so a seeded simulator
/// reproduces the same sequence of runs.
///
/// # Example
///
/// ```
/// use glucoloop_engine::{Scenario, ScenarioKind, Simulator, SimulatorParameters};
///
/// let parameters = SimulatorParameters {
///     weight: 70.0,
///     carb_intake: 45.0,
///     insulin_sensitivity_factor: 50.0,
///     basal_rate: 1.0,
///     target_glucose: 110.0,
///     correction_factor: 50.0,
/// };
/// let scenario = Scenario::new(ScenarioKind::Normal, 0.5);
///
/// let output = Simulator::seeded(7).run(&parameters, &scenario, 240).unwrap();
/// assert_eq!(output.data_points.len(), 48);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator<N = UniformNoise<StdRng>> {
    config: EngineConfig,
    noise: N,
}

impl Simulator {
    /// Creates a simulator with the default config and entropy-seeded noise.
    #[must_use]
    pub fn new() -> Self {
        Self::with_noise(UniformNoise::from_entropy())
    }

    /// Creates a simulator whose noise is seeded for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_noise(UniformNoise::seeded(seed))
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NoiseSource> Simulator<N> {
    /// Creates a simulator with the default config and the given noise source.
    pub fn with_noise(noise: N) -> Self {
        Self {
            config: EngineConfig::default(),
            noise,
        }
    }

    /// Returns `self` using the given config.
    #[must_use]
    pub fn with_config(self, config: EngineConfig) -> Self {
        Self { config, ..self }
    }

    /// Returns the config used for every run.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs one simulation.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if the inputs are invalid.
    pub fn run(
        &mut self,
        parameters: &SimulatorParameters,
        scenario: &Scenario,
        duration_minutes: u32,
    ) -> Result<SimulationOutput, SimulationError> {
        self.run_observed(parameters, scenario, duration_minutes, &mut ())
    }

    /// Runs one simulation, reporting every step to `observer`.
    ///
    /// # Errors
    ///
    /// Returns a [`SimulationError`] if the inputs are invalid.
    pub fn run_observed<O: Observer<StepEvent>>(
        &mut self,
        parameters: &SimulatorParameters,
        scenario: &Scenario,
        duration_minutes: u32,
        observer: &mut O,
    ) -> Result<SimulationOutput, SimulationError> {
        simulate_with(
            parameters,
            scenario,
            duration_minutes,
            &self.config,
            &mut self.noise,
            observer,
        )
    }
}

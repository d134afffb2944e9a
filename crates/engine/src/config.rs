//! Tunable constants of the closed-loop engine.
//!
//! Every number that shapes a run lives here as a named default, and
//! [`EngineConfig`] carries a validated set of them into the engine.
//! [`EngineConfig::default`] reproduces the reference behavior exactly.

use glucoloop_core::Bounds;
use thiserror::Error;
use uom::si::{
    f64::{Ratio, Time},
    ratio::ratio,
    time::minute,
};

use crate::pid::Gains;

/// Fixed size of one simulation step, in minutes.
pub const TIMESTEP_MINUTES: u32 = 5;

/// Run length used when the caller does not choose one, in minutes.
pub const DEFAULT_DURATION_MINUTES: u32 = 240;

/// Horizon over which carbs-on-board are absorbed, in minutes.
pub const CARB_ABSORPTION_MINUTES: u32 = 180;

/// Horizon over which insulin-on-board acts, in minutes.
pub const INSULIN_ACTION_MINUTES: u32 = 300;

/// Offset from the start of the run at which the meal is eaten, in minutes.
pub const MEAL_TIME_MINUTES: u32 = 60;

/// Number of steps between glucose classification log lines.
pub const CLASSIFY_EVERY_STEPS: u32 = 12;

/// Default PID gains.
pub const DEFAULT_GAINS: Gains = Gains {
    kp: 0.02,
    ki: 0.001,
    kd: 0.015,
};

/// Divisor converting raw controller output into insulin units.
pub const CORRECTION_DIVISOR: f64 = 100.0;

/// Physiological floor and ceiling that glucose is clamped to, in mg/dL.
pub const GLUCOSE_LIMITS: Bounds<f64> = Bounds::new(40.0, 400.0);

/// Half-width of the noise added to the starting glucose, in mg/dL.
pub const INITIAL_NOISE_MG_DL: f64 = 10.0;

/// Half-width of the noise added to each step's glucose change, in mg/dL.
pub const STEP_NOISE_MG_DL: f64 = 1.5;

/// Glucose above `target + HIGH_MARGIN_MG_DL` is narrated as high.
pub const HIGH_MARGIN_MG_DL: f64 = 30.0;

/// Glucose below `target - LOW_MARGIN_MG_DL` is narrated as a low risk.
pub const LOW_MARGIN_MG_DL: f64 = 20.0;

/// Errors that can occur when validating an [`EngineConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("timestep must be at least one minute")]
    Timestep,

    #[error("carb absorption horizon must span at least one step")]
    CarbAbsorption,

    #[error("insulin action horizon must span at least one step")]
    InsulinAction,

    #[error("meal time must be a multiple of the timestep")]
    MealTime,

    #[error("classification cadence must be at least one step")]
    Cadence,

    #[error("PID gains must be finite and non-negative")]
    Gains,

    #[error("correction divisor must be finite and positive")]
    CorrectionDivisor,

    #[error("glucose floor must be finite and below the ceiling")]
    GlucoseLimits,

    #[error("noise half-widths must be finite and non-negative")]
    Noise,

    #[error("classification margins must be finite and non-negative")]
    Margins,
}

/// Validated configuration for the simulation engine.
///
/// Construct with [`EngineConfig::default`] and adjust with the `with_*`
/// methods, each of which re-validates the whole config.
///
/// # Example
///
/// ```
/// use glucoloop_engine::{EngineConfig, config::ConfigError};
///
/// let config = EngineConfig::default().with_meal_time(90).unwrap();
/// assert_eq!(config.meal_time_minutes(), 90);
///
/// assert_eq!(
///     EngineConfig::default().with_meal_time(62),
///     Err(ConfigError::MealTime),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    timestep_minutes: u32,
    carb_absorption_minutes: u32,
    insulin_action_minutes: u32,
    meal_time_minutes: u32,
    classify_every: u32,
    gains: Gains,
    correction_divisor: f64,
    glucose_limits: Bounds<f64>,
    initial_noise: f64,
    step_noise: f64,
    high_margin: f64,
    low_margin: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timestep_minutes: TIMESTEP_MINUTES,
            carb_absorption_minutes: CARB_ABSORPTION_MINUTES,
            insulin_action_minutes: INSULIN_ACTION_MINUTES,
            meal_time_minutes: MEAL_TIME_MINUTES,
            classify_every: CLASSIFY_EVERY_STEPS,
            gains: DEFAULT_GAINS,
            correction_divisor: CORRECTION_DIVISOR,
            glucose_limits: GLUCOSE_LIMITS,
            initial_noise: INITIAL_NOISE_MG_DL,
            step_noise: STEP_NOISE_MG_DL,
            high_margin: HIGH_MARGIN_MG_DL,
            low_margin: LOW_MARGIN_MG_DL,
        }
    }
}

impl EngineConfig {
    /// Returns `self` with a new timestep, in minutes.
    ///
    /// The current meal time must stay on the new step grid. To move both at
    /// once, use [`EngineConfig::with_timestep_and_meal_time`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MealTime`] if the current meal time is not a
    /// multiple of `minutes`, or another error if the resulting config is
    /// invalid.
    pub fn with_timestep(self, minutes: u32) -> Result<Self, ConfigError> {
        Self {
            timestep_minutes: minutes,
            ..self
        }
        .validated()
    }

    /// Returns `self` with a new timestep and meal time, in minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the meal time is not a multiple of the timestep,
    /// or if the resulting config is otherwise invalid.
    pub fn with_timestep_and_meal_time(
        self,
        timestep_minutes: u32,
        meal_time_minutes: u32,
    ) -> Result<Self, ConfigError> {
        Self {
            timestep_minutes,
            meal_time_minutes,
            ..self
        }
        .validated()
    }

    /// Returns `self` with new carb absorption and insulin action horizons, in minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if either horizon is shorter than one step.
    pub fn with_horizons(
        self,
        carb_absorption_minutes: u32,
        insulin_action_minutes: u32,
    ) -> Result<Self, ConfigError> {
        Self {
            carb_absorption_minutes,
            insulin_action_minutes,
            ..self
        }
        .validated()
    }

    /// Returns `self` with a new meal offset, in minutes.
    ///
    /// # Errors
    ///
    /// Returns an error if the offset is not a multiple of the timestep.
    pub fn with_meal_time(self, minutes: u32) -> Result<Self, ConfigError> {
        Self {
            meal_time_minutes: minutes,
            ..self
        }
        .validated()
    }

    /// Returns `self` with a new classification cadence, in steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the cadence is zero.
    pub fn with_classify_every(self, steps: u32) -> Result<Self, ConfigError> {
        Self {
            classify_every: steps,
            ..self
        }
        .validated()
    }

    /// Returns `self` with new PID gains.
    ///
    /// # Errors
    ///
    /// Returns an error if any gain is negative or non-finite.
    pub fn with_gains(self, gains: Gains) -> Result<Self, ConfigError> {
        Self { gains, ..self }.validated()
    }

    /// Returns `self` with a new correction divisor.
    ///
    /// # Errors
    ///
    /// Returns an error if the divisor is not finite and positive.
    pub fn with_correction_divisor(self, divisor: f64) -> Result<Self, ConfigError> {
        Self {
            correction_divisor: divisor,
            ..self
        }
        .validated()
    }

    /// Returns `self` with a new glucose floor and ceiling, in mg/dL.
    ///
    /// # Errors
    ///
    /// Returns an error if the floor is not strictly below the ceiling.
    pub fn with_glucose_limits(self, floor: f64, ceiling: f64) -> Result<Self, ConfigError> {
        Self {
            glucose_limits: Bounds::new(floor, ceiling),
            ..self
        }
        .validated()
    }

    /// Returns `self` with new noise half-widths, in mg/dL.
    ///
    /// # Errors
    ///
    /// Returns an error if either half-width is negative or non-finite.
    pub fn with_noise(self, initial: f64, step: f64) -> Result<Self, ConfigError> {
        Self {
            initial_noise: initial,
            step_noise: step,
            ..self
        }
        .validated()
    }

    /// Returns `self` with new classification margins, in mg/dL.
    ///
    /// # Errors
    ///
    /// Returns an error if either margin is negative or non-finite.
    pub fn with_margins(self, high: f64, low: f64) -> Result<Self, ConfigError> {
        Self {
            high_margin: high,
            low_margin: low,
            ..self
        }
        .validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let is_non_negative = |x: f64| x.is_finite() && x >= 0.0;

        if self.timestep_minutes == 0 {
            return Err(ConfigError::Timestep);
        }
        if self.carb_absorption_minutes < self.timestep_minutes {
            return Err(ConfigError::CarbAbsorption);
        }
        if self.insulin_action_minutes < self.timestep_minutes {
            return Err(ConfigError::InsulinAction);
        }
        if self.meal_time_minutes % self.timestep_minutes != 0 {
            return Err(ConfigError::MealTime);
        }
        if self.classify_every == 0 {
            return Err(ConfigError::Cadence);
        }
        let Gains { kp, ki, kd } = self.gains;
        if ![kp, ki, kd].into_iter().all(is_non_negative) {
            return Err(ConfigError::Gains);
        }
        if !self.correction_divisor.is_finite() || self.correction_divisor <= 0.0 {
            return Err(ConfigError::CorrectionDivisor);
        }
        let (floor, ceiling) = (*self.glucose_limits.min(), *self.glucose_limits.max());
        if !floor.is_finite() || !ceiling.is_finite() || floor >= ceiling {
            return Err(ConfigError::GlucoseLimits);
        }
        if !is_non_negative(self.initial_noise) || !is_non_negative(self.step_noise) {
            return Err(ConfigError::Noise);
        }
        if !is_non_negative(self.high_margin) || !is_non_negative(self.low_margin) {
            return Err(ConfigError::Margins);
        }

        Ok(self)
    }

    /// Returns the step size in minutes.
    #[must_use]
    pub fn timestep_minutes(&self) -> u32 {
        self.timestep_minutes
    }

    /// Returns the step size as a time quantity.
    #[must_use]
    pub fn timestep(&self) -> Time {
        Time::new::<minute>(f64::from(self.timestep_minutes))
    }

    /// Returns the carb absorption horizon.
    #[must_use]
    pub fn carb_absorption(&self) -> Time {
        Time::new::<minute>(f64::from(self.carb_absorption_minutes))
    }

    /// Returns the insulin action horizon.
    #[must_use]
    pub fn insulin_action(&self) -> Time {
        Time::new::<minute>(f64::from(self.insulin_action_minutes))
    }

    /// Returns the number of steps the carb absorption horizon spans.
    ///
    /// Each step absorbs `1 / carb_absorption_steps` of the carbs on board.
    #[must_use]
    pub fn carb_absorption_steps(&self) -> f64 {
        let steps: Ratio = (self.carb_absorption() / self.timestep()).into();
        steps.get::<ratio>()
    }

    /// Returns the number of steps the insulin action horizon spans.
    #[must_use]
    pub fn insulin_action_steps(&self) -> f64 {
        let steps: Ratio = (self.insulin_action() / self.timestep()).into();
        steps.get::<ratio>()
    }

    /// Returns the meal offset in minutes.
    #[must_use]
    pub fn meal_time_minutes(&self) -> u32 {
        self.meal_time_minutes
    }

    /// Returns how many steps separate classification log lines.
    #[must_use]
    pub fn classify_every(&self) -> u32 {
        self.classify_every
    }

    /// Returns the PID gains.
    #[must_use]
    pub fn gains(&self) -> Gains {
        self.gains
    }

    /// Returns the divisor applied to controller output.
    #[must_use]
    pub fn correction_divisor(&self) -> f64 {
        self.correction_divisor
    }

    /// Returns the glucose floor and ceiling.
    #[must_use]
    pub fn glucose_limits(&self) -> Bounds<f64> {
        self.glucose_limits
    }

    /// Returns the half-width of the starting glucose noise.
    #[must_use]
    pub fn initial_noise(&self) -> f64 {
        self.initial_noise
    }

    /// Returns the half-width of the per-step glucose noise.
    #[must_use]
    pub fn step_noise(&self) -> f64 {
        self.step_noise
    }

    /// Returns the margin above target at which glucose is narrated as high.
    #[must_use]
    pub fn high_margin(&self) -> f64 {
        self.high_margin
    }

    /// Returns the margin below target at which glucose is narrated as a low risk.
    #[must_use]
    pub fn low_margin(&self) -> f64 {
        self.low_margin
    }
}

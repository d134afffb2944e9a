//! Closed-loop glucose–insulin simulation.
//!
//! This crate steps a two-compartment physiological model forward in fixed
//! increments, closes the loop with a PID insulin controller, and narrates the
//! run in a human-readable log:
//!
//! - [`simulate`] — the one-shot contract: parameters, scenario, duration in;
//!   [`SimulationOutput`] out
//! - [`Simulator`] / [`simulate_with`] — the same run with an injectable
//!   [`EngineConfig`], [`NoiseSource`](noise::NoiseSource), and per-step
//!   [`Observer`](glucoloop_core::Observer)
//!
//! Runs are pure apart from their noise source. They share no state, so any
//! number may execute in parallel.
//!
//! # Example
//!
//! ```
//! use glucoloop_engine::{
//!     DEFAULT_DURATION_MINUTES, Scenario, ScenarioKind, SimulatorParameters, simulate,
//! };
//!
//! let parameters = SimulatorParameters {
//!     weight: 70.0,
//!     carb_intake: 45.0,
//!     insulin_sensitivity_factor: 50.0,
//!     basal_rate: 1.0,
//!     target_glucose: 110.0,
//!     correction_factor: 50.0,
//! };
//! let scenario = Scenario::new(ScenarioKind::Exercise, 0.6);
//!
//! let output = simulate(&parameters, &scenario, DEFAULT_DURATION_MINUTES).unwrap();
//! assert_eq!(output.data_points.len(), 48);
//! assert!(output.algorithm_logs[0].message.contains("exercise"));
//! ```

pub mod config;
pub mod narration;
pub mod noise;

mod compartment;
mod error;
mod event;
mod output;
mod params;
mod pid;
mod scenario;
mod simulate;

pub use compartment::Pool;
pub use config::{DEFAULT_DURATION_MINUTES, EngineConfig};
pub use error::SimulationError;
pub use event::{SimulationState, StepEvent};
pub use narration::LogEntry;
pub use output::{DataPoint, SimulationOutput};
pub use params::{Parameter, ParameterError, SimulatorParameters};
pub use pid::{Gains, PidController};
pub use scenario::{Multipliers, Scenario, ScenarioError, ScenarioKind};
pub use simulate::{Simulator, simulate, simulate_with};

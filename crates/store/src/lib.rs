//! Persistence for glucoloop simulation results.
//!
//! The engine itself never stores anything. This crate wraps a finished run
//! in a [`SimulationResult`] record and keeps records behind the [`Storage`]
//! trait. [`MemStorage`] is the in-process implementation. It also caches
//! [`ResearchArticle`] lists for a bounded time.
//!
//! # Example
//!
//! ```
//! use glucoloop_engine::{Scenario, ScenarioKind, Simulator, SimulatorParameters};
//! use glucoloop_store::{MemStorage, Storage, run_and_save};
//!
//! let storage = MemStorage::new();
//! let parameters = SimulatorParameters {
//!     weight: 70.0,
//!     carb_intake: 45.0,
//!     insulin_sensitivity_factor: 50.0,
//!     basal_rate: 1.0,
//!     target_glucose: 110.0,
//!     correction_factor: 50.0,
//! };
//! let scenario = Scenario::new(ScenarioKind::Meal, 0.5);
//!
//! let saved = run_and_save(&storage, &mut Simulator::seeded(1), &parameters, &scenario).unwrap();
//! assert_eq!(storage.get(&saved.id), Some(saved));
//! ```

mod article;
mod clock;
mod error;
mod record;
mod service;
mod storage;

pub use article::{DateRange, ResearchArticle, ResearchFilter};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::StoreError;
pub use record::SimulationResult;
pub use service::run_and_save;
pub use storage::{DEFAULT_ARTICLE_TTL, MemStorage, Storage};

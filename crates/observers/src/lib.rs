//! Reusable observers for glucoloop simulations.
//!
//! Each type here implements [`Observer<StepEvent>`] and can be lent to
//! [`Simulator::run_observed`] or [`simulate_with`]:
//!
//! - [`StateRecorder`] — keeps every internal state the engine reports
//! - [`TimeInRange`] — tallies how much of a trajectory sits inside a glucose band
//!
//! [`Observer<StepEvent>`]: glucoloop_core::Observer
//! [`StepEvent`]: glucoloop_engine::StepEvent
//! [`Simulator::run_observed`]: glucoloop_engine::Simulator::run_observed
//! [`simulate_with`]: glucoloop_engine::simulate_with

mod recorder;
mod time_in_range;

pub use recorder::StateRecorder;
pub use time_in_range::{RangeSummary, TimeInRange};

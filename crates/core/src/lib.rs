//! Core traits and types for the glucoloop workspace.
//!
//! This crate defines the small set of abstractions that the engine, the
//! observers, and the store build on:
//!
//! - [`Observer`] — receives a borrowed event after each simulation step
//! - [`Bounds`] — an inclusive numeric range used to validate inputs
//! - [`NonNegative`] — a value that is guaranteed to be zero or greater

mod bounds;
mod non_negative;
mod observer;

pub use bounds::{Bounds, ConstraintError};
pub use non_negative::NonNegative;
pub use observer::Observer;

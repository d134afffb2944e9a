use std::{cmp::Ordering, fmt};

use serde::Serialize;
use thiserror::Error;

/// An error returned when a value falls outside its [`Bounds`].
///
/// This enum is marked `#[non_exhaustive]` and may include additional variants
/// in future releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value is not a number")]
    NotANumber,
    #[error("value is below the minimum allowed")]
    BelowMinimum,
    #[error("value is above the maximum allowed")]
    AboveMaximum,
}

/// An inclusive range `[min, max]` that a value must lie within.
///
/// Values exactly at either end are accepted.
/// Values that cannot be compared against the ends (such as `NaN`) are rejected.
///
/// # Example
///
/// ```
/// use glucoloop_core::{Bounds, ConstraintError};
///
/// let bounds = Bounds::new(70.0, 180.0);
/// assert!(bounds.check(&70.0).is_ok());
/// assert!(bounds.check(&180.0).is_ok());
/// assert_eq!(bounds.check(&69.0), Err(ConstraintError::BelowMinimum));
/// assert_eq!(bounds.check(&f64::NAN), Err(ConstraintError::NotANumber));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds<T> {
    min: T,
    max: T,
}

impl<T> Bounds<T> {
    /// Creates bounds from an inclusive minimum and maximum.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Returns the inclusive lower bound.
    pub fn min(&self) -> &T {
        &self.min
    }

    /// Returns the inclusive upper bound.
    pub fn max(&self) -> &T {
        &self.max
    }
}

impl<T: PartialOrd> Bounds<T> {
    /// Checks that `value` lies within the bounds.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::BelowMinimum`] if `value < min`.
    /// - [`ConstraintError::AboveMaximum`] if `value > max`.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined (e.g., NaN).
    pub fn check(&self, value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&self.min), value.partial_cmp(&self.max)) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }

    /// Returns `true` if `value` lies within the bounds.
    pub fn contains(&self, value: &T) -> bool {
        self.check(value).is_ok()
    }
}

impl<T: fmt::Display> fmt::Display for Bounds<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds<f64> = Bounds::new(10.0, 100.0);

    #[test]
    fn accepts_values_at_either_end() {
        assert!(BOUNDS.check(&10.0).is_ok());
        assert!(BOUNDS.check(&100.0).is_ok());
        assert!(BOUNDS.contains(&55.5));
    }

    #[test]
    fn rejects_values_outside() {
        assert_eq!(BOUNDS.check(&9.0), Err(ConstraintError::BelowMinimum));
        assert_eq!(BOUNDS.check(&101.0), Err(ConstraintError::AboveMaximum));
        assert!(!BOUNDS.contains(&-1.0));
    }

    #[test]
    fn rejects_nan() {
        assert_eq!(BOUNDS.check(&f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn works_with_integers() {
        let bounds = Bounds::new(1_u32, 3);
        assert!(bounds.check(&2).is_ok());
        assert_eq!(bounds.check(&0), Err(ConstraintError::BelowMinimum));
        assert_eq!(bounds.check(&4), Err(ConstraintError::AboveMaximum));
    }

    #[test]
    fn displays_as_interval() {
        assert_eq!(Bounds::new(20, 300).to_string(), "[20, 300]");
    }
}

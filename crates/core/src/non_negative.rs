use std::ops::{Add, Sub};

use num_traits::Zero;

/// A wrapper type representing values that are guaranteed to be non-negative.
///
/// `NonNegative<T>` is a lightweight newtype that wraps a value of type `T` and
/// enforces the invariant that the value is greater than or equal to zero.
/// This invariant is verified at construction time and preserved by all public
/// operations on the type.
///
/// # Examples
///
/// ```
/// use glucoloop_core::NonNegative;
///
/// let x = NonNegative::new(3.0).unwrap();
/// assert_eq!(x.into_inner(), 3.0);
///
/// assert!(NonNegative::new(-5.0).is_none());
/// assert!(NonNegative::new(f64::NAN).is_none());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative<T>(T);

impl<T> NonNegative<T>
where
    T: PartialOrd + Zero,
{
    /// Constructs a new `NonNegative<T>` if the input value is non-negative.
    ///
    /// Returns `Some(Self)` if `value >= 0`, or `None` otherwise.
    pub fn new(value: T) -> Option<Self> {
        if value >= T::zero() {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Returns the additive identity (zero) wrapped as a `NonNegative`.
    #[must_use]
    pub fn zero() -> Self {
        Self(T::zero())
    }
}

impl<T> NonNegative<T>
where
    T: PartialOrd + Zero + Sub<Output = T>,
{
    /// Subtracts `rhs`, flooring the result at zero.
    #[must_use]
    pub fn saturating_sub(self, rhs: T) -> Self {
        let result = self.0 - rhs;
        if result >= T::zero() {
            Self(result)
        } else {
            Self(T::zero())
        }
    }
}

impl<T> AsRef<T> for NonNegative<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

/// Adds two `NonNegative<T>` values.
///
/// The invariant is checked in debug builds.
///
/// # Panics
///
/// Panics in debug builds if the sum is unexpectedly negative.
impl<T> Add for NonNegative<T>
where
    T: Add<Output = T> + PartialOrd + Zero,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let result = self.0 + rhs.0;
        debug_assert!(
            result >= T::zero(),
            "Addition produced a negative value, violating NonNegative invariant"
        );
        Self(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn non_negative_floats() {
        assert!(NonNegative::new(2.0).is_some(), "Positive value is ok");
        assert!(NonNegative::new(0.0).is_some(), "Zero value is ok");
        assert!(NonNegative::new(-2.0).is_none(), "Negative value is not ok");
        assert!(NonNegative::new(f64::NAN).is_none(), "NaN is not ok");
    }

    #[test]
    fn addition_keeps_invariant() {
        let one = NonNegative::new(1.5).unwrap();
        let total = one + one + NonNegative::zero();
        assert_relative_eq!(total.into_inner(), 3.0);
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        let pool = NonNegative::new(2.0).unwrap();
        assert_relative_eq!(pool.saturating_sub(0.5).into_inner(), 1.5);
        assert_relative_eq!(pool.saturating_sub(5.0).into_inner(), 0.0);
    }
}

//! Sources of physiological noise.
//!
//! The engine perturbs the starting glucose and every step's glucose change
//! with a small symmetric delta. The [`NoiseSource`] trait makes that source
//! injectable, so runs can be made reproducible without turning noise off.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Produces bounded, symmetric pseudo-random deltas.
pub trait NoiseSource {
    /// Returns a delta in `[-half_width, half_width)`.
    ///
    /// A `half_width` of zero must yield zero.
    fn sample(&mut self, half_width: f64) -> f64;
}

/// Uniformly distributed noise drawn from a random number generator.
///
/// # Example
///
/// ```
/// use glucoloop_engine::noise::{NoiseSource, UniformNoise};
///
/// let mut a = UniformNoise::seeded(7);
/// let mut b = UniformNoise::seeded(7);
/// assert_eq!(a.sample(10.0), b.sample(10.0));
/// ```
#[derive(Debug, Clone)]
pub struct UniformNoise<R> {
    rng: R,
}

impl<R: Rng> UniformNoise<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformNoise<StdRng> {
    /// Creates a generator that yields the same sequence for the same seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Creates a generator seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> NoiseSource for UniformNoise<R> {
    fn sample(&mut self, half_width: f64) -> f64 {
        if half_width > 0.0 {
            self.rng.gen_range(-half_width..half_width)
        } else {
            0.0
        }
    }
}

/// A noise source that never perturbs anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Silent;

impl NoiseSource for Silent {
    fn sample(&mut self, _half_width: f64) -> f64 {
        0.0
    }
}

impl<F> NoiseSource for F
where
    F: FnMut(f64) -> f64,
{
    fn sample(&mut self, half_width: f64) -> f64 {
        self(half_width)
    }
}

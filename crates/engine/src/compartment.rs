use glucoloop_core::NonNegative;

/// A decaying mass-balance compartment, such as carbs- or insulin-on-board.
///
/// Each step releases a fixed fraction, `1 / horizon_steps`, of whatever is
/// currently in the pool. The amount held can never go negative.
///
/// # Example
///
/// ```
/// use glucoloop_engine::Pool;
///
/// let mut carbs = Pool::empty();
/// carbs.deposit(36.0);
/// assert_eq!(carbs.release(36.0), 1.0);
/// assert_eq!(carbs.amount(), 35.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pool(NonNegative<f64>);

impl Pool {
    /// Creates an empty pool.
    #[must_use]
    pub fn empty() -> Self {
        Self(NonNegative::zero())
    }

    /// Adds `amount` to the pool.
    ///
    /// Negative and `NaN` amounts are ignored, so the pool stays non-negative.
    pub fn deposit(&mut self, amount: f64) {
        if let Some(amount) = NonNegative::new(amount) {
            self.0 = self.0 + amount;
        }
    }

    /// Removes and returns this step's share of the pool.
    ///
    /// The share is `amount / horizon_steps`, and `horizon_steps` must be
    /// at least one.
    pub fn release(&mut self, horizon_steps: f64) -> f64 {
        let released = self.amount() / horizon_steps;
        self.0 = self.0.saturating_sub(released);
        released
    }

    /// Returns the amount currently held.
    #[must_use]
    pub fn amount(&self) -> f64 {
        *self.0.as_ref()
    }
}

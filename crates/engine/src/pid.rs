//! Proportional-integral-derivative glucose controller.

use serde::{Deserialize, Serialize};

/// Proportional, integral, and derivative gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

/// A PID controller on the glucose error.
///
/// The error is `target - glucose`, so glucose above target produces a
/// negative error. The controller output is
///
/// ```text
/// output = kp * error + ki * integral + kd * derivative
/// ```
///
/// where the integral accumulates `error * dt` and the derivative is
/// `(error - previous_error) / dt`.
///
/// # Limitation
///
/// Only the non-negative part of the output becomes correction insulin (see
/// [`PidController::correction`]). The controller never subtracts from the
/// basal delivery, so it cannot suspend insulin on a predicted low; the only
/// relief comes from insulin-on-board decaying naturally. With the error sign
/// above, positive output (and so correction insulin) arises when glucose sits
/// below target or is falling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidController {
    gains: Gains,
    integral: f64,
    previous_error: f64,
}

impl PidController {
    /// Creates a controller with a zeroed integral and previous error.
    #[must_use]
    pub fn new(gains: Gains) -> Self {
        Self {
            gains,
            integral: 0.0,
            previous_error: 0.0,
        }
    }

    /// Advances the controller by one step and returns its raw output.
    ///
    /// `dt` is the step size in minutes and must be positive.
    pub fn update(&mut self, target: f64, glucose: f64, dt: f64) -> f64 {
        let Gains { kp, ki, kd } = self.gains;

        let error = target - glucose;
        self.integral += error * dt;
        let derivative = (error - self.previous_error) / dt;
        self.previous_error = error;

        kp * error + ki * self.integral + kd * derivative
    }

    /// Converts raw controller output into correction insulin units.
    ///
    /// Negative output is discarded rather than reducing delivery.
    #[must_use]
    pub fn correction(output: f64, divisor: f64) -> f64 {
        (output / divisor).max(0.0)
    }

    /// Returns the accumulated integral of error over time.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Returns the error seen on the most recent update.
    #[must_use]
    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }
}

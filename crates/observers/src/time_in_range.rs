use glucoloop_core::{Bounds, Observer};
use glucoloop_engine::{DataPoint, StepEvent};
use serde::Serialize;

/// The consensus clinical target band, in mg/dL.
const DEFAULT_BAND: Bounds<f64> = Bounds::new(70.0, 180.0);

/// Tallies recorded glucose values against an inclusive target band.
///
/// Values are counted as they appear in each step's [`DataPoint`],
/// so the tally matches what a caller sees in the output series.
#[derive(Debug, Clone, Copy)]
pub struct TimeInRange {
    band: Bounds<f64>,
    below: u32,
    within: u32,
    above: u32,
}

/// Counts of samples below, inside, and above a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeSummary {
    pub below: u32,
    pub within: u32,
    pub above: u32,
}

impl TimeInRange {
    /// Creates a tally for the band `[low, high]`.
    ///
    /// Returns `None` unless `low <= high` and both are finite.
    #[must_use]
    pub fn new(low: f64, high: f64) -> Option<Self> {
        if !(low.is_finite() && high.is_finite() && low <= high) {
            return None;
        }
        Some(Self::with_band(Bounds::new(low, high)))
    }

    fn with_band(band: Bounds<f64>) -> Self {
        Self {
            band,
            below: 0,
            within: 0,
            above: 0,
        }
    }

    #[must_use]
    pub fn band(&self) -> &Bounds<f64> {
        &self.band
    }

    /// Adds one sample to the tally.
    pub fn record(&mut self, point: &DataPoint) {
        if point.glucose < *self.band.min() {
            self.below += 1;
        } else if point.glucose > *self.band.max() {
            self.above += 1;
        } else {
            self.within += 1;
        }
    }

    /// Tallies an already finished series.
    pub fn extend<'a>(&mut self, points: impl IntoIterator<Item = &'a DataPoint>) {
        for point in points {
            self.record(point);
        }
    }

    #[must_use]
    pub fn summary(&self) -> RangeSummary {
        RangeSummary {
            below: self.below,
            within: self.within,
            above: self.above,
        }
    }
}

impl Default for TimeInRange {
    fn default() -> Self {
        Self::with_band(DEFAULT_BAND)
    }
}

impl Observer<StepEvent> for TimeInRange {
    fn observe(&mut self, event: &StepEvent) {
        self.record(&event.data_point);
    }
}

impl RangeSummary {
    #[must_use]
    pub fn total(&self) -> u32 {
        self.below + self.within + self.above
    }

    /// Returns the share of samples inside the band, or `None` for an empty tally.
    #[must_use]
    pub fn fraction_in_range(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            total => Some(f64::from(self.within) / f64::from(total)),
        }
    }
}

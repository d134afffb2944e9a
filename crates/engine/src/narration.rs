//! Human-readable narration of a run.
//!
//! Each [`LogEntry`] is a minute offset plus a message, rendered as
//! `[HH:MM] message`. The [`Narrator`] appends entries in simulation order.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::{output::round_to, scenario::ScenarioKind};

/// A timestamped narration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Minutes from the start of the run.
    pub minute: u32,
    pub message: String,
}

impl LogEntry {
    pub fn new(minute: u32, message: impl Into<String>) -> Self {
        Self {
            minute,
            message: message.into(),
        }
    }
}

/// Formats a minute offset as a zero-padded `HH:MM` clock.
///
/// ```
/// use glucoloop_engine::narration::clock;
///
/// assert_eq!(clock(0), "00:00");
/// assert_eq!(clock(245), "04:05");
/// ```
#[must_use]
pub fn clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", clock(self.minute), self.message)
    }
}

/// Error returned when a string is not a `[HH:MM] message` line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed log line {0:?}")]
pub struct ParseLogEntryError(String);

impl FromStr for LogEntry {
    type Err = ParseLogEntryError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseLogEntryError(line.to_owned());

        let rest = line.strip_prefix('[').ok_or_else(malformed)?;
        let (stamp, message) = rest.split_once("] ").ok_or_else(malformed)?;
        let (hours, minutes) = stamp.split_once(':').ok_or_else(malformed)?;
        let hours: u32 = hours.parse().map_err(|_| malformed())?;
        let minutes: u32 = minutes.parse().map_err(|_| malformed())?;
        if minutes >= 60 {
            return Err(malformed());
        }

        Ok(Self::new(hours * 60 + minutes, message))
    }
}

impl Serialize for LogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LogEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let line = String::deserialize(deserializer)?;
        line.parse().map_err(serde::de::Error::custom)
    }
}

/// How a glucose reading compares with the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlucoseBand {
    /// Above `target + high_margin`.
    High,
    /// Below `target - low_margin`.
    LowRisk,
    InRange,
}

impl GlucoseBand {
    /// Classifies `glucose` against `target`.
    ///
    /// Both margin comparisons are strict, so readings exactly at a margin are
    /// in range.
    #[must_use]
    pub fn classify(glucose: f64, target: f64, high_margin: f64, low_margin: f64) -> Self {
        if glucose > target + high_margin {
            GlucoseBand::High
        } else if glucose < target - low_margin {
            GlucoseBand::LowRisk
        } else {
            GlucoseBand::InRange
        }
    }
}

/// Builds the ordered log of a run.
#[derive(Debug, Default)]
pub struct Narrator {
    entries: Vec<LogEntry>,
}

impl Narrator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, minute: u32, message: String) {
        self.entries.push(LogEntry::new(minute, message));
    }

    /// Opens the log with the scenario, target, and basal rate.
    ///
    /// Two-decimal amounts round halves away from zero, so 0.125 reads `0.13`.
    pub fn started(&mut self, kind: ScenarioKind, target_glucose: f64, basal_rate: f64) {
        let basal_rate = round_to(basal_rate, 2);
        self.push(0, format!("Simulation started - Scenario: {kind}"));
        self.push(0, format!("Target glucose: {target_glucose} mg/dL"));
        self.push(0, format!("Basal rate: {basal_rate:.2} U/hr"));
    }

    /// Records the meal and the bolus that covers it.
    pub fn meal(&mut self, minute: u32, carbs: f64, bolus_units: f64) {
        let bolus_units = round_to(bolus_units, 2);
        self.push(minute, format!("Meal detected: {carbs}g carbs"));
        self.push(minute, format!("Bolus delivered: {bolus_units:.2} U"));
    }

    /// Records a periodic glucose classification.
    pub fn classified(&mut self, minute: u32, glucose: f64, band: GlucoseBand) {
        let rounded = glucose.round();
        let message = match band {
            GlucoseBand::High => {
                format!("High glucose detected ({rounded} mg/dL) - increasing insulin")
            }
            GlucoseBand::LowRisk => {
                format!("Low glucose risk ({rounded} mg/dL) - reducing insulin")
            }
            GlucoseBand::InRange => format!("Glucose in target range ({rounded} mg/dL)"),
        };
        self.push(minute, message);
    }

    /// Closes the log with the completion banner and mean glucose.
    pub fn completed(&mut self, minute: u32, mean_glucose: f64) {
        self.push(minute, "Simulation complete".to_owned());
        self.push(
            minute,
            format!("Average glucose: {} mg/dL", mean_glucose.round()),
        );
    }

    /// Returns the entries written so far.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Consumes the narrator and returns its entries.
    #[must_use]
    pub fn finish(self) -> Vec<LogEntry> {
        self.entries
    }
}

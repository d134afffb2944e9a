use std::{fmt, str::FromStr};

use glucoloop_core::{Bounds, ConstraintError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The physiological context of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Normal,
    Meal,
    Exercise,
    Stress,
    MissedBolus,
}

/// Scaling applied to glucose-raising and insulin effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    /// Scales the glucose rise from absorbed carbs.
    pub glucose: f64,
    /// Scales the meal bolus, each step's delivery, and the insulin effect.
    pub insulin: f64,
}

impl ScenarioKind {
    /// All scenario kinds.
    pub const ALL: [ScenarioKind; 5] = [
        ScenarioKind::Normal,
        ScenarioKind::Meal,
        ScenarioKind::Exercise,
        ScenarioKind::Stress,
        ScenarioKind::MissedBolus,
    ];

    /// Returns the fixed multipliers for this kind.
    #[must_use]
    pub const fn multipliers(self) -> Multipliers {
        let (glucose, insulin) = match self {
            ScenarioKind::Normal => (1.0, 1.0),
            ScenarioKind::Meal => (1.3, 1.0),
            ScenarioKind::Exercise => (0.7, 1.3),
            ScenarioKind::Stress => (1.4, 0.8),
            ScenarioKind::MissedBolus => (1.2, 0.5),
        };
        Multipliers { glucose, insulin }
    }

    /// Returns the tag used in serialized scenarios and log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::Normal => "normal",
            ScenarioKind::Meal => "meal",
            ScenarioKind::Exercise => "exercise",
            ScenarioKind::Stress => "stress",
            ScenarioKind::MissedBolus => "missed_bolus",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKind {
    type Err = ScenarioError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| ScenarioError::UnknownKind(tag.to_owned()))
    }
}

/// Errors describing an unusable scenario.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("unknown scenario type {0:?}")]
    UnknownKind(String),

    #[error("intensity {value} is outside {bounds}")]
    Intensity {
        value: f64,
        bounds: Bounds<f64>,
        #[source]
        reason: ConstraintError,
    },
}

/// A scenario kind plus an intensity in `[0, 1]`.
///
/// The intensity is validated and carried through to results, but does not
/// currently scale the multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(rename = "type")]
    pub kind: ScenarioKind,
    pub intensity: f64,
}

impl Scenario {
    /// Accepted range of [`Scenario::intensity`].
    pub const INTENSITY: Bounds<f64> = Bounds::new(0.0, 1.0);

    /// Creates a scenario without validating it.
    #[must_use]
    pub fn new(kind: ScenarioKind, intensity: f64) -> Self {
        Self { kind, intensity }
    }

    /// Returns the multipliers for this scenario's kind.
    #[must_use]
    pub fn multipliers(&self) -> Multipliers {
        self.kind.multipliers()
    }

    /// Checks that the intensity lies in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::Intensity`] if it does not.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        Self::INTENSITY
            .check(&self.intensity)
            .map_err(|reason| ScenarioError::Intensity {
                value: self.intensity,
                bounds: Self::INTENSITY,
                reason,
            })
    }
}

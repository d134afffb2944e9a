use std::fmt;

use glucoloop_core::{Bounds, ConstraintError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Patient parameters for a single run.
///
/// Every field has an inclusive range (see [`Parameter::bounds`]), checked by
/// [`SimulatorParameters::validate`] before any step runs.
/// Out-of-range values are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorParameters {
    /// Body weight in kg.
    pub weight: f64,
    /// Carbohydrates eaten at the meal, in grams.
    pub carb_intake: f64,
    /// Glucose drop per unit of insulin, in mg/dL per U.
    pub insulin_sensitivity_factor: f64,
    /// Background insulin delivery in U/h.
    pub basal_rate: f64,
    /// Glucose the controller steers toward, in mg/dL.
    pub target_glucose: f64,
    /// Grams of carbohydrate covered by one unit of bolus insulin.
    pub correction_factor: f64,
}

/// Names one field of [`SimulatorParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Weight,
    CarbIntake,
    InsulinSensitivityFactor,
    BasalRate,
    TargetGlucose,
    CorrectionFactor,
}

impl Parameter {
    /// All parameters, in declaration order.
    pub const ALL: [Parameter; 6] = [
        Parameter::Weight,
        Parameter::CarbIntake,
        Parameter::InsulinSensitivityFactor,
        Parameter::BasalRate,
        Parameter::TargetGlucose,
        Parameter::CorrectionFactor,
    ];

    /// Returns the inclusive range of accepted values.
    #[must_use]
    pub const fn bounds(self) -> Bounds<f64> {
        match self {
            Parameter::Weight => Bounds::new(20.0, 300.0),
            Parameter::CarbIntake => Bounds::new(0.0, 500.0),
            Parameter::InsulinSensitivityFactor => Bounds::new(10.0, 200.0),
            Parameter::BasalRate => Bounds::new(0.0, 10.0),
            Parameter::TargetGlucose => Bounds::new(70.0, 180.0),
            Parameter::CorrectionFactor => Bounds::new(10.0, 100.0),
        }
    }

    /// Returns the field name as it appears in serialized parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Parameter::Weight => "weight",
            Parameter::CarbIntake => "carbIntake",
            Parameter::InsulinSensitivityFactor => "insulinSensitivityFactor",
            Parameter::BasalRate => "basalRate",
            Parameter::TargetGlucose => "targetGlucose",
            Parameter::CorrectionFactor => "correctionFactor",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter that falls outside its declared range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{parameter} = {value} is outside {bounds}")]
pub struct ParameterError {
    pub parameter: Parameter,
    pub value: f64,
    pub bounds: Bounds<f64>,
    #[source]
    pub reason: ConstraintError,
}

impl SimulatorParameters {
    /// Returns the value of a single field.
    #[must_use]
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::Weight => self.weight,
            Parameter::CarbIntake => self.carb_intake,
            Parameter::InsulinSensitivityFactor => self.insulin_sensitivity_factor,
            Parameter::BasalRate => self.basal_rate,
            Parameter::TargetGlucose => self.target_glucose,
            Parameter::CorrectionFactor => self.correction_factor,
        }
    }

    /// Checks every field against its bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`ParameterError`] for the first field, in declaration order,
    /// that lies outside its range or is not a number.
    pub fn validate(&self) -> Result<(), ParameterError> {
        Parameter::ALL.into_iter().try_for_each(|parameter| {
            let value = self.get(parameter);
            let bounds = parameter.bounds();
            bounds.check(&value).map_err(|reason| ParameterError {
                parameter,
                value,
                bounds,
                reason,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typical() -> SimulatorParameters {
        SimulatorParameters {
            weight: 70.0,
            carb_intake: 45.0,
            insulin_sensitivity_factor: 50.0,
            basal_rate: 1.0,
            target_glucose: 110.0,
            correction_factor: 50.0,
        }
    }

    fn with(parameter: Parameter, value: f64) -> SimulatorParameters {
        let mut params = typical();
        let field = match parameter {
            Parameter::Weight => &mut params.weight,
            Parameter::CarbIntake => &mut params.carb_intake,
            Parameter::InsulinSensitivityFactor => &mut params.insulin_sensitivity_factor,
            Parameter::BasalRate => &mut params.basal_rate,
            Parameter::TargetGlucose => &mut params.target_glucose,
            Parameter::CorrectionFactor => &mut params.correction_factor,
        };
        *field = value;
        params
    }

    #[test]
    fn typical_parameters_are_valid() {
        assert!(typical().validate().is_ok());
    }

    #[test]
    fn values_at_bounds_are_accepted() {
        for parameter in Parameter::ALL {
            let bounds = parameter.bounds();
            assert!(with(parameter, *bounds.min()).validate().is_ok(), "{parameter} min");
            assert!(with(parameter, *bounds.max()).validate().is_ok(), "{parameter} max");
        }
    }

    #[test]
    fn one_unit_outside_is_rejected() {
        for parameter in Parameter::ALL {
            let bounds = parameter.bounds();

            let err = with(parameter, bounds.min() - 1.0).validate().unwrap_err();
            assert_eq!(err.parameter, parameter);
            assert_eq!(err.reason, ConstraintError::BelowMinimum);

            let err = with(parameter, bounds.max() + 1.0).validate().unwrap_err();
            assert_eq!(err.parameter, parameter);
            assert_eq!(err.reason, ConstraintError::AboveMaximum);
        }
    }

    #[test]
    fn nan_is_rejected() {
        let err = with(Parameter::BasalRate, f64::NAN).validate().unwrap_err();
        assert_eq!(err.reason, ConstraintError::NotANumber);
    }

    #[test]
    fn error_names_the_field() {
        let err = with(Parameter::TargetGlucose, 200.0).validate().unwrap_err();
        assert_eq!(err.to_string(), "targetGlucose = 200 is outside [70, 180]");
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(typical()).unwrap();
        assert_eq!(json["carbIntake"], 45.0);
        assert_eq!(json["insulinSensitivityFactor"], 50.0);

        let back: SimulatorParameters = serde_json::from_value(json).unwrap();
        assert_eq!(back, typical());
    }
}

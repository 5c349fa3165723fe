//! Structured errors for the calculator core
//!
//! Every failure is a typed value. The core never recovers from them:
//! they propagate unchanged up through `solve` to whoever renders them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNIT_PARSE: &str = "UNIT_PARSE";
    pub const DIMENSION_MISMATCH: &str = "DIMENSION_MISMATCH";
    pub const UNIT_CONVERSION: &str = "UNIT_CONVERSION";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const MISSING_INPUT: &str = "MISSING_INPUT";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CONFIGURATION: &str = "CONFIGURATION";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// This calculation failed, the session goes on
    Error,
    /// The catalog itself is broken and cannot be used
    Fatal,
}

/// Errors raised by the unit system, the formulas and the registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A unit expression does not resolve to a known unit.
    #[error("cannot parse unit '{expression}': {reason}")]
    UnitParse { expression: String, reason: String },

    /// Arithmetic or a formula input mixes incompatible physical dimensions.
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: String,
        expected: String,
        found: String,
    },

    /// Conversion to an incompatible unit, or across the absolute/interval
    /// temperature boundary.
    #[error("cannot convert {from} to {to}: {reason}")]
    UnitConversion {
        from: String,
        to: String,
        reason: String,
    },

    /// Mathematically undefined input.
    #[error("domain error: {0}")]
    Domain(String),

    /// A required variable is absent from the inputs.
    #[error("formula '{formula}' is missing required input '{key}'")]
    MissingInput { formula: String, key: String },

    /// Registry lookup by name failed.
    #[error("no formula named '{name}'")]
    NotFound { name: String, similar: Vec<String> },

    /// The formula catalog is defective (load-time only).
    #[error("invalid formula catalog: {}", .0.join("; "))]
    Configuration(Vec<String>),
}

impl CalcError {
    pub fn unit_parse(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::UnitParse {
            expression: expression.into(),
            reason: reason.into(),
        }
    }

    pub fn dimension_mismatch(
        context: impl Into<String>,
        expected: impl ToString,
        found: impl ToString,
    ) -> Self {
        CalcError::DimensionMismatch {
            context: context.into(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn unit_conversion(
        from: impl Into<String>,
        to: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::UnitConversion {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }

    pub fn domain(details: impl Into<String>) -> Self {
        CalcError::Domain(details.into())
    }

    pub fn div_zero(what: &str) -> Self {
        CalcError::Domain(format!("division by zero-valued {}", what))
    }

    pub fn missing_input(formula: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::MissingInput {
            formula: formula.into(),
            key: key.into(),
        }
    }

    pub fn not_found(name: impl Into<String>, similar: Vec<String>) -> Self {
        CalcError::NotFound {
            name: name.into(),
            similar,
        }
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            CalcError::UnitParse { .. } => codes::UNIT_PARSE,
            CalcError::DimensionMismatch { .. } => codes::DIMENSION_MISMATCH,
            CalcError::UnitConversion { .. } => codes::UNIT_CONVERSION,
            CalcError::Domain(_) => codes::DOMAIN_ERROR,
            CalcError::MissingInput { .. } => codes::MISSING_INPUT,
            CalcError::NotFound { .. } => codes::NOT_FOUND,
            CalcError::Configuration(_) => codes::CONFIGURATION,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            CalcError::Configuration(_) => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Hint for fixing the error, when there is an obvious one
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CalcError::UnitParse { .. } => {
                Some("Use unit names like 'joule / (gram * kelvin)' or symbols like 'J/(g*K)'".to_string())
            }
            CalcError::UnitConversion { reason, .. } if reason.contains("offset") => {
                Some("Convert the temperature to kelvin first".to_string())
            }
            CalcError::UnitConversion { .. } => None,
            CalcError::MissingInput { key, .. } => Some(format!("Provide a value for '{}'", key)),
            CalcError::NotFound { similar, .. } if !similar.is_empty() => {
                Some(format!("Similar: {}", similar.join(", ")))
            }
            CalcError::Configuration(_) => Some("This is a bug in the formula catalog".to_string()),
            _ => None,
        }
    }
}

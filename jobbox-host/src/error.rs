//! Error types for the Jobbox host

use jobbox_core::domain::param::ParamKind;
use thiserror::Error;

/// Errors raised while registering jobs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A job with the same class path or display name is already registered
    #[error("Job '{0}' is already registered")]
    Duplicate(String),
}

/// A single parameter validation failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParamError {
    /// Required parameter was not supplied
    #[error("missing required parameter '{name}'")]
    Missing { name: String },

    /// Supplied value does not match the declared kind
    #[error("parameter '{name}' expects a {expected} value, got {found}")]
    TypeMismatch {
        name: String,
        expected: ParamKind,
        found: String,
    },

    /// String value is outside the declared length bounds
    #[error("parameter '{name}' has length {len}, {}", describe_bounds(.min, .max))]
    Length {
        name: String,
        len: usize,
        min: Option<usize>,
        max: Option<usize>,
    },

    /// Parameter is not declared by the job
    #[error("unknown parameter '{name}'")]
    Unknown { name: String },
}

impl ParamError {
    /// Name of the parameter this error refers to
    pub fn name(&self) -> &str {
        match self {
            Self::Missing { name }
            | Self::TypeMismatch { name, .. }
            | Self::Length { name, .. }
            | Self::Unknown { name } => name,
        }
    }
}

fn describe_bounds(min: &Option<usize>, max: &Option<usize>) -> String {
    match (*min, *max) {
        (Some(min), Some(max)) => format!("expected between {} and {}", min, max),
        (Some(min), None) => format!("expected at least {}", min),
        (None, Some(max)) => format!("expected at most {}", max),
        (None, None) => "expected any length".to_string(),
    }
}

/// Errors that prevent a job from being run
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Supplied parameters failed validation; the job was not invoked
    #[error("Invalid parameters for job '{job}': {}", join_errors(.errors))]
    InvalidParameters {
        job: String,
        errors: Vec<ParamError>,
    },
}

fn join_errors(errors: &[ParamError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

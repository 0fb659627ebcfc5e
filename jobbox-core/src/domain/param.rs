//! Parameter declaration types
//!
//! A job declares the inputs it needs; the host checks supplied values
//! against these declarations before the job runs.

use serde::{Deserialize, Serialize};

/// Type of value a parameter accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Boolean,
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamKind::String => write!(f, "string"),
            ParamKind::Integer => write!(f, "integer"),
            ParamKind::Boolean => write!(f, "boolean"),
        }
    }
}

/// Declaration of a single named job input
///
/// Declarations are required by default and have no default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDefinition {
    pub name: String,
    pub kind: ParamKind,
    pub label: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
}

impl ParamDefinition {
    fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
            description: None,
            required: true,
            default: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Declares a required string input
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::String)
    }

    /// Declares a required integer input
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Integer)
    }

    /// Declares a required boolean input
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Boolean)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets a default used when the input is omitted
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Label shown to users, falling back to the parameter name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

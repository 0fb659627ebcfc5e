//! Parameter validation
//!
//! Checks supplied values against a job's declarations before the job runs.
//! Values arriving as strings (e.g. from the command line) are coerced to the
//! declared kind when they parse.

use jobbox_core::domain::param::{ParamDefinition, ParamKind};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::error::ParamError;

/// Validated job parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    values: HashMap<String, JsonValue>,
}

impl Params {
    /// Returns the raw value of a parameter
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.values.get(name)
    }

    /// Returns a string parameter
    pub fn string(&self, name: &str) -> Result<&str, ParamError> {
        match self.values.get(name) {
            Some(JsonValue::String(s)) => Ok(s),
            Some(other) => Err(mismatch(name, ParamKind::String, other)),
            None => Err(ParamError::Missing {
                name: name.to_string(),
            }),
        }
    }

    /// Returns an integer parameter
    pub fn integer(&self, name: &str) -> Result<i64, ParamError> {
        match self.values.get(name) {
            Some(value) => value
                .as_i64()
                .ok_or_else(|| mismatch(name, ParamKind::Integer, value)),
            None => Err(ParamError::Missing {
                name: name.to_string(),
            }),
        }
    }

    /// Returns a boolean parameter
    pub fn boolean(&self, name: &str) -> Result<bool, ParamError> {
        match self.values.get(name) {
            Some(value) => value
                .as_bool()
                .ok_or_else(|| mismatch(name, ParamKind::Boolean, value)),
            None => Err(ParamError::Missing {
                name: name.to_string(),
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Normalized values, after defaults and coercion
    pub fn values(&self) -> &HashMap<String, JsonValue> {
        &self.values
    }
}

/// Validates `raw` against `declarations`
///
/// Every violation is collected; the error list is ordered by declaration,
/// followed by undeclared names in sorted order.
pub fn validate(
    declarations: &[ParamDefinition],
    raw: &HashMap<String, JsonValue>,
) -> Result<Params, Vec<ParamError>> {
    let mut values = HashMap::new();
    let mut errors = Vec::new();

    for decl in declarations {
        let supplied = raw.get(&decl.name).filter(|value| !is_blank(value));

        let Some(value) = supplied.or(decl.default.as_ref()) else {
            if decl.required {
                errors.push(ParamError::Missing {
                    name: decl.name.clone(),
                });
            }
            continue;
        };

        match coerce(decl, value) {
            Ok(value) => {
                values.insert(decl.name.clone(), value);
            }
            Err(e) => errors.push(e),
        }
    }

    let mut unknown: Vec<&String> = raw
        .keys()
        .filter(|name| !declarations.iter().any(|decl| &decl.name == *name))
        .collect();
    unknown.sort();
    errors.extend(unknown.into_iter().map(|name| ParamError::Unknown {
        name: name.clone(),
    }));

    if errors.is_empty() {
        Ok(Params { values })
    } else {
        Err(errors)
    }
}

fn coerce(decl: &ParamDefinition, value: &JsonValue) -> Result<JsonValue, ParamError> {
    match decl.kind {
        ParamKind::String => {
            let s = value
                .as_str()
                .ok_or_else(|| mismatch(&decl.name, decl.kind, value))?
                .trim();
            check_length(decl, s)?;
            Ok(JsonValue::String(s.to_string()))
        }
        ParamKind::Integer => match value {
            JsonValue::Number(n) if n.is_i64() => Ok(value.clone()),
            JsonValue::String(s) => s
                .trim()
                .parse::<i64>()
                .map(JsonValue::from)
                .map_err(|_| mismatch(&decl.name, decl.kind, value)),
            _ => Err(mismatch(&decl.name, decl.kind, value)),
        },
        ParamKind::Boolean => match value {
            JsonValue::Bool(_) => Ok(value.clone()),
            JsonValue::String(s) => parse_bool(s)
                .map(JsonValue::Bool)
                .ok_or_else(|| mismatch(&decl.name, decl.kind, value)),
            _ => Err(mismatch(&decl.name, decl.kind, value)),
        },
    }
}

/// Null and whitespace-only strings count as not supplied
fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn check_length(decl: &ParamDefinition, s: &str) -> Result<(), ParamError> {
    let len = s.chars().count();
    let too_short = decl.min_length.is_some_and(|min| len < min);
    let too_long = decl.max_length.is_some_and(|max| len > max);

    if too_short || too_long {
        return Err(ParamError::Length {
            name: decl.name.clone(),
            len,
            min: decl.min_length,
            max: decl.max_length,
        });
    }
    Ok(())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

fn mismatch(name: &str, expected: ParamKind, found: &JsonValue) -> ParamError {
    let found = match found {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    };
    ParamError::TypeMismatch {
        name: name.to_string(),
        expected,
        found: found.to_string(),
    }
}

//! Event request model
//!
//! Wire format is camelCase JSON; field-level validation runs before any
//! routing work.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::{FieldError, RelayError};

/// A request to possibly deliver the payload to one named destination
///
/// Immutable once constructed; strategies only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoutingIntent {
    /// Candidate destination name
    #[validate(length(min = 1, message = "must not be empty"))]
    pub destination_name: String,

    /// Whether the destination is important (consumed by `IMPORTANT`)
    pub important: bool,

    /// Size estimate in bytes (consumed by `SMALL`, compared only)
    pub bytes: u64,

    /// Strategy-specific extension point
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub additional_params: Map<String, Value>,
}

impl RoutingIntent {
    pub fn new(destination_name: impl Into<String>, important: bool, bytes: u64) -> Self {
        Self {
            destination_name: destination_name.into(),
            important,
            bytes,
            additional_params: Map::new(),
        }
    }
}

/// Inbound event: opaque payload plus ordered routing intents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
    /// Arbitrary structured payload, opaque to the router
    pub payload: Value,

    /// Ordered intents; order is preserved through processing
    #[validate(nested)]
    pub routing_intents: Vec<RoutingIntent>,

    /// Explicit strategy; `None` means use the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl EventRequest {
    /// Validate against the data model, flattening errors to field paths.
    ///
    /// # Errors
    /// `RelayError::Validation` with one entry per offending field.
    pub fn check_valid(&self) -> Result<(), RelayError> {
        self.validate().map_err(|e| RelayError::Validation {
            errors: flatten_errors("", &e),
        })
    }
}

/// Flatten nested `ValidationErrors` into dotted camelCase field paths
fn flatten_errors(prefix: &str, errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    for (field, kind) in errors.errors() {
        let path = join_path(prefix, field.as_ref());
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(FieldError::new(path.clone(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                out.extend(flatten_errors(&path, nested));
            }
            ValidationErrorsKind::List(items) => {
                for (idx, nested) in items {
                    out.extend(flatten_errors(&format!("{path}[{idx}]"), nested));
                }
            }
        }
    }
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn join_path(prefix: &str, field: &str) -> String {
    let field = snake_to_camel(field);
    if prefix.is_empty() {
        field
    } else {
        format!("{prefix}.{field}")
    }
}

/// Wire format is camelCase, so error paths are reported the same way
fn snake_to_camel(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

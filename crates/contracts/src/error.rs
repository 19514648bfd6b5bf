//! Layered error definitions
//!
//! Categorized by source: config / request / routing / collaborator.
//! Only `Validation` aborts a request; every routing condition is contained
//! to its destination.

use serde::Serialize;
use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum RelayError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Request Errors =====
    /// Event request failed validation (fatal to the request)
    #[error("invalid event request: {}", format_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    // ===== Routing Errors =====
    /// Strategy identifier is not known (non-fatal, empty selection)
    #[error("unknown strategy '{strategy}'")]
    UnknownStrategy { strategy: String },

    /// Intent names a destination absent from the registry (non-fatal)
    #[error("unknown destination '{destination}'")]
    UnknownDestination { destination: String },

    /// Transport descriptor names an unsupported scheme or action
    #[error("unsupported transport '{descriptor}': {message}")]
    UnsupportedTransport { descriptor: String, message: String },

    /// Delivery to a destination failed (non-fatal, contained)
    #[error("delivery to '{destination}' failed: {message}")]
    Delivery { destination: String, message: String },

    // ===== Collaborator Errors =====
    /// Destination registry lookup error
    #[error("registry error: {message}")]
    Registry { message: String },

    /// Audit sink write error
    #[error("audit sink error: {message}")]
    Audit { message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl RelayError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create unsupported transport error
    pub fn unsupported_transport(
        descriptor: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnsupportedTransport {
            descriptor: descriptor.into(),
            message: message.into(),
        }
    }

    /// Create delivery error
    pub fn delivery(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            destination: destination.into(),
            message: message.into(),
        }
    }

    /// Create registry error
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    /// Create audit error
    pub fn audit(message: impl Into<String>) -> Self {
        Self::Audit {
            message: message.into(),
        }
    }
}

/// A single field-level validation error, surfaced to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path to the offending field (e.g. `routingIntents[2].destinationName`)
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

//! Destination and transport model
//!
//! Transports are typed variants resolved once when a destination is loaded.
//! The dotted `scheme.action` descriptor form (`http.POST`, `log.warn`) is
//! accepted only at the configuration boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::RelayError;

/// A named delivery target with its resolved transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Unique destination name, matched against intent `destinationName`
    pub name: String,

    /// Delivery mechanism
    pub transport: Transport,
}

impl Destination {
    pub fn new(name: impl Into<String>, transport: Transport) -> Self {
        Self {
            name: name.into(),
            transport,
        }
    }
}

/// Delivery mechanism, one variant per transport scheme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum Transport {
    /// Outbound HTTP call with the payload as JSON body
    Http { method: HttpMethod, url: String },

    /// Structured log emission at a fixed severity
    Log { level: LogLevel },
}

impl Transport {
    /// Resolve a dotted `scheme.action` descriptor into a typed transport.
    ///
    /// `url` is required for the `http` scheme and rejected for `log`.
    ///
    /// # Errors
    /// `RelayError::UnsupportedTransport` for an unknown scheme, an unknown
    /// action segment, or a missing/extraneous url.
    pub fn from_descriptor(descriptor: &str, url: Option<&str>) -> Result<Self, RelayError> {
        let (scheme, action) = descriptor.split_once('.').ok_or_else(|| {
            RelayError::unsupported_transport(descriptor, "expected 'scheme.action' form")
        })?;

        match scheme {
            "http" => {
                let method = HttpMethod::parse(action).ok_or_else(|| {
                    RelayError::unsupported_transport(
                        descriptor,
                        format!("unknown http method '{action}'"),
                    )
                })?;
                let url = url.ok_or_else(|| {
                    RelayError::unsupported_transport(descriptor, "http transport requires a url")
                })?;
                Ok(Self::Http {
                    method,
                    url: url.to_string(),
                })
            }
            "log" => {
                let level = LogLevel::parse(action).ok_or_else(|| {
                    RelayError::unsupported_transport(
                        descriptor,
                        format!("unsupported log level '{action}'"),
                    )
                })?;
                Ok(Self::Log { level })
            }
            other => Err(RelayError::unsupported_transport(
                descriptor,
                format!("unknown scheme '{other}'"),
            )),
        }
    }

    /// Dotted descriptor form, for logging and config round-trips
    pub fn descriptor(&self) -> String {
        match self {
            Self::Http { method, .. } => format!("http.{}", method.as_str()),
            Self::Log { level } => format!("log.{}", level.as_str()),
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor())
    }
}

/// HTTP verb carried in the transport action segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Parse an action segment, case-insensitive
    pub fn parse(action: &str) -> Option<Self> {
        match action.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Log severity carried in the transport action segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse an action segment; only the four supported levels are accepted
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

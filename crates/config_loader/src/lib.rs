//! # Config Loader
//!
//! Configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Resolve transport descriptors into typed transports, once, at load
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let blueprint = ConfigLoader::load_from_path(Path::new("relay.toml")).unwrap();
//! println!("Destinations: {}", blueprint.destinations.len());
//! ```

mod parser;
mod validator;

pub use contracts::RelayBlueprint;
pub use parser::ConfigFormat;

use contracts::RelayError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure (including unsupported transport descriptors)
    pub fn load_from_path(path: &Path) -> Result<RelayBlueprint, RelayError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<RelayBlueprint, RelayError> {
        let raw = parser::parse(content, format)?;
        validator::resolve(raw)
    }

    fn detect_format(path: &Path) -> Result<ConfigFormat, RelayError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| RelayError::config_parse("missing file extension"))?;

        ConfigFormat::from_extension(ext).ok_or_else(|| {
            RelayError::config_parse(format!("unsupported config format '.{ext}'"))
        })
    }

    fn read_file(path: &Path) -> Result<String, RelayError> {
        std::fs::read_to_string(path).map_err(|e| RelayError::ConfigParse {
            message: format!("failed to read '{}': {e}", path.display()),
            source: Some(Box::new(e)),
        })
    }
}

//! Error handling for pacal
//!
//! Provides structured error types for configuration loading and
//! validation and for G-code generation.
//!
//! All error types use `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

/// Errors related to configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    /// The config file contains invalid JSON.
    #[error("Invalid JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The config file contains invalid TOML.
    #[error("Invalid TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("Failed to serialize TOML config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The config file extension is not recognized.
    #[error("Config file must be .json or .toml: {0}")]
    UnknownExtension(String),

    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} ({reason})")]
    OutOfRange {
        /// The parameter name.
        name: &'static str,
        /// The offending value.
        value: f64,
        /// Why the value is rejected.
        reason: &'static str,
    },

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),
}

/// Top-level error type for pacal operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// G-code generation failed.
    #[error("G-code generation failed: {0}")]
    GenerationFailed(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for pacal operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::OutOfRange {
            name: "filament_diameter",
            value: 0.0,
            reason: "must be > 0",
        };
        assert_eq!(
            err.to_string(),
            "Parameter 'filament_diameter' out of range: 0 (must be > 0)"
        );

        let err = ConfigError::UnknownExtension("settings.yaml".to_string());
        assert_eq!(
            err.to_string(),
            "Config file must be .json or .toml: settings.yaml"
        );
    }

    #[test]
    fn test_error_conversion() {
        let cfg_err = ConfigError::Incompatible("min above max".to_string());
        let err: Error = cfg_err.into();
        assert!(matches!(err, Error::Config(_)));

        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}

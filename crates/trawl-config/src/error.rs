//! Error types for configuration operations.

use std::io;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Field that failed validation.
        field: String,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Two client profiles share the same name.
    #[error("duplicate client profile")]
    DuplicateClient {
        /// Name carried by more than one profile.
        name: String,
    },
    /// No client profile exists under the requested name.
    #[error("unknown client profile")]
    UnknownClient {
        /// Name the lookup was performed with.
        name: String,
    },
    /// Configuration file contents could not be parsed.
    #[error("failed to parse configuration file")]
    Parse {
        /// Source TOML error.
        #[source]
        source: Box<toml::de::Error>,
    },
    /// File system operation failed.
    #[error("filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Source IO error.
        #[source]
        source: io::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or writing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read or written
    #[error("Config I/O error at {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the daybook schema
    #[error("Failed to parse config {path}: {message}")]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// A value passed validation at the TOML level but is unusable
    #[error("Invalid config value for {field}: {message}")]
    Invalid {
        /// Dotted field path, e.g. `display.query_limit`
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// No platform directory could be determined for a default path
    #[error("Could not determine {0} directory")]
    NoPlatformDir(&'static str),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

use std::{fmt, sync::Arc};

use crate::ConfigSource;

/// Represents a result type for operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum representing possible errors that can occur while evaluating features.
///
/// Every error is recoverable and reported to the caller before any feature is evaluated.
#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// User context is not an object.
    #[error("User context must be an object")]
    ContextShape,

    /// A required user context field is missing, not a string, or blank.
    #[error("User context must have a non-empty {field} (string)")]
    ContextField {
        /// Name of the offending field (`userId`, `region` or `plan`).
        field: &'static str,
    },

    /// Configuration file path is blank.
    #[error("Configuration file path must be a non-empty string")]
    ConfigurationPath,

    /// No file exists at the configuration file path.
    #[error("Configuration file not found at path: {path}")]
    ConfigurationFileNotFound {
        /// Path as supplied by the caller.
        path: String,
    },

    /// Configuration file content is not valid YAML.
    #[error("Invalid configuration file format: {0}")]
    ConfigurationFormat(String),

    /// Configuration is not an object.
    #[error("Configuration from {config_source} must be an object")]
    ConfigurationShape {
        /// Where the configuration came from.
        config_source: ConfigSource,
    },

    /// A configuration field violates its constraints.
    #[error("Configuration field \"{field}\" from {config_source} {violation}")]
    ConfigurationField {
        /// Name of the offending field (`userids`, `regions` or `plans`).
        field: &'static str,
        /// Where the configuration came from.
        config_source: ConfigSource,
        /// Which constraint was broken.
        violation: FieldViolation,
    },

    /// An I/O error while reading the configuration file.
    #[error(transparent)]
    // std::io::Error is not clonable, so we're wrapping it in an Arc.
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(Arc::new(value))
    }
}

/// Constraint broken by a configuration list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldViolation {
    /// Field is present but is not a sequence.
    NotAnArray,
    /// Sequence contains a non-string element.
    NotAString,
    /// Sequence contains an element that is empty after trimming.
    Blank,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FieldViolation::NotAnArray => "must be an array of strings",
            FieldViolation::NotAString => "must contain only strings",
            FieldViolation::Blank => "must not contain empty strings",
        })
    }
}

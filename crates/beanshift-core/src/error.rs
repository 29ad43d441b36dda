//! Error types for the Beanshift core library
//!
//! This module defines the error handling system for Beanshift, using thiserror
//! for ergonomic error definitions and anyhow for opaque error sources.
//!
//! Every failure in the transformation core is a hard stop: nothing here is
//! retried or recovered locally, and failures raised by recursive transforms
//! are propagated unchanged.

use crate::validation::ConstraintViolation;
use thiserror::Error;

/// Main error type for Beanshift operations
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was absent
    #[error("Invalid argument{}", message_suffix(.message))]
    InvalidArgument { message: Option<String> },

    /// A population strategy was asked to handle a shape it does not support
    #[error("Unsupported population: {message}")]
    UnsupportedPopulation {
        message: String,
        type_name: Option<String>,
    },

    /// One or more constraint violations found on a populated object
    #[error("{message}")]
    InvalidBean {
        message: String,
        violations: Vec<ConstraintViolation>,
    },

    /// A target field has no source counterpart and defaults are disabled
    #[error("Missing field: {type_name}.{field} has no value in the source object")]
    MissingField { type_name: String, field: String },

    /// The element type of a container could not be determined
    #[error("Type resolution failed for {owning_type}.{field}: {message}")]
    TypeResolution {
        owning_type: String,
        field: String,
        message: String,
    },

    /// A primitive value could not be converted to the requested kind
    #[error("Conversion failed: cannot convert {value} from {from} to {to}")]
    Conversion {
        from: String,
        to: String,
        value: String,
    },

    /// A cached value exists but has a different type than requested
    #[error("Cache type mismatch in namespace {namespace} for key '{key}'")]
    CacheTypeMismatch { namespace: u32, key: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_ref().map(|m| format!(": {}", m)).unwrap_or_default()
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for an [`Error::UnsupportedPopulation`] without a type name
    pub fn unsupported(message: impl Into<String>) -> Self {
        Error::UnsupportedPopulation {
            message: message.into(),
            type_name: None,
        }
    }

    /// Violations carried by an [`Error::InvalidBean`], empty for any other variant
    pub fn violations(&self) -> &[ConstraintViolation] {
        match self {
            Error::InvalidBean { violations, .. } => violations,
            _ => &[],
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Configuration {
            message: err.to_string(),
            source: Some(anyhow::Error::new(err)),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

//! Error types for the library layer.

use std::fmt;

use crate::config::ConfigError;
use crate::filter::FormatError;

/// Errors produced by the library layer. Each variant carries the upstream
/// error untouched and exposes it through `source()`.
#[derive(Debug)]
pub enum FccError {
    /// An error from the underlying API client.
    Api(fcc_complaints_api::Error),
    /// Configuration could not be read or lacked a required key.
    Config(ConfigError),
    /// A filter value could not be converted.
    Format(FormatError),
}

impl fmt::Display for FccError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Config(e) => write!(f, "Config error: {}", e),
            Self::Format(e) => write!(f, "Invalid filter: {}", e),
        }
    }
}

impl std::error::Error for FccError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Format(e) => Some(e),
        }
    }
}

impl From<fcc_complaints_api::Error> for FccError {
    fn from(e: fcc_complaints_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<ConfigError> for FccError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<FormatError> for FccError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

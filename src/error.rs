//! Error types for the location weather pipeline

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure raised by one of the pipeline stages.
///
/// The resolver never lets these escape its public entry points; they are
/// folded into a [`crate::ResolutionResult`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// Geocoding provider unreachable, non-success status or zero results
    #[error("Geocoding failed: {message}")]
    Geocode { message: String },

    /// Coordinates resolved but fall outside the supported bounding box
    #[error("Location ({latitude:.4}, {longitude:.4}) is outside the supported region")]
    UnsupportedRegion { latitude: f64, longitude: f64 },

    /// Forecast provider unreachable or non-success status
    #[error("Forecast fetch failed: {message}")]
    ForecastFetch { message: String },

    /// Anything the network layer produced that we did not expect
    #[error("Unexpected error: {message}")]
    Unknown { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Stable machine-readable error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    GeocodeError,
    UnsupportedRegion,
    ForecastFetchError,
    UnknownError,
    ConfigError,
}

impl ResolveError {
    /// Create a new geocoding error
    pub fn geocode<S: Into<String>>(message: S) -> Self {
        Self::Geocode {
            message: message.into(),
        }
    }

    /// Create a new region error for the given coordinates
    #[must_use]
    pub fn unsupported_region(latitude: f64, longitude: f64) -> Self {
        Self::UnsupportedRegion {
            latitude,
            longitude,
        }
    }

    /// Create a new forecast fetch error
    pub fn forecast_fetch<S: Into<String>>(message: S) -> Self {
        Self::ForecastFetch {
            message: message.into(),
        }
    }

    /// Create a new unknown error
    pub fn unknown<S: Into<String>>(message: S) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::Geocode { .. } => ErrorCode::GeocodeError,
            ResolveError::UnsupportedRegion { .. } => ErrorCode::UnsupportedRegion,
            ResolveError::ForecastFetch { .. } => ErrorCode::ForecastFetchError,
            ResolveError::Unknown { .. } => ErrorCode::UnknownError,
            ResolveError::Config { .. } => ErrorCode::ConfigError,
        }
    }
}

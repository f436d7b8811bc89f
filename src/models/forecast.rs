//! Forecast models: provider samples, daily summaries and resolution results

use super::LocationCoordinates;
use crate::error::{ErrorCode, ResolveError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single instantaneous reading from the forecast provider
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    /// Instant this reading is valid for
    pub valid_time: DateTime<Utc>,
    /// Air temperature in Celsius
    pub temperature: f64,
    /// Provider weather symbol code
    pub weather_code: i32,
}

impl ForecastSample {
    #[must_use]
    pub fn new(valid_time: DateTime<Utc>, temperature: f64, weather_code: i32) -> Self {
        Self {
            valid_time,
            temperature,
            weather_code,
        }
    }
}

/// One representative reading per calendar day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DailyForecast {
    /// Calendar date (UTC), serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Temperature in Celsius, rounded to the nearest degree
    pub temperature: i32,
    /// Human-readable weather description
    pub description: String,
    /// Icon token for the weather description
    pub icon: String,
}

/// Terminal output of the location weather pipeline
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    /// The location text exactly as given by the caller
    pub location: String,
    pub coordinates: Option<LocationCoordinates>,
    pub forecast: Option<Vec<DailyForecast>>,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl ResolutionResult {
    #[must_use]
    pub fn success(
        location: &str,
        coordinates: LocationCoordinates,
        forecast: Vec<DailyForecast>,
    ) -> Self {
        Self {
            location: location.to_string(),
            coordinates: Some(coordinates),
            forecast: Some(forecast),
            is_valid: true,
            error: None,
            error_code: None,
        }
    }

    /// Failed resolution; never carries coordinates or forecast data
    #[must_use]
    pub fn failure(location: &str, error: &ResolveError) -> Self {
        Self {
            location: location.to_string(),
            coordinates: None,
            forecast: None,
            is_valid: false,
            error: Some(error.to_string()),
            error_code: Some(error.code()),
        }
    }
}

//! Data models for the location weather pipeline
//!
//! - Location: geocoded coordinates and display addresses
//! - Forecast: raw provider samples, daily summaries and the pipeline result

pub mod forecast;
pub mod location;

// Re-export all public types for convenient access
pub use forecast::{DailyForecast, ForecastSample, ResolutionResult};
pub use location::LocationCoordinates;

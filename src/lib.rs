//! `eventweather` - weather enrichment for event locations
//!
//! This library geocodes free-text event locations, checks them against the
//! supported region and summarises the point forecast into one reading per
//! day.

pub mod api;
pub mod config;
pub mod error;
pub mod geocoding;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod region;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::AppConfig;
pub use error::{ErrorCode, ResolveError};
pub use geocoding::{Geocoder, GoogleGeocoder};
pub use location_resolver::LocationWeatherResolver;
pub use models::{DailyForecast, ForecastSample, LocationCoordinates, ResolutionResult};
pub use region::BoundingBox;
pub use weather::{ForecastProvider, GridPoint, SmhiClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ResolveError>;

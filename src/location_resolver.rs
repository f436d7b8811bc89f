//! Location Weather Resolution
//!
//! Resolves free-text event locations into coordinates and a compact daily
//! forecast. The pipeline is strictly sequential: geocode, region check,
//! forecast fetch on the snapped grid point, daily summary. Failures never
//! escape [`LocationWeatherResolver::resolve`]; they are reported inside the
//! returned [`ResolutionResult`].

use crate::config::AppConfig;
use crate::geocoding::{Geocoder, GoogleGeocoder};
use crate::models::{DailyForecast, LocationCoordinates, ResolutionResult};
use crate::region::BoundingBox;
use crate::weather::{ForecastProvider, GridPoint, SmhiClient, summarize_daily};
use crate::{ResolveError, Result};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Stateless resolver around a geocoder and a forecast provider
#[derive(Clone)]
pub struct LocationWeatherResolver {
    geocoder: Arc<dyn Geocoder>,
    forecast_provider: Arc<dyn ForecastProvider>,
    region: BoundingBox,
}

impl LocationWeatherResolver {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        forecast_provider: Arc<dyn ForecastProvider>,
        region: BoundingBox,
    ) -> Self {
        Self {
            geocoder,
            forecast_provider,
            region,
        }
    }

    /// Build the resolver with the HTTP-backed providers
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let geocoder = GoogleGeocoder::new(&config.geocoding)?;
        let forecast_provider = SmhiClient::new(&config.forecast)?;
        Ok(Self::new(
            Arc::new(geocoder),
            Arc::new(forecast_provider),
            config.region,
        ))
    }

    /// Resolve a location into coordinates and a daily forecast
    #[instrument(skip(self))]
    pub async fn resolve(&self, location_text: &str) -> ResolutionResult {
        match self.try_resolve(location_text).await {
            Ok((coordinates, forecast)) => {
                info!(
                    "Resolved '{}' to {} with {} forecast days",
                    location_text,
                    coordinates.format_coordinates(),
                    forecast.len()
                );
                ResolutionResult::success(location_text, coordinates, forecast)
            }
            Err(e) => {
                warn!("Failed to resolve '{}': {}", location_text, e);
                ResolutionResult::failure(location_text, &e)
            }
        }
    }

    /// Geocode and region-check a location without fetching a forecast
    #[instrument(skip(self))]
    pub async fn resolve_coordinates_only(
        &self,
        location_text: &str,
    ) -> Option<LocationCoordinates> {
        match self.locate(location_text).await {
            Ok(coordinates) => Some(coordinates),
            Err(e) => {
                debug!("No coordinates for '{}': {}", location_text, e);
                None
            }
        }
    }

    /// Resolve several independent locations concurrently, keeping input order
    pub async fn resolve_many(&self, locations: &[String]) -> Vec<ResolutionResult> {
        join_all(locations.iter().map(|location| self.resolve(location))).await
    }

    async fn try_resolve(
        &self,
        location_text: &str,
    ) -> Result<(LocationCoordinates, Vec<DailyForecast>)> {
        let coordinates = self.locate(location_text).await?;

        let point = GridPoint::from_coordinates(coordinates.latitude, coordinates.longitude);
        let samples = self.forecast_provider.fetch(point).await?;
        let forecast = summarize_daily(&samples);

        Ok((coordinates, forecast))
    }

    async fn locate(&self, location_text: &str) -> Result<LocationCoordinates> {
        let address = location_text.trim();
        if address.is_empty() {
            return Err(ResolveError::geocode("Location cannot be empty"));
        }

        let coordinates = self.geocoder.geocode(address).await?;

        if !self
            .region
            .contains(coordinates.latitude, coordinates.longitude)
        {
            return Err(ResolveError::unsupported_region(
                coordinates.latitude,
                coordinates.longitude,
            ));
        }

        Ok(coordinates)
    }
}

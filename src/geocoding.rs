//! Address geocoding
//!
//! Turns free-text addresses into [`LocationCoordinates`] through the Google
//! Geocoding API. The caller's address is qualified with a fixed country name
//! so ambiguous place names resolve inside the served region.

use crate::config::GeocodingConfig;
use crate::models::LocationCoordinates;
use crate::{ResolveError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Capability to turn an address into coordinates
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<LocationCoordinates>;
}

/// Google Geocoding API client
pub struct GoogleGeocoder {
    client: Client,
    base_url: String,
    api_key: String,
    country_qualifier: String,
    timeout: Duration,
}

impl GoogleGeocoder {
    /// Create a new geocoder; fails when no API key is configured
    pub fn new(config: &GeocodingConfig) -> anyhow::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ResolveError::config(
                    "Geocoding API key is required (set EVENTWEATHER__GEOCODING__API_KEY)",
                )
            })?;

        let timeout = Duration::from_secs(config.timeout_seconds.into());
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("eventweather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ResolveError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            country_qualifier: config.country_qualifier.clone(),
            timeout,
        })
    }

    /// Address sent to the provider, with the country qualifier appended
    #[must_use]
    pub fn qualified_address(&self, address: &str) -> String {
        if self.country_qualifier.is_empty() {
            address.to_string()
        } else {
            format!("{address}, {}", self.country_qualifier)
        }
    }

    fn request_url(&self, address: &str) -> String {
        format!(
            "{}/json?address={}&key={}",
            self.base_url,
            urlencoding::encode(&self.qualified_address(address)),
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<LocationCoordinates> {
        info!("Geocoding location: '{}'", address);
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.request_url(address))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResolveError::geocode(format!(
                        "request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    ResolveError::geocode(format!("provider unreachable: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Geocoding provider returned HTTP {}", status);
            return Err(ResolveError::geocode(format!(
                "provider returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: google::GeocodeResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ResolveError::geocode(format!(
                    "request timed out after {}s",
                    self.timeout.as_secs()
                ))
            } else {
                ResolveError::unknown(format!("Invalid geocoding data received: {e}"))
            }
        })?;

        let location = body.into_location(address)?;

        debug!(
            "Geocoded '{}' to {} ({}) in {:.3}s",
            address,
            location.format_coordinates(),
            location.display_address(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(location)
    }
}

/// Google Geocoding API response structures
mod google {
    use super::{LocationCoordinates, ResolveError};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResponse {
        pub status: String,
        #[serde(default)]
        pub results: Vec<GeocodeResult>,
        pub error_message: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    pub struct GeocodeResult {
        pub formatted_address: String,
        pub geometry: Geometry,
        #[serde(default)]
        pub address_components: Vec<AddressComponent>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        pub location: LatLng,
    }

    #[derive(Debug, Deserialize)]
    pub struct LatLng {
        pub lat: f64,
        pub lng: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct AddressComponent {
        pub long_name: String,
        #[serde(default)]
        pub types: Vec<String>,
    }

    impl GeocodeResponse {
        /// First result as coordinates, or the provider's failure as an error
        pub fn into_location(self, address: &str) -> Result<LocationCoordinates, ResolveError> {
            if self.status == "ZERO_RESULTS" {
                return Err(ResolveError::geocode(format!(
                    "ZERO_RESULTS: no results found for '{address}'"
                )));
            }

            if self.status != "OK" {
                let message = match self.error_message {
                    Some(detail) => format!("{}: {detail}", self.status),
                    None => self.status,
                };
                return Err(ResolveError::geocode(message));
            }

            let result = self.results.into_iter().next().ok_or_else(|| {
                ResolveError::geocode(format!("No results found for '{address}'"))
            })?;

            let clean_address = result.clean_address();
            Ok(LocationCoordinates::new(
                result.geometry.location.lat,
                result.geometry.location.lng,
                result.formatted_address,
            )
            .with_clean_address(clean_address))
        }
    }

    impl GeocodeResult {
        fn component(&self, kind: &str) -> Option<&str> {
            self.address_components
                .iter()
                .find(|component| component.types.iter().any(|t| t == kind))
                .map(|component| component.long_name.as_str())
        }

        /// Join the present address parts with ", ", falling back to the
        /// formatted address when none are present
        pub fn clean_address(&self) -> String {
            let street = match (self.component("route"), self.component("street_number")) {
                (Some(route), Some(number)) => Some(format!("{route} {number}")),
                (Some(route), None) => Some(route.to_string()),
                (None, Some(number)) => Some(number.to_string()),
                (None, None) => None,
            };

            let parts: Vec<String> = [
                street,
                self.component("postal_code").map(str::to_string),
                self.component("locality").map(str::to_string),
                self.component("administrative_area_level_1")
                    .map(str::to_string),
            ]
            .into_iter()
            .flatten()
            .collect();

            if parts.is_empty() {
                self.formatted_address.clone()
            } else {
                parts.join(", ")
            }
        }
    }
}

#[cfg(test)]
fn parse_response(json: &str, address: &str) -> Result<LocationCoordinates> {
    let response: google::GeocodeResponse =
        serde_json::from_str(json).map_err(|e| ResolveError::unknown(e.to_string()))?;
    response.into_location(address)
}

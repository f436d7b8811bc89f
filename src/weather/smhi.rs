//! SMHI point forecast client
//!
//! The `pmp3g` point forecast only answers on a 0.1 degree grid, so every
//! request is keyed by a [`GridPoint`].

use super::{ForecastProvider, GridPoint};
use crate::config::ForecastConfig;
use crate::models::ForecastSample;
use crate::{ResolveError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};

/// Parameter name of the air temperature series
pub const TEMPERATURE_PARAMETER: &str = "t";
/// Parameter name of the weather symbol series
pub const SYMBOL_PARAMETER: &str = "Wsymb2";

/// HTTP client for the SMHI open data forecast API
pub struct SmhiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl SmhiClient {
    /// Create a new forecast client
    pub fn new(config: &ForecastConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("eventweather/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ResolveError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Point forecast URL for a grid point
    #[must_use]
    pub fn forecast_url(&self, point: GridPoint) -> String {
        format!(
            "{}/api/category/pmp3g/version/2/geotype/point/lon/{:.1}/lat/{:.1}/data.json",
            self.base_url, point.longitude, point.latitude
        )
    }
}

#[async_trait]
impl ForecastProvider for SmhiClient {
    #[instrument(skip(self), fields(lat = point.latitude, lon = point.longitude))]
    async fn fetch(&self, point: GridPoint) -> Result<Vec<ForecastSample>> {
        info!("Getting point forecast for grid point: {}", point);
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.forecast_url(point))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResolveError::forecast_fetch(format!(
                        "request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    ResolveError::forecast_fetch(format!("provider unreachable: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Forecast provider returned HTTP {}", status);
            return Err(ResolveError::forecast_fetch(format!(
                "provider returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: response::PointForecast = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ResolveError::forecast_fetch(format!(
                    "request timed out after {}s",
                    self.timeout.as_secs()
                ))
            } else {
                ResolveError::unknown(format!("Invalid forecast data received: {e}"))
            }
        })?;

        let samples = body.into_samples();

        info!(
            "Retrieved forecast with {} data points in {:.3}s",
            samples.len(),
            start_time.elapsed().as_secs_f64()
        );

        Ok(samples)
    }
}

/// SMHI API response structures
mod response {
    use super::{ForecastSample, SYMBOL_PARAMETER, TEMPERATURE_PARAMETER};
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use tracing::debug;

    #[derive(Debug, Deserialize)]
    pub struct PointForecast {
        #[serde(rename = "timeSeries", default)]
        pub time_series: Vec<TimeSeriesEntry>,
    }

    #[derive(Debug, Deserialize)]
    pub struct TimeSeriesEntry {
        #[serde(rename = "validTime")]
        pub valid_time: DateTime<Utc>,
        #[serde(default)]
        pub parameters: Vec<Parameter>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Parameter {
        pub name: String,
        #[serde(default)]
        pub values: Vec<f64>,
    }

    impl TimeSeriesEntry {
        fn value(&self, name: &str) -> Option<f64> {
            self.parameters
                .iter()
                .find(|parameter| parameter.name == name)
                .and_then(|parameter| parameter.values.first().copied())
        }

        fn to_sample(&self) -> Option<ForecastSample> {
            let temperature = self.value(TEMPERATURE_PARAMETER)?;
            let code = self.value(SYMBOL_PARAMETER)?;
            Some(ForecastSample::new(
                self.valid_time,
                temperature,
                code.round() as i32,
            ))
        }
    }

    impl PointForecast {
        /// Samples carrying both temperature and weather symbol
        pub fn into_samples(self) -> Vec<ForecastSample> {
            self.time_series
                .iter()
                .filter_map(|entry| {
                    let sample = entry.to_sample();
                    if sample.is_none() {
                        debug!("Skipping incomplete sample at {}", entry.valid_time);
                    }
                    sample
                })
                .collect()
        }
    }
}

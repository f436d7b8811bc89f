use async_trait::async_trait;
use std::fmt::Display;

use crate::Result;
use crate::models::ForecastSample;
use crate::models::location::round_coordinates;

pub mod daily;
pub mod smhi;
pub mod symbols;

pub use daily::{MAX_FORECAST_DAYS, summarize_daily};
pub use smhi::SmhiClient;
pub use symbols::{WeatherSymbol, weather_symbol};

/// Decimal places of the provider's coordinate grid (0.1 degree)
pub const GRID_PRECISION: u32 = 1;

/// A coordinate snapped to the forecast provider's grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GridPoint {
    /// Snap coordinates to the nearest 0.1 degree, half away from zero
    #[must_use]
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        let (latitude, longitude) = round_coordinates(latitude, longitude, GRID_PRECISION);
        Self {
            latitude,
            longitude,
        }
    }
}

impl Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}, {:.1}", self.latitude, self.longitude)
    }
}

/// Source of point forecasts on a fixed grid
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Fetch the raw time series for a grid point
    async fn fetch(&self, point: GridPoint) -> Result<Vec<ForecastSample>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearby_coordinates_share_a_grid_cell() {
        let a = GridPoint::from_coordinates(59.33, 18.06);
        let b = GridPoint::from_coordinates(59.34, 18.09);
        assert_eq!(a, b);
        assert_eq!(a.latitude, 59.3);
        assert_eq!(a.longitude, 18.1);
    }

    #[test]
    fn test_grid_point_display() {
        let point = GridPoint::from_coordinates(67.8558, 20.2253);
        assert_eq!(point.to_string(), "67.9, 20.2");
    }
}

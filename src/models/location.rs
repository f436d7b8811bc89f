//! Location model for geocoded coordinates and display addresses

use serde::{Deserialize, Serialize};

/// Coordinates produced by geocoding a free-text address
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationCoordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Address exactly as returned by the geocoding provider
    pub formatted_address: String,
    /// Address rebuilt from structured components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_address: Option<String>,
}

impl LocationCoordinates {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, formatted_address: String) -> Self {
        Self {
            latitude,
            longitude,
            formatted_address,
            clean_address: None,
        }
    }

    /// Attach a cleaned display address
    #[must_use]
    pub fn with_clean_address(mut self, clean_address: String) -> Self {
        self.clean_address = Some(clean_address);
        self
    }

    /// Best address for display: the clean one when present
    #[must_use]
    pub fn display_address(&self) -> &str {
        self.clean_address
            .as_deref()
            .unwrap_or(&self.formatted_address)
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Round coordinates to `precision` decimals, half away from zero
pub(crate) fn round_coordinates(latitude: f64, longitude: f64, precision: u32) -> (f64, f64) {
    let multiplier = 10_f64.powi(i32::try_from(precision).unwrap_or(4));
    let lat = (latitude * multiplier).round() / multiplier;
    let lon = (longitude * multiplier).round() / multiplier;
    (lat, lon)
}

//! Supported region check
//!
//! A fixed latitude/longitude rectangle used as a cheap pre-filter before
//! asking the forecast provider for data it cannot serve.

use serde::{Deserialize, Serialize};

/// Inclusive latitude/longitude rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(default = "default_min_latitude")]
    pub min_latitude: f64,
    #[serde(default = "default_max_latitude")]
    pub max_latitude: f64,
    #[serde(default = "default_min_longitude")]
    pub min_longitude: f64,
    #[serde(default = "default_max_longitude")]
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Rectangle covering Sweden
    pub const SWEDEN: BoundingBox = BoundingBox {
        min_latitude: 55.0,
        max_latitude: 69.0,
        min_longitude: 11.0,
        max_longitude: 24.0,
    };

    #[must_use]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&latitude)
            && (self.min_longitude..=self.max_longitude).contains(&longitude)
    }

    /// Bounds are ordered and within valid geographic ranges
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.min_latitude < self.max_latitude
            && self.min_longitude < self.max_longitude
            && (-90.0..=90.0).contains(&self.min_latitude)
            && (-90.0..=90.0).contains(&self.max_latitude)
            && (-180.0..=180.0).contains(&self.min_longitude)
            && (-180.0..=180.0).contains(&self.max_longitude)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::SWEDEN
    }
}

fn default_min_latitude() -> f64 {
    BoundingBox::SWEDEN.min_latitude
}

fn default_max_latitude() -> f64 {
    BoundingBox::SWEDEN.max_latitude
}

fn default_min_longitude() -> f64 {
    BoundingBox::SWEDEN.min_longitude
}

fn default_max_longitude() -> f64 {
    BoundingBox::SWEDEN.max_longitude
}

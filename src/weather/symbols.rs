//! `Wsymb2` weather symbol lookup

use std::collections::HashMap;
use std::sync::LazyLock;

/// Description and icon for a provider weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherSymbol {
    pub description: &'static str,
    pub icon: &'static str,
}

/// Fallback for codes outside the published code space
pub const UNKNOWN_SYMBOL: WeatherSymbol = WeatherSymbol {
    description: "Unknown",
    icon: "❓",
};

static SYMBOLS: LazyLock<HashMap<i32, WeatherSymbol>> = LazyLock::new(|| {
    [
        (1, "Clear sky", "☀️"),
        (2, "Nearly clear sky", "🌤️"),
        (3, "Variable cloudiness", "⛅"),
        (4, "Halfclear sky", "⛅"),
        (5, "Cloudy sky", "🌥️"),
        (6, "Overcast", "☁️"),
        (7, "Fog", "🌫️"),
        (8, "Light rain showers", "🌦️"),
        (9, "Moderate rain showers", "🌦️"),
        (10, "Heavy rain showers", "🌧️"),
        (11, "Thunderstorm", "⛈️"),
        (12, "Light sleet showers", "🌨️"),
        (13, "Moderate sleet showers", "🌨️"),
        (14, "Heavy sleet showers", "🌨️"),
        (15, "Light snow showers", "🌨️"),
        (16, "Moderate snow showers", "🌨️"),
        (17, "Heavy snow showers", "❄️"),
        (18, "Light rain", "🌧️"),
        (19, "Moderate rain", "🌧️"),
        (20, "Heavy rain", "🌧️"),
        (21, "Thunder", "🌩️"),
        (22, "Light sleet", "🌨️"),
        (23, "Moderate sleet", "🌨️"),
        (24, "Heavy sleet", "🌨️"),
        (25, "Light snowfall", "🌨️"),
        (26, "Moderate snowfall", "❄️"),
        (27, "Heavy snowfall", "❄️"),
    ]
    .into_iter()
    .map(|(code, description, icon)| (code, WeatherSymbol { description, icon }))
    .collect()
});

/// Look up a weather code; unmapped codes yield [`UNKNOWN_SYMBOL`]
#[must_use]
pub fn weather_symbol(code: i32) -> WeatherSymbol {
    SYMBOLS.get(&code).copied().unwrap_or(UNKNOWN_SYMBOL)
}

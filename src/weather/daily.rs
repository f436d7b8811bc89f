//! Daily forecast summary
//!
//! Collapses the provider's irregular time series into one reading per
//! calendar day. Dates and hours are taken in UTC. A sample shortly after
//! local midnight can therefore land on the previous local day; this is not
//! corrected.

use crate::models::{DailyForecast, ForecastSample};
use crate::weather::symbols::weather_symbol;
use chrono::{NaiveDate, Timelike};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Maximum number of days in a summary
pub const MAX_FORECAST_DAYS: usize = 10;

/// Hours (UTC) whose readings represent the day
const NOON_WINDOW: RangeInclusive<u32> = 11..=13;

const NOON_SECONDS: i64 = 12 * 60 * 60;

/// Reduce samples to one [`DailyForecast`] per UTC date, ascending, at most
/// [`MAX_FORECAST_DAYS`] entries.
#[must_use]
pub fn summarize_daily(samples: &[ForecastSample]) -> Vec<DailyForecast> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&ForecastSample>> = BTreeMap::new();
    for sample in samples {
        by_date
            .entry(sample.valid_time.date_naive())
            .or_default()
            .push(sample);
    }

    by_date
        .into_iter()
        .take(MAX_FORECAST_DAYS)
        .filter_map(|(date, mut day)| {
            day.sort_by_key(|sample| sample.valid_time);
            representative(&day).map(|sample| to_daily(date, sample))
        })
        .collect()
}

/// Reading closest to noon inside the noon window, else the day's first
fn representative<'a>(day: &[&'a ForecastSample]) -> Option<&'a ForecastSample> {
    day.iter()
        .copied()
        .filter(|sample| NOON_WINDOW.contains(&sample.valid_time.hour()))
        .min_by_key(|sample| {
            (i64::from(sample.valid_time.num_seconds_from_midnight()) - NOON_SECONDS).abs()
        })
        .or_else(|| day.first().copied())
}

fn to_daily(date: NaiveDate, sample: &ForecastSample) -> DailyForecast {
    let symbol = weather_symbol(sample.weather_code);
    DailyForecast {
        date,
        temperature: sample.temperature.round() as i32,
        description: symbol.description.to_string(),
        icon: symbol.icon.to_string(),
    }
}

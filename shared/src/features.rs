//! Feature extraction: reduces a raw weather forecast to the small set of
//! derived signals the risk engine scores on.
//!
//! Extraction never fails. Missing optional readings default to "no
//! signal": a missing rain reading counts as 0.0 mm, a missing humidity
//! reading as not wet. An empty hourly sequence yields an unfavorable
//! temperature window and zeroed count signals.

use serde::{Deserialize, Serialize};

use crate::models::{DailyForecast, HourlyForecast, WeatherSnapshot};

/// Relative humidity at or above this marks a wet hour
const WET_HOUR_HUMIDITY_PERCENT: i32 = 85;

/// Wind at or above this (m/s) is relevant for pest dispersal and spraying
const WIND_THRESHOLD_MPS: f64 = 5.0;

/// Signals derived from one forecast, computed fresh each run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DerivedSignals {
    /// Hours among the next 24 with humidity >= 85% or measurable rain
    pub wet_hours_24: u32,
    /// Total rain over the next 24 hours, mm, rounded to 1 decimal
    pub rain_last24_mm: f64,
    /// Median temperature of the next 24 hours falls inside the
    /// crop-specific band
    pub temp_window_ok: bool,
    /// Any rain within the next 24 hours
    pub rain_recent: bool,
    /// No rain at all in hours 24..48 (no relief coming)
    pub dry_spell_forecast: bool,
    /// Any hour in the next 48 at or above the wind threshold
    pub wind_ok: bool,
    /// Fraction of the next 48 hours with rain
    pub rain_next48_prob: f64,
    /// Heuristic irrigation-need estimate, clamped to 0.0..=1.0
    pub water_need_proxy: f64,
}

/// Inclusive temperature band (°C) in which a crop's canopy microclimate
/// favors fungal and insect development.
///
/// Canonical table; unknown crops fall back to the default band.
const CROP_TEMP_BANDS: &[(&str, f64, f64)] = &[
    ("tomato", 10.0, 25.0),
    ("potato", 10.0, 25.0),
    ("rice", 20.0, 32.0),
    ("maize", 20.0, 34.0),
];

const DEFAULT_TEMP_BAND: (f64, f64) = (18.0, 32.0);

/// Look up the temperature band for a crop, case-insensitive.
pub fn crop_temp_band(crop: &str) -> (f64, f64) {
    let crop = crop.trim().to_ascii_lowercase();
    CROP_TEMP_BANDS
        .iter()
        .find(|(name, _, _)| *name == crop)
        .map(|(_, lo, hi)| (*lo, *hi))
        .unwrap_or(DEFAULT_TEMP_BAND)
}

/// Derive all signals from a forecast for the given crop.
pub fn derive_signals(snapshot: &WeatherSnapshot, crop: &str) -> DerivedSignals {
    let hourly = &snapshot.hourly;
    let first24 = &hourly[..hourly.len().min(24)];
    let first48 = &hourly[..hourly.len().min(48)];

    let wet_hours_24 = first24.iter().filter(|h| is_wet_hour(h)).count() as u32;

    let rain_last24_mm = round1(first24.iter().map(rain_mm).sum());

    let temp_window_ok = median_temp(first24)
        .map(|t| {
            let (lo, hi) = crop_temp_band(crop);
            (lo..=hi).contains(&t)
        })
        .unwrap_or(false);

    let rain_recent = first24.iter().any(|h| rain_mm(h) > 0.0);

    // Conservative: only an entirely dry 24..48h window counts as a dry spell
    let relief_window = if hourly.len() > 24 {
        &hourly[24..hourly.len().min(48)]
    } else {
        &[]
    };
    let dry_spell_forecast = relief_window.iter().all(|h| rain_mm(h) == 0.0);

    let wind_ok = first48
        .iter()
        .any(|h| h.wind_speed_mps.unwrap_or(0.0) >= WIND_THRESHOLD_MPS);

    let rainy_hours = first48.iter().filter(|h| rain_mm(h) > 0.0).count();
    let rain_next48_prob = rainy_hours as f64 / 48.0;

    let water_need_proxy = snapshot
        .daily
        .first()
        .map(water_need)
        .unwrap_or(0.3);

    DerivedSignals {
        wet_hours_24,
        rain_last24_mm,
        temp_window_ok,
        rain_recent,
        dry_spell_forecast,
        wind_ok,
        rain_next48_prob,
        water_need_proxy,
    }
}

fn is_wet_hour(hour: &HourlyForecast) -> bool {
    hour.humidity_percent.unwrap_or(0) >= WET_HOUR_HUMIDITY_PERCENT || rain_mm(hour) > 0.0
}

fn rain_mm(hour: &HourlyForecast) -> f64 {
    hour.rain_1h_mm.unwrap_or(0.0)
}

/// Median hourly temperature. Even-length windows (the usual 24-entry
/// case) take the upper middle element rather than averaging the pair.
fn median_temp(hours: &[HourlyForecast]) -> Option<f64> {
    if hours.is_empty() {
        return None;
    }
    let mut temps: Vec<f64> = hours.iter().map(|h| h.temperature_celsius).collect();
    temps.sort_by(|a, b| a.total_cmp(b));
    Some(temps[temps.len() / 2])
}

fn water_need(day: &DailyForecast) -> f64 {
    let heat = (day.temp_max_celsius - 30.0).max(0.0) / 20.0;
    (0.2 + heat - day.precipitation_probability * 0.3).clamp(0.0, 1.0)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

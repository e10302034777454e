//! Weather forecast models
//!
//! A snapshot is supplied fresh per pipeline run and treated as immutable
//! input; the pipeline never persists it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GpsCoordinates;

/// Multi-day forecast for one location: an hourly sequence covering at
/// least the next 48 hours and a daily sequence covering at least the
/// next 4 days.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Option<GpsCoordinates>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub hourly: Vec<HourlyForecast>,
    pub daily: Vec<DailyForecast>,
}

/// One forecast hour. Optional readings default to "no signal" during
/// feature extraction (missing rain reads as 0.0, missing humidity as
/// not wet).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub temperature_celsius: f64,
    pub humidity_percent: Option<i32>,
    pub rain_1h_mm: Option<f64>,
    pub wind_speed_mps: Option<f64>,
}

/// One forecast day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyForecast {
    pub temp_max_celsius: f64,
    /// Probability of precipitation, 0.0..=1.0
    pub precipitation_probability: f64,
}

impl WeatherSnapshot {
    pub fn new(hourly: Vec<HourlyForecast>, daily: Vec<DailyForecast>) -> Self {
        Self {
            location: None,
            fetched_at: None,
            hourly,
            daily,
        }
    }
}

//! Weather API client for fetching forecast data
//!
//! Integrates with a One Call-style OpenWeatherMap endpoint: 48 hourly
//! entries plus daily summaries, which is exactly what the feature
//! extractor consumes.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use shared::{DailyForecast, GpsCoordinates, HourlyForecast, WeatherSnapshot};

use crate::error::{AppError, AppResult};
use crate::services::pipeline::WeatherProvider;

/// Weather API client
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// One Call API response, reduced to the fields the pipeline needs
#[derive(Debug, Deserialize)]
struct OneCallResponse {
    #[serde(default)]
    hourly: Vec<OneCallHourly>,
    #[serde(default)]
    daily: Vec<OneCallDaily>,
}

#[derive(Debug, Deserialize)]
struct OneCallHourly {
    temp: f64,
    humidity: Option<i32>,
    wind_speed: Option<f64>,
    rain: Option<OneCallRain>,
}

#[derive(Debug, Deserialize)]
struct OneCallRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OneCallDaily {
    temp: OneCallDailyTemp,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct OneCallDailyTemp {
    max: f64,
}

impl OpenWeatherClient {
    /// Create a new client. The request timeout bounds the weather
    /// suspension point of every farmer pipeline.
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> AppResult<Self> {
        if api_key.is_empty() {
            return Err(AppError::Configuration(
                "weather API key is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    async fn get_onecall(&self, location: &GpsCoordinates) -> AppResult<OneCallResponse> {
        let url = format!(
            "{}/onecall?lat={}&lon={}&appid={}&units=metric&exclude=minutely",
            self.base_url, location.latitude, location.longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::WeatherUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherUnavailable(format!(
                "{} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::WeatherUnavailable(format!("invalid response: {}", e)))
    }

    fn convert(&self, location: &GpsCoordinates, data: OneCallResponse) -> WeatherSnapshot {
        let hourly = data
            .hourly
            .into_iter()
            .take(48)
            .map(|h| HourlyForecast {
                temperature_celsius: h.temp,
                humidity_percent: h.humidity,
                rain_1h_mm: h.rain.and_then(|r| r.one_hour),
                wind_speed_mps: h.wind_speed,
            })
            .collect();

        let daily = data
            .daily
            .into_iter()
            .take(4)
            .map(|d| DailyForecast {
                temp_max_celsius: d.temp.max,
                precipitation_probability: d.pop,
            })
            .collect();

        WeatherSnapshot {
            location: Some(location.clone()),
            fetched_at: Some(Utc::now()),
            hourly,
            daily,
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn fetch(&self, location: &GpsCoordinates) -> AppResult<WeatherSnapshot> {
        let data = self.get_onecall(location).await?;
        Ok(self.convert(location, data))
    }
}

//! Configuration management for the Agri Advisory Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with AGRI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// WhatsApp messaging gateway configuration
    pub whatsapp: WhatsAppConfig,

    /// Advisory language generator configuration
    pub generator: GeneratorConfig,

    /// Batch pipeline configuration
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WhatsAppConfig {
    /// Messaging gateway endpoint
    pub api_endpoint: String,

    /// Gateway API key
    pub api_key: String,

    /// Sender phone identity registered with the gateway
    pub phone_id: String,

    /// Per-send timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    /// Text generation API endpoint
    pub api_endpoint: String,

    /// Text generation API key
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// Maximum farmers processed concurrently
    pub max_concurrency: usize,

    /// Hour of day (UTC) for the scheduled daily run
    pub run_hour_utc: u32,

    /// Run-level timeout in seconds; 0 disables it
    pub run_timeout_secs: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("AGRI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/3.0")?
            .set_default("weather.timeout_secs", 20)?
            .set_default("whatsapp.timeout_secs", 30)?
            .set_default("pipeline.max_concurrency", 8)?
            .set_default("pipeline.run_hour_utc", 6)?
            .set_default("pipeline.run_timeout_secs", 0)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (AGRI_ prefix)
            .add_source(
                Environment::with_prefix("AGRI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

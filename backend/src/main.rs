//! Agri Advisory Platform - Backend Server
//!
//! Daily weather-driven risk advisories for smallholder farmers, with
//! WhatsApp delivery, an alert audit trail, and an on-demand chat
//! endpoint backed by the same risk pipeline.

use axum::{routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod routes;
mod services;

pub use config::Config;

use external::{AdviceGenerator, OpenWeatherClient, WhatsAppClient};
use services::pipeline::{DeliveryChannel, WeatherProvider};
use services::{AlertService, ChatService, FarmerService, PipelineService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub config: Arc<Config>,
    pub pipeline: Arc<PipelineService>,
    pub chat: ChatService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_server=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Agri Advisory Server");
    tracing::info!("Environment: {}", config.environment);

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    // Wire up external clients
    let weather: Arc<dyn WeatherProvider> = Arc::new(OpenWeatherClient::new(
        config.weather.api_key.clone(),
        config.weather.api_endpoint.clone(),
        Duration::from_secs(config.weather.timeout_secs),
    )?);
    let delivery: Arc<dyn DeliveryChannel> = Arc::new(WhatsAppClient::new(
        config.whatsapp.api_endpoint.clone(),
        config.whatsapp.api_key.clone(),
        config.whatsapp.phone_id.clone(),
        Duration::from_secs(config.whatsapp.timeout_secs),
    )?);
    let generator = AdviceGenerator::new(
        config.generator.api_endpoint.clone(),
        config.generator.api_key.clone(),
    )?;

    // Wire up services
    let farmers = FarmerService::new(db_pool.clone());
    let alerts = AlertService::new(db_pool.clone());
    let run_timeout = match config.pipeline.run_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    let pipeline = Arc::new(PipelineService::new(
        Arc::new(farmers.clone()),
        Arc::clone(&weather),
        delivery,
        Arc::new(alerts),
        config.pipeline.max_concurrency,
        run_timeout,
    ));
    let chat = ChatService::new(db_pool.clone(), farmers, Arc::clone(&weather), generator);

    // Schedule the daily run
    services::scheduler::spawn_daily(Arc::clone(&pipeline), config.pipeline.run_hour_utc);

    // Create application state
    let state = AppState {
        db: db_pool,
        config: Arc::new(config.clone()),
        pipeline,
        chat,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Agri Advisory Platform API v1.0"
}

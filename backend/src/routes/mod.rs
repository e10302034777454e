//! Route definitions for the agri advisory platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/farmers", farmer_routes())
        .nest("/alerts", alert_routes())
        .route("/pipeline/run", post(handlers::run_pipeline))
        .nest("/chat", chat_routes())
}

/// Farmer roster routes
fn farmer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_farmers).post(handlers::register_farmer),
        )
        .route("/:farmer_id", get(handlers::get_farmer))
}

/// Alert history routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_alerts))
        .route("/farmer/:farmer_id", get(handlers::list_alerts_for_farmer))
}

/// Conversational advisory routes
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::ask))
        .route("/:farmer_id/history", get(handlers::history))
}

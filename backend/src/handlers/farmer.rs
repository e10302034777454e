//! HTTP handlers for farmer roster endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::farmer::{FarmerService, RegisterFarmerInput};
use crate::AppState;
use shared::Farmer;

/// Register a new farmer
pub async fn register_farmer(
    State(state): State<AppState>,
    Json(input): Json<RegisterFarmerInput>,
) -> AppResult<(StatusCode, Json<Farmer>)> {
    let service = FarmerService::new(state.db);
    let farmer = service.register(input).await?;
    Ok((StatusCode::CREATED, Json(farmer)))
}

/// Get a farmer by ID
pub async fn get_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<Uuid>,
) -> AppResult<Json<Farmer>> {
    let service = FarmerService::new(state.db);
    let farmer = service.get_farmer(farmer_id).await?;
    Ok(Json(farmer))
}

/// List all registered farmers
pub async fn list_farmers(State(state): State<AppState>) -> AppResult<Json<Vec<Farmer>>> {
    let service = FarmerService::new(state.db);
    let farmers = service.list().await?;
    Ok(Json(farmers))
}

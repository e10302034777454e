//! HTTP handlers for alert history endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::alert::AlertService;
use crate::AppState;
use shared::AlertRecord;

#[derive(Debug, Deserialize)]
pub struct ListAlertsQuery {
    pub limit: Option<i64>,
}

/// List recent alert records
pub async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<ListAlertsQuery>,
) -> AppResult<Json<Vec<AlertRecord>>> {
    let limit = query.limit.unwrap_or(100).clamp(1, 1000);
    let service = AlertService::new(state.db);
    let alerts = service.list(limit).await?;
    Ok(Json(alerts))
}

/// List alert records for one farmer
pub async fn list_alerts_for_farmer(
    State(state): State<AppState>,
    Path(farmer_id): Path<Uuid>,
) -> AppResult<Json<Vec<AlertRecord>>> {
    let service = AlertService::new(state.db);
    let alerts = service.list_for_farmer(farmer_id).await?;
    Ok(Json(alerts))
}

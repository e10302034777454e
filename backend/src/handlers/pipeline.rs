//! HTTP handler for triggering a pipeline run

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppResult;
use crate::AppState;

#[derive(Serialize)]
pub struct PipelineRunResponse {
    pub processed: usize,
}

/// Run the advisory pipeline for the full roster and report how many
/// farmers were processed successfully
pub async fn run_pipeline(State(state): State<AppState>) -> AppResult<Json<PipelineRunResponse>> {
    let processed = state.pipeline.run_pipeline().await?;
    Ok(Json(PipelineRunResponse { processed }))
}

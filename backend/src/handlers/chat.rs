//! HTTP handlers for the conversational advisory endpoint

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::chat::ChatMessage;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub farmer_id: Uuid,
    pub question: String,
}

/// Answer a farmer's question in context
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatMessage>> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("Question must not be empty".to_string()));
    }
    let message = state.chat.ask(request.farmer_id, request.question.trim()).await?;
    Ok(Json(message))
}

/// Chat history for a farmer
pub async fn history(
    State(state): State<AppState>,
    Path(farmer_id): Path<Uuid>,
) -> AppResult<Json<Vec<ChatMessage>>> {
    let messages = state.chat.history(farmer_id).await?;
    Ok(Json(messages))
}

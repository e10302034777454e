//! Conversational advisory service
//!
//! Answers ad-hoc farmer questions with the same weather and risk context
//! the daily pipeline uses, then logs the exchange.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::external::generator::{AdviceGenerator, ChatContext};
use crate::services::farmer::FarmerService;
use crate::services::pipeline::WeatherProvider;
use shared::{assess, derive_signals};

#[derive(Clone)]
pub struct ChatService {
    db: PgPool,
    farmers: FarmerService,
    weather: Arc<dyn WeatherProvider>,
    generator: AdviceGenerator,
}

/// A stored question/answer exchange
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl ChatService {
    pub fn new(
        db: PgPool,
        farmers: FarmerService,
        weather: Arc<dyn WeatherProvider>,
        generator: AdviceGenerator,
    ) -> Self {
        Self {
            db,
            farmers,
            weather,
            generator,
        }
    }

    /// Answer a farmer's question with current weather and risk context
    pub async fn ask(&self, farmer_id: Uuid, question: &str) -> AppResult<ChatMessage> {
        let farmer = self.farmers.get_farmer(farmer_id).await?;
        let snapshot = self.weather.fetch(&farmer.location).await?;
        let signals = derive_signals(&snapshot, &farmer.crop);
        let risks = assess(&signals);

        let answer = self
            .generator
            .generate(&ChatContext {
                farmer: &farmer,
                question,
                weather: &snapshot,
                risks: &risks,
            })
            .await;

        let message = sqlx::query_as::<_, ChatMessage>(
            r#"
            INSERT INTO chat_messages (farmer_id, question, answer)
            VALUES ($1, $2, $3)
            RETURNING id, farmer_id, question, answer, created_at
            "#,
        )
        .bind(farmer_id)
        .bind(question)
        .bind(&answer)
        .fetch_one(&self.db)
        .await?;

        Ok(message)
    }

    /// Chat history for a farmer, newest first
    pub async fn history(&self, farmer_id: Uuid) -> AppResult<Vec<ChatMessage>> {
        let messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, farmer_id, question, answer, created_at
            FROM chat_messages
            WHERE farmer_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(farmer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(messages)
    }
}

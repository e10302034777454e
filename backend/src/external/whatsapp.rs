//! WhatsApp messaging gateway client
//!
//! Delivery is best-effort: `send` never returns an error, it always
//! reports an outcome. Failures end up on the alert record, not in the
//! pipeline's control flow.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::DeliveryOutcome;

use crate::error::{AppError, AppResult};
use crate::services::pipeline::DeliveryChannel;

/// WhatsApp gateway client
#[derive(Clone)]
pub struct WhatsAppClient {
    http_client: Client,
    api_endpoint: String,
    api_key: String,
    phone_id: String,
}

/// Gateway send request
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    phone_id: &'a str,
    to: &'a str,
    message: &'a str,
}

/// Gateway send response
#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl WhatsAppClient {
    /// Create a new gateway client. Missing credentials are a startup
    /// configuration error, not a per-send failure.
    pub fn new(
        api_endpoint: String,
        api_key: String,
        phone_id: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        if api_key.is_empty() || phone_id.is_empty() {
            return Err(AppError::Configuration(
                "WhatsApp gateway credentials are not set".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_endpoint,
            api_key,
            phone_id,
        })
    }

    /// Strip formatting characters; the gateway expects a bare E.164 number.
    fn clean_phone(contact: &str) -> String {
        contact
            .chars()
            .filter(|c| *c == '+' || c.is_ascii_digit())
            .collect()
    }

    async fn push(&self, to: &str, text: &str) -> Result<Option<String>, String> {
        let request = SendMessageRequest {
            phone_id: &self.phone_id,
            to,
            message: text,
        };

        let response = self
            .http_client
            .post(format!("{}/messages", self.api_endpoint))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("gateway returned {}", response.status()));
        }

        let body: SendMessageResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid gateway response: {}", e))?;

        match body.error {
            Some(err) => Err(err),
            None => Ok(body.message_id),
        }
    }
}

#[async_trait]
impl DeliveryChannel for WhatsAppClient {
    async fn send(&self, contact: &str, text: &str) -> DeliveryOutcome {
        let to = Self::clean_phone(contact);
        if !to.starts_with('+') {
            return DeliveryOutcome::skipped("contact number missing country code");
        }

        match self.push(&to, text).await {
            Ok(message_id) => {
                tracing::debug!(message_id = ?message_id, "WhatsApp message accepted");
                DeliveryOutcome::sent()
            }
            Err(detail) => {
                tracing::warn!(detail = %detail, "WhatsApp delivery failed");
                DeliveryOutcome::failed(detail)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_phone_strips_formatting() {
        assert_eq!(WhatsAppClient::clean_phone("+91 98765-43210"), "+919876543210");
        assert_eq!(WhatsAppClient::clean_phone("(+66) 12 345 678"), "+6612345678");
    }
}

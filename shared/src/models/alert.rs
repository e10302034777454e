//! Alert audit models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted audit entry for one farmer in one pipeline run.
/// Append-only: never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: Uuid,
    pub farmer_id: Uuid,
    /// Serialized risk signals for audit/debug
    pub risk_signals: serde_json::Value,
    /// Rendered outbound message text
    pub message: String,
    pub channel: String,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
}

/// Outcome of the delivery attempt recorded on the alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Sent,
    Failed,
    Skipped,
    NoContact,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Sent => "sent",
            DeliveryStatus::Failed => "failed",
            DeliveryStatus::Skipped => "skipped",
            DeliveryStatus::NoContact => "no_contact",
        }
    }

    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "sent" => DeliveryStatus::Sent,
            "skipped" => DeliveryStatus::Skipped,
            "no_contact" => DeliveryStatus::NoContact,
            _ => DeliveryStatus::Failed,
        }
    }
}

/// Result of a best-effort send over the messaging channel.
/// The channel never raises; it always reports a status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub status: DeliveryStatus,
    pub detail: Option<String>,
}

impl DeliveryOutcome {
    pub fn sent() -> Self {
        Self {
            status: DeliveryStatus::Sent,
            detail: None,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Failed,
            detail: Some(detail.into()),
        }
    }

    pub fn skipped(detail: impl Into<String>) -> Self {
        Self {
            status: DeliveryStatus::Skipped,
            detail: Some(detail.into()),
        }
    }
}

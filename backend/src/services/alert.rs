//! Append-only alert audit log

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::pipeline::{AlertSink, NewAlertRecord};
use shared::{AlertRecord, DeliveryStatus};

/// Service over the alerts table. Records are inserted once and never
/// updated; the table is the audit trail of every advisory produced.
#[derive(Clone)]
pub struct AlertService {
    db: PgPool,
}

#[derive(Debug, sqlx::FromRow)]
struct AlertRow {
    id: Uuid,
    farmer_id: Uuid,
    risk_signals: serde_json::Value,
    message: String,
    channel: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl From<AlertRow> for AlertRecord {
    fn from(row: AlertRow) -> Self {
        AlertRecord {
            id: row.id,
            farmer_id: row.farmer_id,
            risk_signals: row.risk_signals,
            message: row.message,
            channel: row.channel,
            status: DeliveryStatus::from_str_lossy(&row.status),
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, farmer_id, risk_signals, message, channel, status, created_at";

impl AlertService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Insert a new alert record
    pub async fn insert(&self, record: NewAlertRecord) -> AppResult<AlertRecord> {
        let row = sqlx::query_as::<_, AlertRow>(&format!(
            r#"
            INSERT INTO alerts (farmer_id, risk_signals, message, channel, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(record.farmer_id)
        .bind(&record.risk_signals)
        .bind(&record.message)
        .bind(&record.channel)
        .bind(record.status.as_str())
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// List alert records, newest first
    pub async fn list(&self, limit: i64) -> AppResult<Vec<AlertRecord>> {
        let rows = sqlx::query_as::<_, AlertRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM alerts ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// List alert records for one farmer, newest first
    pub async fn list_for_farmer(&self, farmer_id: Uuid) -> AppResult<Vec<AlertRecord>> {
        let rows = sqlx::query_as::<_, AlertRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM alerts WHERE farmer_id = $1 ORDER BY created_at DESC"
        ))
        .bind(farmer_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

#[async_trait]
impl AlertSink for AlertService {
    async fn append(&self, record: NewAlertRecord) -> AppResult<()> {
        self.insert(record).await?;
        Ok(())
    }
}

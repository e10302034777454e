//! Batch orchestrator for the daily advisory pipeline
//!
//! Drives feature extraction, risk scoring, advisory composition, delivery
//! and persistence per farmer, with failure isolation: one farmer's error
//! never aborts the batch. Farmers are processed concurrently under a
//! bounded semaphore; the success count is aggregated from joined task
//! results, so no shared mutable state is involved.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use shared::{
    assess, compose, derive_signals, render_message, DeliveryOutcome, DeliveryStatus, Farmer,
    GpsCoordinates, WeatherSnapshot,
};

use crate::error::AppResult;

/// Source of the farmer roster. Failures are fatal to the whole run.
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn list_farmers(&self) -> AppResult<Vec<Farmer>>;
}

/// Weather forecast source. Fails with `AppError::WeatherUnavailable` on
/// network, timeout or non-2xx errors.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, location: &GpsCoordinates) -> AppResult<WeatherSnapshot>;
}

/// Outbound messaging channel. Best-effort: always returns an outcome,
/// never an error.
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    async fn send(&self, contact: &str, text: &str) -> DeliveryOutcome;
}

/// Append-only audit sink for alert records.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn append(&self, record: NewAlertRecord) -> AppResult<()>;
}

/// Alert record as handed to the sink; the sink assigns id and timestamp.
/// Written atomically once the farmer's pipeline completes, never
/// incrementally.
#[derive(Debug, Clone)]
pub struct NewAlertRecord {
    pub farmer_id: uuid::Uuid,
    pub risk_signals: serde_json::Value,
    pub message: String,
    pub channel: String,
    pub status: DeliveryStatus,
}

/// Pipeline orchestrator over the four collaborator seams
pub struct PipelineService {
    roster: Arc<dyn RosterSource>,
    weather: Arc<dyn WeatherProvider>,
    delivery: Arc<dyn DeliveryChannel>,
    alerts: Arc<dyn AlertSink>,
    max_concurrency: usize,
    run_timeout: Option<Duration>,
}

impl PipelineService {
    pub fn new(
        roster: Arc<dyn RosterSource>,
        weather: Arc<dyn WeatherProvider>,
        delivery: Arc<dyn DeliveryChannel>,
        alerts: Arc<dyn AlertSink>,
        max_concurrency: usize,
        run_timeout: Option<Duration>,
    ) -> Self {
        Self {
            roster,
            weather,
            delivery,
            alerts,
            max_concurrency: max_concurrency.max(1),
            run_timeout,
        }
    }

    /// Run the batch over the full roster. Returns the number of farmers
    /// processed successfully. Only roster-level failures propagate;
    /// everything per-farmer is contained.
    pub async fn run_pipeline(self: &Arc<Self>) -> AppResult<usize> {
        let farmers = self.roster.list_farmers().await?;
        if farmers.is_empty() {
            tracing::info!("pipeline run: roster is empty, nothing to process");
            return Ok(0);
        }

        let total = farmers.len();
        tracing::info!(total, "pipeline run started");

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks: JoinSet<bool> = JoinSet::new();

        for farmer in farmers {
            let service = Arc::clone(self);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // Closed only when the JoinSet is aborted
                let Ok(_permit) = semaphore.acquire().await else {
                    return false;
                };
                let farmer_id = farmer.id;
                match service.process_farmer(farmer).await {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(%farmer_id, error = %e, "farmer pipeline failed, skipping");
                        false
                    }
                }
            });
        }

        let deadline = self.run_timeout.map(|limit| tokio::time::Instant::now() + limit);
        let mut processed = 0;
        loop {
            let joined = match deadline {
                Some(at) => match tokio::time::timeout_at(at, tasks.join_next()).await {
                    Ok(joined) => joined,
                    Err(_) => {
                        tracing::warn!(
                            pending = tasks.len(),
                            "pipeline run timed out, abandoning unfinished farmers"
                        );
                        tasks.abort_all();
                        // Tasks that finished before the abort still count
                        while let Some(late) = tasks.join_next().await {
                            if matches!(late, Ok(true)) {
                                processed += 1;
                            }
                        }
                        break;
                    }
                },
                None => tasks.join_next().await,
            };
            match joined {
                Some(Ok(true)) => processed += 1,
                Some(Ok(false)) => {}
                Some(Err(e)) if e.is_cancelled() => {}
                Some(Err(e)) => tracing::error!(error = %e, "farmer task panicked"),
                None => break,
            }
        }

        tracing::info!(processed, total, "pipeline run finished");
        Ok(processed)
    }

    /// The per-farmer pipeline: fetch, score, compose, deliver, persist.
    async fn process_farmer(&self, farmer: Farmer) -> AppResult<()> {
        let snapshot = self.weather.fetch(&farmer.location).await?;

        let signals = derive_signals(&snapshot, &farmer.crop);
        let assessment = assess(&signals);
        let advisory = compose(&farmer, &assessment);
        let message = render_message(&advisory);

        let outcome = if farmer.reachable() {
            let contact = farmer.phone.as_deref().unwrap_or_default();
            self.delivery.send(contact, &message).await
        } else {
            DeliveryOutcome {
                status: DeliveryStatus::NoContact,
                detail: None,
            }
        };

        let record = NewAlertRecord {
            farmer_id: farmer.id,
            risk_signals: json!({
                "signals": signals,
                "assessment": assessment,
                "urgency": advisory.urgency,
            }),
            message,
            channel: "whatsapp".to_string(),
            status: outcome.status,
        };

        // A lost audit record is acceptable; delivery already happened
        if let Err(e) = self.alerts.append(record).await {
            tracing::error!(farmer_id = %farmer.id, error = %e, "failed to persist alert record");
        }

        Ok(())
    }
}

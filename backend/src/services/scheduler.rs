//! Daily pipeline scheduler

use std::sync::Arc;
use std::time::Duration;

use chrono::{Timelike, Utc};

use crate::services::pipeline::PipelineService;

/// Spawn the daily scheduler task. Fires once per day at the configured
/// UTC hour; a failed run is logged and the loop keeps going.
pub fn spawn_daily(pipeline: Arc<PipelineService>, run_hour_utc: u32) {
    tokio::spawn(async move {
        loop {
            let wait = seconds_until_hour(run_hour_utc);
            tracing::info!(run_hour_utc, wait_secs = wait, "scheduler sleeping until next run");
            tokio::time::sleep(Duration::from_secs(wait)).await;

            match pipeline.run_pipeline().await {
                Ok(processed) => {
                    tracing::info!(processed, "scheduled pipeline run completed");
                }
                Err(e) => {
                    tracing::error!(error = %e, "scheduled pipeline run failed");
                }
            }
        }
    });
}

/// Seconds from now until the next occurrence of `hour:00:00` UTC.
/// Always at least one second so a run never double-fires.
fn seconds_until_hour(hour: u32) -> u64 {
    let now = Utc::now();
    let today_secs = i64::from(now.num_seconds_from_midnight());
    let target_secs = i64::from(hour % 24) * 3600;
    let mut delta = target_secs - today_secs;
    if delta <= 0 {
        delta += 86_400;
    }
    delta as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_is_within_a_day() {
        for hour in 0..24 {
            let wait = seconds_until_hour(hour);
            assert!(wait >= 1);
            assert!(wait <= 86_400);
        }
    }

    #[test]
    fn test_hour_wraps_past_midnight() {
        assert_eq!(seconds_until_hour(25), seconds_until_hour(1));
    }
}

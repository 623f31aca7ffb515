//! Delivery worker — the consumer side of the `doneNotifications` queue.
//!
//! Pops queued jobs and persists each record into the store, retrying per
//! the job's policy (5 attempts, 5 s fixed backoff for live notifications).
//! A job whose retry budget is exhausted is logged and dropped.

use std::sync::Arc;
use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::watch;

use herald_common::error::AppError;
use herald_common::types::NotificationRecord;
use herald_engine::delivery::{JOB_DONE_NOTIFICATIONS, RecordStore, RetryPolicy, persist};

use crate::queue::{QueuedJob, queue_key};

/// Consumes the live-notification queue and persists records.
pub struct DeliveryWorker {
    redis: ConnectionManager,
    store: Arc<dyn RecordStore>,
    poll_timeout_secs: u64,
}

impl DeliveryWorker {
    pub fn new(redis: ConnectionManager, store: Arc<dyn RecordStore>, poll_timeout_secs: u64) -> Self {
        Self {
            redis,
            store,
            poll_timeout_secs,
        }
    }

    /// Run the consume loop until the shutdown signal flips to `true`.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        let key = queue_key(JOB_DONE_NOTIFICATIONS);
        tracing::info!(queue = %key, "Delivery worker started");

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
                popped = Self::pop(&mut self.redis, &key, self.poll_timeout_secs) => {
                    match popped {
                        Ok(Some(entry)) => self.handle_entry(&entry).await,
                        // BRPOP timeout, nothing queued
                        Ok(None) => {}
                        Err(e) => {
                            tracing::error!(error = %e, "Queue poll failed");
                            tokio::time::sleep(Duration::from_secs(1)).await;
                        }
                    }
                }
            }
        }

        tracing::info!("Delivery worker stopped");
    }

    /// Blocking-pop one entry, returning `None` on timeout.
    async fn pop(
        redis: &mut ConnectionManager,
        key: &str,
        timeout_secs: u64,
    ) -> Result<Option<String>, AppError> {
        let popped: Option<(String, String)> = redis.brpop(key, timeout_secs as f64).await?;
        Ok(popped.map(|(_, entry)| entry))
    }

    async fn handle_entry(&self, entry: &str) {
        let job: QueuedJob = match serde_json::from_str(entry) {
            Ok(job) => job,
            Err(e) => {
                tracing::warn!(error = %e, "Dropping undecodable queue entry");
                return;
            }
        };

        let record: NotificationRecord = match serde_json::from_value(job.payload) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(job = %job.job, error = %e, "Dropping job with corrupt record payload");
                return;
            }
        };

        if let Err(e) = persist_with_retry(self.store.as_ref(), &record, job.policy).await {
            tracing::error!(
                notification_id = %record.id,
                attempts = job.policy.attempts,
                error = %e,
                "Retry budget exhausted, dropping notification"
            );
        }
    }
}

/// Persist a record, retrying up to `policy.attempts` times with a fixed
/// `policy.backoff_ms` sleep between attempts. Stops at the first success.
pub async fn persist_with_retry(
    store: &dyn RecordStore,
    record: &NotificationRecord,
    policy: RetryPolicy,
) -> Result<(), AppError> {
    let attempts = policy.attempts.max(1);
    let mut last_err = None;

    for attempt in 1..=attempts {
        match persist(store, record).await {
            Ok(()) => {
                if attempt > 1 {
                    tracing::info!(
                        notification_id = %record.id,
                        attempt,
                        "Notification persisted after retry"
                    );
                }
                return Ok(());
            }
            Err(e) => {
                tracing::warn!(
                    notification_id = %record.id,
                    attempt,
                    error = %e,
                    "Persist attempt failed"
                );
                last_err = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(Duration::from_millis(policy.backoff_ms)).await;
                }
            }
        }
    }

    Err(last_err.unwrap_or_else(|| AppError::Queue("persist failed".to_string())))
}

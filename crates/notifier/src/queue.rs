//! Redis-backed delivery queue.
//!
//! Jobs are serialized with their retry policy and `LPUSH`ed onto a per-job
//! list; the worker `BRPOP`s from the other end, so execution order follows
//! enqueue order.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};

use herald_common::error::AppError;
use herald_engine::delivery::{DeliveryQueue, RetryPolicy};

/// Redis list holding the jobs enqueued under `job`.
pub fn queue_key(job: &str) -> String {
    format!("notification:queue:{job}")
}

/// A job as it sits in the queue: name, payload, and the policy the consumer
/// honors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedJob {
    pub job: String,
    pub payload: serde_json::Value,
    pub policy: RetryPolicy,
}

/// Durable queue client over a shared Redis connection.
pub struct RedisDeliveryQueue {
    redis: ConnectionManager,
}

impl RedisDeliveryQueue {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl DeliveryQueue for RedisDeliveryQueue {
    async fn enqueue(
        &self,
        job: &str,
        payload: serde_json::Value,
        policy: RetryPolicy,
    ) -> Result<(), AppError> {
        let entry = serde_json::to_string(&QueuedJob {
            job: job.to_string(),
            payload,
            policy,
        })?;

        let mut conn = self.redis.clone();
        conn.lpush::<_, _, ()>(queue_key(job), entry).await?;

        tracing::debug!(job, "Job enqueued");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herald_engine::delivery::JOB_DONE_NOTIFICATIONS;

    #[test]
    fn test_queue_key_format() {
        assert_eq!(
            queue_key(JOB_DONE_NOTIFICATIONS),
            "notification:queue:doneNotifications"
        );
    }

    #[test]
    fn test_queued_job_round_trips_with_policy() {
        let job = QueuedJob {
            job: JOB_DONE_NOTIFICATIONS.to_string(),
            payload: serde_json::json!({"id": "id-1"}),
            policy: RetryPolicy::live_delivery(),
        };

        let entry = serde_json::to_string(&job).unwrap();
        let decoded: QueuedJob = serde_json::from_str(&entry).unwrap();
        assert_eq!(decoded, job);
        assert_eq!(decoded.policy.attempts, 5);
        assert_eq!(decoded.policy.backoff_ms, 5000);
    }
}

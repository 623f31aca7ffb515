//! Collaborator seams: delivery queue, record store, mail gateway.
//!
//! The engine is constructed against these traits; concrete implementations
//! live in `herald-notifier`. Also defines the job payload mapping and the
//! persistence callback the queue consumer invokes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use herald_common::error::AppError;
use herald_common::types::NotificationRecord;

/// Job name for live-notification persistence.
pub const JOB_DONE_NOTIFICATIONS: &str = "doneNotifications";

/// Delivery attempts for a live notification. Persistence is not
/// latency-critical but must eventually land.
pub const DELIVERY_ATTEMPTS: u32 = 5;

/// Fixed backoff between delivery attempts, in milliseconds.
pub const DELIVERY_BACKOFF_MS: u64 = 5000;

/// Fixed template identifier for notification emails.
pub const MAIL_TEMPLATE: &str = "course-notification";

/// Retry policy attached to an enqueued job, honored by the queue consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff_ms: u64,
}

impl RetryPolicy {
    /// The policy for live-notification persistence: 5 attempts, 5 s apart.
    pub fn live_delivery() -> Self {
        Self {
            attempts: DELIVERY_ATTEMPTS,
            backoff_ms: DELIVERY_BACKOFF_MS,
        }
    }
}

/// A structured transactional email send request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailRequest {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub template: String,
    pub context: serde_json::Value,
}

/// Durable queue accepting named jobs with a retry policy.
///
/// The engine awaits only the enqueue acknowledgment; execution and retries
/// happen in the consumer.
#[async_trait]
pub trait DeliveryQueue: Send + Sync {
    async fn enqueue(
        &self,
        job: &str,
        payload: serde_json::Value,
        policy: RetryPolicy,
    ) -> Result<(), AppError>;
}

/// Key-value store holding serialized notification records by id.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<String>, AppError>;
    async fn set(&self, id: &str, payload: &str) -> Result<(), AppError>;
}

/// Mail gateway, fire-and-forget from the engine's perspective.
///
/// Implementations deliver on their own task; a failed send is the gateway's
/// concern and is invisible to the caller by design, not by oversight.
pub trait MailGateway: Send + Sync {
    fn send(&self, request: MailRequest);
}

/// Map a record to the payload enqueued under [`JOB_DONE_NOTIFICATIONS`].
pub fn to_job_payload(record: &NotificationRecord) -> Result<serde_json::Value, AppError> {
    Ok(serde_json::to_value(record)?)
}

/// Persist a record into the store. Invoked by the queue consumer for each
/// delivery attempt, and by the update path after a status flip.
pub async fn persist(store: &dyn RecordStore, record: &NotificationRecord) -> Result<(), AppError> {
    let payload = serde_json::to_string(record)?;
    store.set(&record.id, &payload).await
}

/// Decode a stored record payload. An undecodable payload is a
/// [`AppError::CorruptRecord`], never a panic.
pub fn decode_record(id: &str, payload: &str) -> Result<NotificationRecord, AppError> {
    serde_json::from_str(payload)
        .map_err(|e| AppError::CorruptRecord(format!("record {id}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use herald_common::types::{CourseAction, NotificationStatus};

    fn make_record() -> NotificationRecord {
        NotificationRecord {
            id: "id-1".to_string(),
            course_id: "course-1".to_string(),
            course_name: "math".to_string(),
            to: "Noah".to_string(),
            from: "Arrow".to_string(),
            action: CourseAction::Register,
            text: "You have been registered in a new course: \"math\"".to_string(),
            status: NotificationStatus::New,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_job_payload_round_trips_to_record() {
        let record = make_record();
        let payload = to_job_payload(&record).unwrap();
        let decoded: NotificationRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_decode_record_rejects_garbage() {
        let err = decode_record("id-1", "not json").unwrap_err();
        assert!(matches!(err, AppError::CorruptRecord(_)));
    }

    #[test]
    fn test_live_delivery_policy() {
        let policy = RetryPolicy::live_delivery();
        assert_eq!(policy.attempts, 5);
        assert_eq!(policy.backoff_ms, 5000);
    }
}

//! Notification record builder.
//!
//! Assembles the persisted representation of one live notification from an
//! event plus synthesized text. Id generation sits behind [`IdSource`] so
//! tests can inject a deterministic sequence.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use herald_common::types::{ActionEvent, NotificationRecord, NotificationStatus};

/// Source of fresh record ids.
///
/// Ids must be unique for the store's lifetime; time-ordered ids keep the
/// store scannable in creation order without coordination.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Production id source: UUIDv7 (millisecond timestamp prefix + random
/// suffix).
pub struct UuidV7Source;

impl IdSource for UuidV7Source {
    fn next_id(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// Builds [`NotificationRecord`]s with fresh ids.
pub struct RecordBuilder {
    ids: Arc<dyn IdSource>,
}

impl RecordBuilder {
    pub fn new(ids: Arc<dyn IdSource>) -> Self {
        Self { ids }
    }

    /// Build a record for one recipient of an event. Status starts at `New`.
    pub fn build(
        &self,
        event: &ActionEvent,
        recipient: &str,
        counterpart: &str,
        text: &str,
    ) -> NotificationRecord {
        NotificationRecord {
            id: self.ids.next_id(),
            course_id: event.course_id.clone(),
            course_name: event.course_name.clone(),
            to: recipient.to_string(),
            from: counterpart.to_string(),
            action: event.action,
            text: text.to_string(),
            status: NotificationStatus::New,
            created_at: Utc::now(),
        }
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new(Arc::new(UuidV7Source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    use herald_common::types::CourseAction;

    /// Deterministic id source for tests: "id-1", "id-2", ...
    pub struct SequenceIdSource(AtomicU64);

    impl SequenceIdSource {
        pub fn new() -> Self {
            Self(AtomicU64::new(0))
        }
    }

    impl IdSource for SequenceIdSource {
        fn next_id(&self) -> String {
            format!("id-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    fn make_event() -> ActionEvent {
        ActionEvent {
            course_id: "course-1".to_string(),
            course_name: "math".to_string(),
            action: CourseAction::Register,
            student: "Noah".to_string(),
            professor: "Arrow".to_string(),
            outcome_accepted: true,
            preferences: vec![],
        }
    }

    #[test]
    fn test_build_copies_event_fields() {
        let builder = RecordBuilder::new(Arc::new(SequenceIdSource::new()));
        let record = builder.build(&make_event(), "Noah", "Arrow", "hello");

        assert_eq!(record.id, "id-1");
        assert_eq!(record.course_id, "course-1");
        assert_eq!(record.course_name, "math");
        assert_eq!(record.to, "Noah");
        assert_eq!(record.from, "Arrow");
        assert_eq!(record.action, CourseAction::Register);
        assert_eq!(record.text, "hello");
        assert_eq!(record.status, NotificationStatus::New);
    }

    #[test]
    fn test_ids_are_fresh_per_record() {
        let builder = RecordBuilder::new(Arc::new(SequenceIdSource::new()));
        let event = make_event();
        let a = builder.build(&event, "Noah", "Arrow", "");
        let b = builder.build(&event, "Arrow", "Noah", "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_uuid_v7_ids_are_unique() {
        let source = UuidV7Source;
        let a = source.next_id();
        let b = source.next_id();
        assert_ne!(a, b);
    }
}

//! Mark-as-read update path.
//!
//! Each id is an independent unit: a missing or corrupt record is reported
//! in its slot and never aborts the siblings. Marking an already-read record
//! is a harmless overwrite.

use serde::Serialize;

use herald_common::error::AppError;
use herald_common::types::NotificationStatus;

use crate::delivery::{RecordStore, decode_record, persist};

/// Per-id result of a mark-read pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStatus {
    MarkedRead,
    /// Idempotent overwrite: the record was already read.
    AlreadyRead,
    NotFound,
    Corrupt,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateOutcome {
    pub id: String,
    pub status: UpdateStatus,
}

/// Outcome of a whole mark-read call. `Empty` is a no-op, distinct from
/// success-with-work.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MarkReadReport {
    Empty,
    Completed { outcomes: Vec<UpdateOutcome> },
}

/// Flip each record's status to `Read` and persist it back.
///
/// No atomicity across the id list; infrastructure failures (store
/// unreachable) propagate, per-id conditions do not.
pub async fn mark_read(store: &dyn RecordStore, ids: &[String]) -> Result<MarkReadReport, AppError> {
    if ids.is_empty() {
        return Ok(MarkReadReport::Empty);
    }

    let mut outcomes = Vec::with_capacity(ids.len());
    for id in ids {
        let status = match store.get(id).await? {
            None => {
                tracing::debug!(notification_id = %id, "Record not found for mark-read");
                UpdateStatus::NotFound
            }
            Some(payload) => match decode_record(id, &payload) {
                Err(e) => {
                    tracing::warn!(notification_id = %id, error = %e, "Stored record is corrupt");
                    UpdateStatus::Corrupt
                }
                Ok(mut record) => {
                    let already_read = record.status == NotificationStatus::Read;
                    record.status = NotificationStatus::Read;
                    persist(store, &record).await?;
                    if already_read {
                        UpdateStatus::AlreadyRead
                    } else {
                        UpdateStatus::MarkedRead
                    }
                }
            },
        };
        outcomes.push(UpdateOutcome {
            id: id.clone(),
            status,
        });
    }

    Ok(MarkReadReport::Completed { outcomes })
}

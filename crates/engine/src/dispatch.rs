//! Dispatch engine — per-event, per-recipient channel orchestration.
//!
//! For each event: student first, then professor, each role-flipped through
//! resolve → synthesize → build. Live records are enqueued for retried
//! persistence before the recipient's email is submitted, and the report
//! always carries the record that was just built — no store read-back.

use std::sync::Arc;

use serde::Serialize;

use herald_common::error::AppError;
use herald_common::types::{ActionEvent, NotificationRecord};

use crate::channels;
use crate::delivery::{
    DeliveryQueue, JOB_DONE_NOTIFICATIONS, MAIL_TEMPLATE, MailGateway, MailRequest, RecordStore,
    RetryPolicy, to_job_payload,
};
use crate::record::RecordBuilder;
use crate::text;
use crate::update::{self, MarkReadReport};

/// Side effects issued for one event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventDispatch {
    /// Live records, in enqueue order (student before professor).
    pub records: Vec<NotificationRecord>,
    /// Number of fire-and-forget mail submissions.
    pub emails: usize,
}

/// Per-event outcome within a batch. A rejected event never aborts its
/// siblings.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventOutcome {
    Dispatched(EventDispatch),
    Rejected { reason: String },
}

/// One outcome per event, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<EventOutcome>,
}

/// Central dispatch engine, constructed with explicit collaborators.
pub struct DispatchEngine {
    queue: Arc<dyn DeliveryQueue>,
    store: Arc<dyn RecordStore>,
    mail: Arc<dyn MailGateway>,
    builder: RecordBuilder,
    email_from: String,
}

impl DispatchEngine {
    pub fn new(
        queue: Arc<dyn DeliveryQueue>,
        store: Arc<dyn RecordStore>,
        mail: Arc<dyn MailGateway>,
        builder: RecordBuilder,
        email_from: String,
    ) -> Self {
        Self {
            queue,
            store,
            mail,
            builder,
            email_from,
        }
    }

    /// Dispatch a batch of events.
    ///
    /// An empty batch is rejected outright with zero side effects; otherwise
    /// events are processed independently and per-event failures land in the
    /// report instead of aborting the batch.
    pub async fn dispatch_batch(&self, events: &[ActionEvent]) -> Result<BatchReport, AppError> {
        if events.is_empty() {
            return Err(AppError::EmptyBatch);
        }

        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            match self.dispatch_one(event).await {
                Ok(dispatch) => outcomes.push(EventOutcome::Dispatched(dispatch)),
                Err(e) => {
                    tracing::warn!(
                        course_id = %event.course_id,
                        action = %event.action,
                        error = %e,
                        "Event rejected"
                    );
                    outcomes.push(EventOutcome::Rejected {
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(BatchReport { outcomes })
    }

    /// Dispatch a single event to both candidate recipients.
    ///
    /// Missing course identity fails the event at the gate, before any side
    /// effect.
    pub async fn dispatch_one(&self, event: &ActionEvent) -> Result<EventDispatch, AppError> {
        if event.course_id.is_empty() || event.course_name.is_empty() {
            return Err(AppError::BadEvent("missing course identity".to_string()));
        }

        let mut dispatch = EventDispatch::default();

        // Student side effects are issued before the professor's; consumers
        // must not rely on delivery completing in that order.
        self.dispatch_recipient(event, &event.student, &event.professor, true, &mut dispatch)
            .await?;
        self.dispatch_recipient(event, &event.professor, &event.student, false, &mut dispatch)
            .await?;

        Ok(dispatch)
    }

    async fn dispatch_recipient(
        &self,
        event: &ActionEvent,
        recipient: &str,
        counterpart: &str,
        recipient_is_student: bool,
        out: &mut EventDispatch,
    ) -> Result<(), AppError> {
        let selection = channels::resolve(&event.preferences, recipient);
        if !selection.wants_live && !selection.wants_email {
            return Ok(());
        }

        // Empty text is still delivered; suppressing it is a product
        // decision that has not been taken.
        let message = text::synthesize(
            event.action,
            &event.course_id,
            &event.course_name,
            recipient_is_student,
            counterpart,
            event.outcome_accepted,
        );

        if selection.wants_live {
            let record = self.builder.build(event, recipient, counterpart, &message);
            let payload = to_job_payload(&record)?;
            self.queue
                .enqueue(JOB_DONE_NOTIFICATIONS, payload, RetryPolicy::live_delivery())
                .await?;

            tracing::debug!(
                notification_id = %record.id,
                to = %record.to,
                action = %record.action,
                "Live notification enqueued"
            );
            out.records.push(record);
        }

        if selection.wants_email {
            match selection.email {
                Some(address) => {
                    self.mail.send(MailRequest {
                        to: address,
                        from: self.email_from.clone(),
                        subject: format!("New course notification for {recipient}"),
                        template: MAIL_TEMPLATE.to_string(),
                        context: serde_json::json!({ "text": message }),
                    });
                    out.emails += 1;
                }
                None => {
                    tracing::warn!(
                        username = %recipient,
                        "Email channel requested without an address, skipping"
                    );
                }
            }
        }

        Ok(())
    }

    /// Mark persisted records as read. See [`update::mark_read`].
    pub async fn mark_read(&self, ids: &[String]) -> Result<MarkReadReport, AppError> {
        update::mark_read(self.store.as_ref(), ids).await
    }
}

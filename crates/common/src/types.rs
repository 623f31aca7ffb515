use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Course-related actions that trigger notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseAction {
    /// A student was registered in a course (or their request was resolved).
    Register,
    /// A student was unregistered from a course.
    Unregister,
    /// A student requested access to course details.
    SeeDetailsStudent,
    /// The professor resolved a pending details-access request.
    SeeDetailsProfessor,
}

impl std::fmt::Display for CourseAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseAction::Register => write!(f, "register"),
            CourseAction::Unregister => write!(f, "unregister"),
            CourseAction::SeeDetailsStudent => write!(f, "see_details_student"),
            CourseAction::SeeDetailsProfessor => write!(f, "see_details_professor"),
        }
    }
}

/// Delivery channel for a single recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Persisted in-app notification, polled or pushed to the client.
    Live,
    /// Transactional email.
    Email,
}

/// Lifecycle status of a persisted live notification.
///
/// Transitions only `New` → `Read`, and only through the update path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    New,
    Read,
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationStatus::New => write!(f, "new"),
            NotificationStatus::Read => write!(f, "read"),
        }
    }
}

/// A recipient's declared delivery preferences.
///
/// An event carries one entry per recipient username. A recipient without an
/// entry has opted out of everything — that is a valid state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelPreference {
    pub username: String,
    pub channels: Vec<Channel>,
    /// Required only when `channels` contains `Email`.
    pub email: Option<String>,
}

/// One course-related action affecting a student/professor pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionEvent {
    pub course_id: String,
    pub course_name: String,
    pub action: CourseAction,
    /// Student display name / username.
    pub student: String,
    /// Professor display name / username.
    pub professor: String,
    /// Approval flag, meaningful only for approval-style actions.
    #[serde(default)]
    pub outcome_accepted: bool,
    #[serde(default)]
    pub preferences: Vec<ChannelPreference>,
}

/// The persisted representation of one live notification.
///
/// Built once per recipient per event when that recipient wants the live
/// channel; email-only delivery produces no record. Immutable after creation
/// except for the single `New` → `Read` status flip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// UUIDv7 — time-ordered, collision-resistant without coordination.
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    /// Recipient display name.
    pub to: String,
    /// Counterpart display name.
    pub from: String,
    pub action: CourseAction,
    /// Synthesized human-readable message, possibly empty.
    pub text: String,
    pub status: NotificationStatus,
    pub created_at: DateTime<Utc>,
}

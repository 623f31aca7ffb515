//! Notification dispatch core.
//!
//! Given one course action event, decides per recipient which channels fire,
//! synthesizes role- and outcome-aware text, builds delivery records, and
//! hands them to the retrying delivery queue and the mail gateway. Also owns
//! the mark-as-read update path for persisted records.

pub mod channels;
pub mod delivery;
pub mod dispatch;
pub mod record;
pub mod text;
pub mod update;

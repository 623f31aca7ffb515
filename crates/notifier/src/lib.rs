//! Concrete collaborators for the dispatch engine.
//!
//! - Redis-backed record store and delivery queue
//! - The queue worker that persists live notifications with the bounded
//!   retry policy
//! - The fire-and-forget HTTP mail gateway

pub mod mailer;
pub mod queue;
pub mod store;
pub mod worker;

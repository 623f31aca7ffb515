//! Shared application state for the Axum API server.

use std::sync::Arc;

use herald_engine::dispatch::DispatchEngine;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DispatchEngine>,
}

impl AppState {
    pub fn new(engine: Arc<DispatchEngine>) -> Self {
        Self { engine }
    }
}

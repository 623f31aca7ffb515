//! Notification dispatch and mark-read routes.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use herald_common::error::AppError;
use herald_common::types::ActionEvent;
use herald_engine::dispatch::BatchReport;
use herald_engine::update::MarkReadReport;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/notifications", post(dispatch_batch))
        .route("/api/notifications/read", post(mark_read))
}

/// POST /api/notifications — Dispatch a batch of course action events.
///
/// An empty batch is a 400; per-event failures are reported in the body and
/// do not fail the request.
async fn dispatch_batch(
    State(state): State<AppState>,
    Json(events): Json<Vec<ActionEvent>>,
) -> Result<Json<BatchReport>, AppError> {
    let report = state.engine.dispatch_batch(&events).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
struct MarkReadBody {
    ids: Vec<String>,
}

/// POST /api/notifications/read — Mark persisted notifications as read.
///
/// Always 200: missing ids are reported per slot in the body.
async fn mark_read(
    State(state): State<AppState>,
    Json(body): Json<MarkReadBody>,
) -> Result<Json<MarkReadReport>, AppError> {
    let report = state.engine.mark_read(&body.ids).await?;
    Ok(Json(report))
}

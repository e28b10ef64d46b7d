//! # HTTP Handlers
//!
//! Thin adapters between axum extractors and [`ReceiptService`].
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                     Success            Failure            │
//! │  ──────  ───────────────────────  ─────────────────  ─────────────────  │
//! │  POST    /receipts/process        202 {"id": ...}    400, 413           │
//! │  GET     /receipts/{id}/points    200 {"points": n}  400, 404           │
//! │  GET     /health                  200 "OK"                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use receipt_store::{ReceiptId, ScoreStore};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiResult;
use crate::service::ReceiptService;

/// Service handle shared by every request.
pub type SharedService<S> = Arc<ReceiptService<S>>;

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub id: ReceiptId,
}

#[derive(Debug, Serialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// `POST /receipts/process`
///
/// The body is taken as raw bytes so the strict decoder in receipt-core
/// sees exactly what the client sent, whatever the `Content-Type`.
pub async fn process_receipt<S: ScoreStore + 'static>(
    State(service): State<SharedService<S>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<(StatusCode, Json<ProcessResponse>)> {
    let body = body?;

    let id = service.submit(&body).map_err(|err| {
        debug!(error = %err, "Receipt rejected");
        err
    })?;

    Ok((StatusCode::ACCEPTED, Json(ProcessResponse { id })))
}

/// `GET /receipts/{id}/points`
pub async fn get_points<S: ScoreStore + 'static>(
    State(service): State<SharedService<S>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    let points = service.lookup(&id).map_err(|err| {
        debug!(error = %err, "Points lookup failed");
        err
    })?;

    Ok(Json(PointsResponse { points }))
}

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}

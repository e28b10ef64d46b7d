//! # Router
//!
//! Routes plus the transport layers wrapped around them.
//!
//! ## Layer Stack
//! ```text
//! request ──► TraceLayer ──► TimeoutLayer (408) ──► DefaultBodyLimit (413) ──► handler
//! ```

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use receipt_store::ScoreStore;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::handlers::{get_points, health, process_receipt};
use crate::service::ReceiptService;

/// Builds the application router.
///
/// ## Arguments
/// * `service` - Shared receipt service
/// * `config` - Body limit and request timeout come from here
pub fn build_router<S>(service: Arc<ReceiptService<S>>, config: &ApiConfig) -> Router
where
    S: ScoreStore + 'static,
{
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
        .layer(DefaultBodyLimit::max(config.max_body_bytes));

    Router::new()
        .route("/receipts/process", post(process_receipt::<S>))
        .route("/receipts/{id}/points", get(get_points::<S>))
        .route("/health", get(health))
        .layer(layers)
        .with_state(service)
}

// =============================================================================
// Route Tests
// =============================================================================

//! # API Error Type
//!
//! What an HTTP client receives when a request fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Receipt API                        │
//! │                                                                         │
//! │  Handler                                                                │
//! │  Result<T, ApiError>                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ServiceError::Rejected(Malformed) ──► MALFORMED_REQUEST   400          │
//! │  ServiceError::Rejected(Invalid)   ──► VALIDATION_ERROR    400          │
//! │  ServiceError::EmptyId / InvalidId ──► INVALID_ID          400          │
//! │  ServiceError::NotFound            ──► NOT_FOUND           404          │
//! │  body over the limit               ──► PAYLOAD_TOO_LARGE   413          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  IntoResponse: status + JSON body                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use receipt_core::ReceiptError;
use serde::Serialize;

use crate::service::ServiceError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "The receipt is invalid.",
///   "details": ["item 2: price must be a decimal number with two decimal places"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable summary
    pub message: String,

    /// Individual reasons, possibly empty
    pub details: Vec<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Body is not a receipt-shaped JSON object (400)
    MalformedRequest,

    /// A field broke a rule (400)
    ValidationError,

    /// Receipt ID is empty or contains whitespace (400)
    InvalidId,

    /// No receipt for that ID (404)
    NotFound,

    /// Body exceeds the configured limit (413)
    PayloadTooLarge,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::MalformedRequest | ErrorCode::ValidationError | ErrorCode::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

impl ApiError {
    /// Creates a new API error without details.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

/// Converts service outcomes to API errors.
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected(rejection) => {
                let code = match rejection {
                    ReceiptError::Malformed(_) => ErrorCode::MalformedRequest,
                    ReceiptError::Invalid(_) => ErrorCode::ValidationError,
                };
                ApiError::new(code, "The receipt is invalid.").with_details(rejection.details())
            }
            ServiceError::EmptyId => ApiError::new(ErrorCode::InvalidId, "Receipt ID cannot be empty."),
            ServiceError::InvalidId(_) => ApiError::new(ErrorCode::InvalidId, "Receipt ID is invalid."),
            ServiceError::NotFound(_) => {
                ApiError::new(ErrorCode::NotFound, "No receipt found for that ID.")
            }
        }
    }
}

/// Converts body extraction failures (size limit, unreadable stream).
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::new(ErrorCode::PayloadTooLarge, "The receipt is too large.")
        } else {
            ApiError::new(ErrorCode::MalformedRequest, "The receipt is invalid.")
                .with_details(vec![rejection.body_text()])
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Convenience type alias for handler results.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

//! # Error Types
//!
//! Domain-specific error types for receipt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  receipt-core errors (this file)                                       │
//! │  ├── ReceiptError     - Why a submission was rejected                  │
//! │  └── ValidationError  - One rule violation inside a submission         │
//! │                                                                         │
//! │  receipt-api errors (app crate)                                        │
//! │  ├── ServiceError     - Orchestration outcome (rejected, not found...) │
//! │  └── ApiError         - What the HTTP client sees (serialized)         │
//! │                                                                         │
//! │  Flow: ValidationError → ReceiptError → ServiceError → ApiError        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field in every violation
//! 3. Collect every violation, never stop at the first one
//! 4. Conversion failures after validation are still `Invalid`, never internal

use thiserror::Error;

// =============================================================================
// Receipt Error
// =============================================================================

/// Rejection of a submitted receipt.
///
/// ## Two Kinds
/// ```text
/// raw bytes ──► decode ──┬── bad JSON / wrong types / unknown field ──► Malformed
///                        │
///                        └── ok ──► rules ──┬── any violation ──► Invalid(all)
///                                           │
///                                           └── ok ──► Receipt
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    /// The body could not be decoded into the receipt shape.
    #[error("malformed receipt: {0}")]
    Malformed(String),

    /// The body decoded but one or more fields broke a rule.
    #[error("invalid receipt: {}", join_violations(.0))]
    Invalid(Vec<ValidationError>),
}

impl ReceiptError {
    /// Wraps a single violation.
    pub fn invalid(err: ValidationError) -> Self {
        ReceiptError::Invalid(vec![err])
    }

    /// Human-readable reasons, one per violation.
    pub fn details(&self) -> Vec<String> {
        match self {
            ReceiptError::Malformed(reason) => vec![reason.clone()],
            ReceiptError::Invalid(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }
}

fn join_violations(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single field rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field does not match its pattern.
    #[error("{field} must {expected}")]
    InvalidFormat {
        field: &'static str,
        expected: &'static str,
    },

    /// Amount matched its pattern but does not fit in i64 cents.
    #[error("{field} is too large")]
    TooLarge { field: &'static str },

    /// Purchase date is not `YYYY-MM-DD` or not a real calendar date.
    #[error("purchase date is not a valid date: {value}")]
    InvalidDate { value: String },

    /// Purchase time is not a 24-hour `HH:MM` value.
    #[error("purchase time is not a valid time: {value}")]
    InvalidTime { value: String },

    /// The items array is missing or empty.
    #[error("minimum of one item is required")]
    NoItems,

    /// Every field is valid but the receipt's points do not fit in `u64`.
    #[error("receipt points exceed the supported maximum")]
    PointsOverflow,

    /// A violation inside one item (1-based position).
    #[error("item {index}: {source}")]
    Item {
        index: usize,
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Scopes a violation to the item at `position` (0-based).
    pub fn in_item(self, position: usize) -> Self {
        ValidationError::Item {
            index: position + 1,
            source: Box::new(self),
        }
    }
}

/// Convenience type alias for Results with ReceiptError.
pub type ReceiptResult<T> = Result<T, ReceiptError>;

// =============================================================================
// Unit Tests
// =============================================================================

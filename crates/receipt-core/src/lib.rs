//! # receipt-core: Pure Receipt Logic
//!
//! This crate is the **heart** of the receipt points service. It validates
//! submitted receipts and scores them, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Receipt Points Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 receipt-api (axum HTTP)                         │   │
//! │  │   POST /receipts/process        GET /receipts/{id}/points       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ReceiptService                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ receipt-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ validation │  │  scoring  │  │   │
//! │  │   │  Receipt  │  │   Money   │  │  payload   │  │  7 rules  │  │   │
//! │  │   │   Item    │  │  (cents)  │  │  → Receipt │  │  → points │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              receipt-store (in-memory score table)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Receipt and ReceiptItem
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`validation`] - Payload decoding, field rules, conversion
//! - [`scoring`] - Points rules
//! - [`error`] - Rejection types
//!
//! ## Example Usage
//!
//! ```rust
//! use receipt_core::{calculate_points, parse_receipt};
//!
//! let body = br#"{
//!     "retailer": "Target",
//!     "purchaseDate": "2022-01-01",
//!     "purchaseTime": "13:01",
//!     "items": [
//!         {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
//!         {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
//!         {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
//!         {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
//!         {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
//!     ],
//!     "total": "35.35"
//! }"#;
//!
//! let receipt = parse_receipt(body).unwrap();
//! assert_eq!(calculate_points(&receipt), Some(28));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod scoring;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ReceiptError, ReceiptResult, ValidationError};
pub use money::Money;
pub use scoring::{calculate_points, points_breakdown, PointsBreakdown};
pub use types::{Receipt, ReceiptItem};
pub use validation::{parse_receipt, ReceiptPayload};

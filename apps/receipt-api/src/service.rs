//! # Receipt Service
//!
//! Orchestrates the two use cases: submit a receipt, look up its points.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ReceiptService                                   │
//! │                                                                         │
//! │  submit(raw bytes)                                                      │
//! │  ─────────────────                                                      │
//! │  parse_receipt ──┬── Err ──► ServiceError::Rejected  (store untouched)  │
//! │                  └── Ok ───► points_breakdown ──► store.put ──► id      │
//! │                                                                         │
//! │  lookup(id text)                                                        │
//! │  ───────────────                                                        │
//! │  trim ──┬── empty ───────────► ServiceError::EmptyId                    │
//! │         ├── inner whitespace ► ServiceError::InvalidId                  │
//! │         └── ok ──► store.get ──┬── Some(points) ──► points               │
//! │                                └── None ──► ServiceError::NotFound      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method is synchronous. Handlers call straight into the service
//! without `spawn_blocking`: nothing here waits on I/O.

use receipt_core::{parse_receipt, points_breakdown, Receipt, ReceiptError, ValidationError};
use receipt_store::{ReceiptId, ScoreStore};
use thiserror::Error;
use tracing::{debug, info};

// =============================================================================
// Service Error
// =============================================================================

/// Outcome of a failed service call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The submitted receipt was malformed or invalid.
    #[error(transparent)]
    Rejected(#[from] ReceiptError),

    /// The identifier was empty after trimming.
    #[error("receipt id is empty")]
    EmptyId,

    /// The identifier contains whitespace.
    #[error("receipt id is invalid: {0:?}")]
    InvalidId(String),

    /// No score is stored under the identifier.
    #[error("no receipt found for id {0}")]
    NotFound(String),
}

/// Convenience type alias for Results with ServiceError.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Receipt Service
// =============================================================================

/// Receipt use cases over a [`ScoreStore`].
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug)]
pub struct ReceiptService<S> {
    store: S,
}

impl<S: ScoreStore> ReceiptService<S> {
    /// Creates a new service backed by `store`.
    pub fn new(store: S) -> Self {
        ReceiptService { store }
    }

    /// Validates, scores and stores a raw JSON receipt.
    ///
    /// ## Returns
    /// The identifier to look the points up with.
    ///
    /// ## Errors
    /// [`ServiceError::Rejected`] when the body is malformed or breaks a
    /// field rule. Nothing is stored in that case.
    pub fn submit(&self, raw: &[u8]) -> ServiceResult<ReceiptId> {
        let receipt = parse_receipt(raw)?;
        self.process(&receipt)
    }

    /// Scores and stores an already validated receipt.
    ///
    /// ## Errors
    /// [`ServiceError::Rejected`] with [`ValidationError::PointsOverflow`]
    /// for a hand-built receipt whose points do not fit in `u64`. Receipts
    /// from [`parse_receipt`] never fail here.
    pub fn process(&self, receipt: &Receipt) -> ServiceResult<ReceiptId> {
        let (breakdown, points) = points_breakdown(receipt)
            .and_then(|breakdown| Some((breakdown, breakdown.total()?)))
            .ok_or_else(|| ReceiptError::invalid(ValidationError::PointsOverflow))?;
        debug!(
            retailer = %receipt.retailer,
            items = receipt.items.len(),
            ?breakdown,
            "Scored receipt"
        );

        let id = self.store.put(points);
        info!(id = %id, points, "Receipt processed");
        Ok(id)
    }

    /// Points for a previously processed receipt.
    ///
    /// Surrounding whitespace in `id_text` is ignored. Syntax checks run
    /// before the store is consulted.
    pub fn lookup(&self, id_text: &str) -> ServiceResult<u64> {
        let id = id_text.trim();

        if id.is_empty() {
            return Err(ServiceError::EmptyId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ServiceError::InvalidId(id.to_string()));
        }

        self.store
            .get(id)
            .ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_store::InMemoryScoreStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TARGET: &[u8] = br#"{
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
            {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
            {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
            {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
            {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
        ],
        "total": "35.35"
    }"#;

    /// Store that counts every call and remembers nothing.
    #[derive(Default)]
    struct CountingStore {
        puts: AtomicUsize,
        gets: AtomicUsize,
    }

    impl ScoreStore for CountingStore {
        fn put(&self, _points: u64) -> ReceiptId {
            self.puts.fetch_add(1, Ordering::SeqCst);
            ReceiptId::from("counted")
        }

        fn get(&self, _id: &str) -> Option<u64> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            None
        }
    }

    #[test]
    fn test_submit_then_lookup() {
        let service = ReceiptService::new(InMemoryScoreStore::new());

        let id = service.submit(TARGET).unwrap();
        assert_eq!(service.lookup(id.as_str()).unwrap(), 28);
    }

    #[test]
    fn test_lookup_trims_surrounding_whitespace() {
        let service = ReceiptService::new(InMemoryScoreStore::new());
        let id = service.submit(TARGET).unwrap();

        let padded = format!("  {}\t", id);
        assert_eq!(service.lookup(&padded).unwrap(), 28);
    }

    #[test]
    fn test_rejected_submission_never_stores() {
        let service = ReceiptService::new(CountingStore::default());

        let err = service.submit(b"{\"retailer\": \"Target\"").unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(ReceiptError::Malformed(_))));

        let err = service
            .submit(br#"{"retailer":"","purchaseDate":"","purchaseTime":"","items":[],"total":""}"#)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(ReceiptError::Invalid(_))));

        assert_eq!(service.store().puts.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_id_never_reaches_store() {
        let service = ReceiptService::new(CountingStore::default());

        assert_eq!(service.lookup("").unwrap_err(), ServiceError::EmptyId);
        assert_eq!(service.lookup("   \t ").unwrap_err(), ServiceError::EmptyId);
        assert_eq!(service.store().gets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_inner_whitespace_is_invalid() {
        let service = ReceiptService::new(CountingStore::default());

        let err = service.lookup(" abc def ").unwrap_err();
        assert_eq!(err, ServiceError::InvalidId("abc def".to_string()));
        assert_eq!(service.store().gets.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let service = ReceiptService::new(CountingStore::default());

        let err = service.lookup("7fb1377b-b223-49d9-a31a-5a02701dd310").unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(service.store().gets.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_process_validated_receipt() {
        let service = ReceiptService::new(InMemoryScoreStore::new());
        let receipt = parse_receipt(TARGET).unwrap();

        let first = service.process(&receipt).unwrap();
        let second = service.process(&receipt).unwrap();

        assert_ne!(first, second);
        assert_eq!(service.lookup(first.as_str()).unwrap(), 28);
        assert_eq!(service.lookup(second.as_str()).unwrap(), 28);
    }

    #[test]
    fn test_overflowing_receipt_never_stores() {
        use receipt_core::{Money, ReceiptItem};

        let mut receipt = parse_receipt(TARGET).unwrap();
        receipt.items = vec![ReceiptItem::new("abc", Money::from_cents(i64::MAX)); 1100];
        let service = ReceiptService::new(CountingStore::default());

        let err = service.process(&receipt).unwrap_err();
        assert_eq!(
            err,
            ServiceError::Rejected(ReceiptError::invalid(ValidationError::PointsOverflow))
        );
        assert_eq!(service.store().puts.load(Ordering::SeqCst), 0);
    }
}

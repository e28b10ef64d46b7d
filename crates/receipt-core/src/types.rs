//! # Domain Types
//!
//! The validated receipt that the scoring engine consumes.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐       │
//! │  │         Receipt          │  1..n  │       ReceiptItem        │       │
//! │  │  ──────────────────────  │───────►│  ──────────────────────  │       │
//! │  │  retailer                │        │  short_description       │       │
//! │  │  purchased_at (naive)    │        │  price (Money)           │       │
//! │  │  items                   │        └──────────────────────────┘       │
//! │  │  total (Money)           │                                           │
//! │  └──────────────────────────┘                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! A `Receipt` is built once by [`crate::validation`], scored, and dropped.
//! It is never stored: only its points outlive the request.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::money::Money;

// =============================================================================
// Receipt Item
// =============================================================================

/// One line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptItem {
    /// Description exactly as submitted (surrounding whitespace kept).
    pub short_description: String,

    /// Line price.
    pub price: Money,
}

impl ReceiptItem {
    pub fn new(short_description: impl Into<String>, price: Money) -> Self {
        ReceiptItem {
            short_description: short_description.into(),
            price,
        }
    }

    /// Character count of the description after trimming whitespace.
    pub fn trimmed_description_len(&self) -> usize {
        self.short_description.trim().chars().count()
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// A validated purchase receipt.
///
/// ## Invariants
/// - `items` is non-empty
/// - `total` is NOT checked against the sum of item prices
/// - `purchased_at` is local wall-clock time with no timezone attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub retailer: String,
    pub purchased_at: NaiveDateTime,
    pub items: Vec<ReceiptItem>,
    pub total: Money,
}

impl Receipt {
    pub fn new(
        retailer: impl Into<String>,
        purchased_at: NaiveDateTime,
        items: Vec<ReceiptItem>,
        total: Money,
    ) -> Self {
        Receipt {
            retailer: retailer.into(),
            purchased_at,
            items,
            total,
        }
    }

    /// Purchase date.
    #[inline]
    pub fn purchase_date(&self) -> NaiveDate {
        self.purchased_at.date()
    }

    /// Purchase time-of-day.
    #[inline]
    pub fn purchase_time(&self) -> NaiveTime {
        self.purchased_at.time()
    }

    /// Day of month (1-31).
    #[inline]
    pub fn purchase_day(&self) -> u32 {
        self.purchased_at.day()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_description_len() {
        let item = ReceiptItem::new("   Klarbrunn 12-PK 12 FL OZ  ", Money::from_cents(1200));
        assert_eq!(item.trimmed_description_len(), 24);

        let blank = ReceiptItem::new("   ", Money::from_cents(0));
        assert_eq!(blank.trimmed_description_len(), 0);
    }

    #[test]
    fn test_purchase_accessors() {
        let at = NaiveDate::from_ymd_opt(2022, 3, 20)
            .unwrap()
            .and_hms_opt(14, 33, 0)
            .unwrap();
        let receipt = Receipt::new("Target", at, vec![], Money::from_cents(0));

        assert_eq!(receipt.purchase_day(), 20);
        assert_eq!(receipt.purchase_date(), NaiveDate::from_ymd_opt(2022, 3, 20).unwrap());
        assert_eq!(receipt.purchase_time(), NaiveTime::from_hms_opt(14, 33, 0).unwrap());
    }
}

//! # Scoring Module
//!
//! Computes the points awarded for a validated [`Receipt`].
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Points Rules (additive)                         │
//! │                                                                         │
//! │  1. +1   per alphanumeric character in the retailer name               │
//! │  2. +50  if the total is a round dollar amount                         │
//! │  3. +25  if the total is a multiple of 0.25                            │
//! │  4. +5   for every two items                                           │
//! │  5. +ceil(price × 0.2) for each item whose trimmed description length  │
//! │          is a multiple of 3 (zero counts)                              │
//! │  6. +6   if the purchase day is odd                                    │
//! │  7. +10  if the purchase time is after 14:00 and before 16:00          │
//! │          (both ends exclusive)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule is a pure function of the receipt. Money rules run on integer
//! cents, so no bonus depends on floating-point rounding.
//!
//! Points are never capped. A receipt whose points do not fit in `u64`
//! (thousands of items priced near the i64 cent limit) scores `None`;
//! [`crate::validation`] rejects such receipts before they reach a caller.
//!
//! ## Example
//! ```rust
//! use receipt_core::scoring::calculate_points;
//! use receipt_core::validation::parse_receipt;
//!
//! let receipt = parse_receipt(br#"{
//!     "retailer": "M&M Corner Market",
//!     "purchaseDate": "2022-03-20",
//!     "purchaseTime": "14:33",
//!     "items": [
//!         {"shortDescription": "Gatorade", "price": "2.25"},
//!         {"shortDescription": "Gatorade", "price": "2.25"},
//!         {"shortDescription": "Gatorade", "price": "2.25"},
//!         {"shortDescription": "Gatorade", "price": "2.25"}
//!     ],
//!     "total": "9.00"
//! }"#).unwrap();
//!
//! assert_eq!(calculate_points(&receipt), Some(109));
//! ```

use chrono::{NaiveTime, Timelike};

use crate::money::Money;
use crate::types::{Receipt, ReceiptItem};

// =============================================================================
// Rule Constants
// =============================================================================

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const DESCRIPTION_LENGTH_MULTIPLE: usize = 3;
const DESCRIPTION_PRICE_PERCENT: u32 = 20;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

/// Exclusive bounds of the afternoon bonus window, in seconds from midnight.
const AFTERNOON_START_SECS: u32 = 14 * 60 * 60;
const AFTERNOON_END_SECS: u32 = 16 * 60 * 60;

// =============================================================================
// Points Breakdown
// =============================================================================

/// Points earned by each rule for one receipt.
///
/// ## Why a Breakdown?
/// The total alone says nothing when a client disputes a score. The API logs
/// this at debug level on every submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub retailer_name: u64,
    pub round_dollar: u64,
    pub quarter_multiple: u64,
    pub item_pairs: u64,
    pub item_descriptions: u64,
    pub odd_day: u64,
    pub afternoon: u64,
}

impl PointsBreakdown {
    /// Sum of every rule, or `None` if it does not fit in `u64`.
    pub fn total(&self) -> Option<u64> {
        [
            self.round_dollar,
            self.quarter_multiple,
            self.item_pairs,
            self.item_descriptions,
            self.odd_day,
            self.afternoon,
        ]
        .into_iter()
        .try_fold(self.retailer_name, u64::checked_add)
    }
}

/// Scores a receipt rule by rule.
///
/// ## Returns
/// `None` when a rule or the overall sum overflows `u64`.
pub fn points_breakdown(receipt: &Receipt) -> Option<PointsBreakdown> {
    let breakdown = PointsBreakdown {
        retailer_name: count_alphanumeric(&receipt.retailer),
        round_dollar: bonus_if(is_round_dollar(receipt.total), ROUND_DOLLAR_POINTS),
        quarter_multiple: bonus_if(is_quarter_multiple(receipt.total), QUARTER_MULTIPLE_POINTS),
        item_pairs: ITEM_PAIR_POINTS.checked_mul(count_item_pairs(&receipt.items))?,
        item_descriptions: receipt
            .items
            .iter()
            .try_fold(0u64, |acc, item| acc.checked_add(description_points(item)))?,
        odd_day: bonus_if(receipt.purchase_day() % 2 == 1, ODD_DAY_POINTS),
        afternoon: bonus_if(is_afternoon(receipt.purchase_time()), AFTERNOON_POINTS),
    };

    breakdown.total().map(|_| breakdown)
}

/// Total points for a receipt.
///
/// Deterministic and side-effect free: the same receipt always scores the
/// same. `None` only for receipts whose points overflow `u64`, which
/// validation never produces.
pub fn calculate_points(receipt: &Receipt) -> Option<u64> {
    points_breakdown(receipt)?.total()
}

impl Receipt {
    /// Shorthand for [`calculate_points`].
    pub fn points(&self) -> Option<u64> {
        calculate_points(self)
    }
}

// =============================================================================
// Individual Rules
// =============================================================================

#[inline]
fn bonus_if(condition: bool, points: u64) -> u64 {
    if condition {
        points
    } else {
        0
    }
}

/// Rule 1: letters and digits only.
fn count_alphanumeric(s: &str) -> u64 {
    s.chars().filter(|c| c.is_alphanumeric()).count() as u64
}

/// Rule 2.
fn is_round_dollar(total: Money) -> bool {
    total.is_whole_dollars()
}

/// Rule 3.
fn is_quarter_multiple(total: Money) -> bool {
    total.is_multiple_of(Money::QUARTER)
}

/// Rule 4: a trailing unpaired item earns nothing.
fn count_item_pairs(items: &[ReceiptItem]) -> u64 {
    (items.len() / 2) as u64
}

/// Rule 5: an all-whitespace description trims to length 0, which counts.
fn description_points(item: &ReceiptItem) -> u64 {
    if item.trimmed_description_len() % DESCRIPTION_LENGTH_MULTIPLE != 0 {
        return 0;
    }
    // Never negative: a hand-built receipt could carry a negative price
    item.price
        .percent_of_dollars_ceil(DESCRIPTION_PRICE_PERCENT)
        .max(0) as u64
}

/// Rule 7: strictly between 14:00 and 16:00.
fn is_afternoon(time: NaiveTime) -> bool {
    let secs = time.num_seconds_from_midnight();
    secs > AFTERNOON_START_SECS && secs < AFTERNOON_END_SECS
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(date: &str, time: &str) -> chrono::NaiveDateTime {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let time = NaiveTime::parse_from_str(time, "%H:%M").unwrap();
        date.and_time(time)
    }

    fn item(description: &str, cents: i64) -> ReceiptItem {
        ReceiptItem::new(description, Money::from_cents(cents))
    }

    fn target_receipt() -> Receipt {
        Receipt::new(
            "Target",
            at("2022-01-01", "13:01"),
            vec![
                item("Mountain Dew 12PK", 649),
                item("Emils Cheese Pizza", 1225),
                item("Knorr Creamy Chicken", 126),
                item("Doritos Nacho Cheese", 335),
                item("   Klarbrunn 12-PK 12 FL OZ  ", 1200),
            ],
            Money::from_cents(3535),
        )
    }

    #[test]
    fn test_target_receipt_scores_28() {
        let receipt = target_receipt();
        assert_eq!(calculate_points(&receipt), Some(28));

        let breakdown = points_breakdown(&receipt).unwrap();
        assert_eq!(breakdown.retailer_name, 6);
        assert_eq!(breakdown.round_dollar, 0);
        assert_eq!(breakdown.quarter_multiple, 0);
        assert_eq!(breakdown.item_pairs, 10);
        assert_eq!(breakdown.item_descriptions, 6);
        assert_eq!(breakdown.odd_day, 6);
        assert_eq!(breakdown.afternoon, 0);
    }

    #[test]
    fn test_corner_market_receipt_scores_109() {
        let receipt = Receipt::new(
            "M&M Corner Market",
            at("2022-03-20", "14:33"),
            vec![item("Gatorade", 225); 4],
            Money::from_cents(900),
        );
        assert_eq!(receipt.points(), Some(109));
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let receipt = target_receipt();
        assert_eq!(calculate_points(&receipt), calculate_points(&receipt));
    }

    #[test]
    fn test_breakdown_total_matches_points() {
        let receipt = target_receipt();
        assert_eq!(points_breakdown(&receipt).unwrap().total(), receipt.points());
    }

    #[test]
    fn test_count_alphanumeric() {
        assert_eq!(count_alphanumeric("M&M Corner Market"), 14);
        assert_eq!(count_alphanumeric(""), 0);
        assert_eq!(count_alphanumeric("  - & "), 0);
    }

    #[test]
    fn test_round_dollar() {
        assert!(is_round_dollar(Money::from_cents(0)));
        assert!(!is_round_dollar(Money::from_cents(1)));
        assert!(!is_round_dollar(Money::from_cents(99)));
        assert!(is_round_dollar(Money::from_cents(100)));
    }

    #[test]
    fn test_quarter_multiple() {
        assert!(is_quarter_multiple(Money::from_cents(0)));
        assert!(is_quarter_multiple(Money::from_cents(575)));
        assert!(!is_quarter_multiple(Money::from_cents(2501)));
    }

    #[test]
    fn test_count_item_pairs() {
        assert_eq!(count_item_pairs(&[item("a", 0), item("b", 0)]), 1);
        assert_eq!(count_item_pairs(&[item("a", 0)]), 0);
        assert_eq!(count_item_pairs(&[]), 0);
        assert_eq!(count_item_pairs(&vec![item("a", 0); 5]), 2);
    }

    #[test]
    fn test_description_points() {
        // 18 chars, $12.25 × 0.2 = 2.45 → 3
        assert_eq!(description_points(&item("Emils Cheese Pizza", 1225)), 3);
        // 24 chars after trim, $12.00 × 0.2 = 2.4 → 3
        assert_eq!(description_points(&item("   Klarbrunn 12-PK 12 FL OZ  ", 1200)), 3);
        // 4 chars: no bonus
        assert_eq!(description_points(&item("abcd", 1000)), 0);
        // empty after trim counts as a multiple of three
        assert_eq!(description_points(&item("   ", 1000)), 2);
        // exact product is not bumped
        assert_eq!(description_points(&item("abc", 500)), 1);
    }

    #[test]
    fn test_odd_day() {
        let mut receipt = target_receipt();
        assert_eq!(points_breakdown(&receipt).unwrap().odd_day, 6);

        receipt.purchased_at = at("2024-01-02", "13:01");
        assert_eq!(points_breakdown(&receipt).unwrap().odd_day, 0);
    }

    #[test]
    fn test_afternoon_boundaries() {
        let time = |s: &str| NaiveTime::parse_from_str(s, "%H:%M").unwrap();

        assert!(!is_afternoon(time("14:00")));
        assert!(is_afternoon(time("14:01")));
        assert!(is_afternoon(time("15:59")));
        assert!(!is_afternoon(time("16:00")));
    }

    #[test]
    fn test_zero_total_single_item() {
        let receipt = Receipt::new(
            "A",
            at("2024-12-30", "08:00"),
            vec![item("ab", 0)],
            Money::from_cents(0),
        );
        // 1 (retailer) + 50 (round) + 25 (quarter)
        assert_eq!(receipt.points(), Some(76));
    }

    #[test]
    fn test_largest_single_item_still_scores() {
        // 3-char description at i64::MAX cents: ceil(92233720368547758.07 × 0.2)
        let receipt = Receipt::new(
            "A",
            at("2024-12-30", "08:00"),
            vec![item("abc", i64::MAX)],
            Money::from_cents(100),
        );
        assert_eq!(description_points(&receipt.items[0]), 18_446_744_073_709_552);
        assert_eq!(receipt.points(), Some(1 + 50 + 25 + 18_446_744_073_709_552));
    }

    #[test]
    fn test_item_description_overflow_scores_none() {
        let receipt = Receipt::new(
            "A",
            at("2024-12-30", "08:00"),
            vec![item("abc", i64::MAX); 1100],
            Money::from_cents(100),
        );
        assert_eq!(points_breakdown(&receipt), None);
        assert_eq!(calculate_points(&receipt), None);
    }

    #[test]
    fn test_total_overflow_is_none() {
        let breakdown = PointsBreakdown {
            retailer_name: 1,
            item_descriptions: u64::MAX,
            ..PointsBreakdown::default()
        };
        assert_eq!(breakdown.total(), None);

        let breakdown = PointsBreakdown {
            item_descriptions: u64::MAX,
            ..PointsBreakdown::default()
        };
        assert_eq!(breakdown.total(), Some(u64::MAX));
    }
}

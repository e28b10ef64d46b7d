//! # Money Module
//!
//! Provides the `Money` type for receipt prices and totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  As binary floats:                                                      │
//! │    12.25 * 0.2 = 2.4500000000000002                                     │
//! │    0.15 * 4 / 4 != 0.15 for some inputs                                 │
//! │                                                                         │
//! │  Scoring asks exact questions ("is this a multiple of 0.25?",           │
//! │  "round up price * 0.2"), so any representation error flips a bonus.   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "12.25" → 1225 cents                                                 │
//! │    multiple of 0.25  ⇔  cents % 25 == 0                                 │
//! │    ceil(price * 0.2) ⇔  ceil(cents * 20 / 10000)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use receipt_core::money::Money;
//!
//! let total: Money = "35.35".parse().unwrap();
//! assert_eq!(total.cents(), 3535);
//! assert!(!total.is_whole_dollars());
//! assert!(!total.is_multiple_of(Money::QUARTER));
//! ```

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in cents.
///
/// ## Where Money is Used
/// ```text
/// "price": "12.25" ──► ReceiptItem.price ──► item description bonus
/// "total": "35.35" ──► Receipt.total ─────┬─► round dollar bonus
///                                         └─► quarter multiple bonus
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Twenty-five cents.
    pub const QUARTER: Money = Money(25);

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// True when the amount has no cents.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// assert!(Money::from_cents(900).is_whole_dollars());
    /// assert!(!Money::from_cents(901).is_whole_dollars());
    /// ```
    #[inline]
    pub const fn is_whole_dollars(&self) -> bool {
        self.cents_part() == 0
    }

    /// True when the amount is an exact multiple of `unit`.
    ///
    /// A zero unit only divides zero.
    #[inline]
    pub const fn is_multiple_of(&self, unit: Money) -> bool {
        if unit.0 == 0 {
            return self.0 == 0;
        }
        self.0 % unit.0 == 0
    }

    /// Takes `percent`% of the amount, in dollars, rounded up to the next
    /// whole number.
    ///
    /// ## Implementation
    /// `ceil(cents * percent / 10000)` in i128, so there is no intermediate
    /// float and no overflow for any i64 amount.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    ///
    /// // $12.25 × 20% = $2.45 → 3
    /// assert_eq!(Money::from_cents(1225).percent_of_dollars_ceil(20), 3);
    /// // $12.00 × 20% = $2.40 → 3
    /// assert_eq!(Money::from_cents(1200).percent_of_dollars_ceil(20), 3);
    /// // $10.00 × 20% = $2.00 → 2 (already whole, not bumped)
    /// assert_eq!(Money::from_cents(1000).percent_of_dollars_ceil(20), 2);
    /// ```
    pub fn percent_of_dollars_ceil(&self, percent: u32) -> i64 {
        let numerator = self.0 as i128 * percent as i128;
        let denominator: i128 = 100 * 100;
        // Ceiling division that is also correct for negative amounts
        let ceil = -((-numerator).div_euclid(denominator));
        ceil as i64
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Why an amount string could not become Money.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMoneyError {
    /// Not `<digits>.<two digits>`.
    #[error("expected <digits>.<two digits>, got '{0}'")]
    InvalidFormat(String),

    /// Too many dollars to count in i64 cents.
    #[error("amount '{0}' is too large")]
    Overflow(String),
}

/// Parses receipt amount text such as `"6.49"` or `"0.00"`.
///
/// Only non-negative amounts with exactly two fractional digits are accepted.
impl FromStr for Money {
    type Err = ParseMoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseMoneyError::InvalidFormat(s.to_string());

        let (whole, fraction) = s.split_once('.').ok_or_else(invalid)?;
        if whole.is_empty()
            || fraction.len() != 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let overflow = || ParseMoneyError::Overflow(s.to_string());
        let dollars: i64 = whole.parse().map_err(|_| overflow())?;
        let cents: i64 = fraction.parse().map_err(|_| invalid())?;

        dollars
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .map(Money)
            .ok_or_else(overflow)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$D.CC` (used in logs).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("6.49".parse::<Money>().unwrap().cents(), 649);
        assert_eq!("0.00".parse::<Money>().unwrap().cents(), 0);
        assert_eq!("012.00".parse::<Money>().unwrap().cents(), 1200);
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for bad in ["", "1", "1.", ".50", "1.5", "1.500", "-1.00", "+1.00", "1,00", "1.0a", " 1.00"] {
            assert!(
                matches!(bad.parse::<Money>(), Err(ParseMoneyError::InvalidFormat(_))),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_parse_overflow() {
        let huge = "99999999999999999999.00";
        assert!(matches!(
            huge.parse::<Money>(),
            Err(ParseMoneyError::Overflow(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_whole_dollars() {
        assert!(Money::from_cents(0).is_whole_dollars());
        assert!(Money::from_cents(100).is_whole_dollars());
        assert!(!Money::from_cents(1).is_whole_dollars());
        assert!(!Money::from_cents(99).is_whole_dollars());
    }

    #[test]
    fn test_multiple_of_quarter() {
        assert!(Money::from_cents(0).is_multiple_of(Money::QUARTER));
        assert!(Money::from_cents(575).is_multiple_of(Money::QUARTER));
        assert!(!Money::from_cents(2501).is_multiple_of(Money::QUARTER));
        assert!(Money::from_cents(0).is_multiple_of(Money::from_cents(0)));
        assert!(!Money::from_cents(5).is_multiple_of(Money::from_cents(0)));
    }

    #[test]
    fn test_percent_of_dollars_ceil() {
        assert_eq!(Money::from_cents(0).percent_of_dollars_ceil(20), 0);
        assert_eq!(Money::from_cents(1).percent_of_dollars_ceil(20), 1);
        assert_eq!(Money::from_cents(500).percent_of_dollars_ceil(20), 1);
        assert_eq!(Money::from_cents(501).percent_of_dollars_ceil(20), 2);
        assert_eq!(Money::from_cents(-501).percent_of_dollars_ceil(20), -1);
    }
}

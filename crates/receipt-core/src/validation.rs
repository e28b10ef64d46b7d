//! # Validation Module
//!
//! Turns an untrusted receipt submission into a [`Receipt`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Decode (serde)                                               │
//! │  ├── JSON syntax, value types                                          │
//! │  ├── deny_unknown_fields on receipt AND items                          │
//! │  └── Failure → ReceiptError::Malformed                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Field rules (THIS MODULE)                                    │
//! │  ├── Every field checked, every violation collected                    │
//! │  └── Failure → ReceiptError::Invalid(violations)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Conversion                                                   │
//! │  ├── date + time → NaiveDateTime, amounts → Money                      │
//! │  ├── points must fit in u64 (PointsOverflow)                           │
//! │  └── Failure → still ReceiptError::Invalid (never an internal error)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Field Rules
//! | Field              | Rule                                                  |
//! |--------------------|-------------------------------------------------------|
//! | `retailer`         | letters, digits, whitespace, `-`, `&` (one or more)   |
//! | `purchaseDate`     | `YYYY-MM-DD`, real calendar date                      |
//! | `purchaseTime`     | `HH:MM`, 24-hour                                      |
//! | `items`            | at least one                                          |
//! | `shortDescription` | letters, digits, whitespace, `-` (no `&`)             |
//! | `price`, `total`   | `<digits>.<two digits>` (no sign)                     |
//!
//! ## Usage
//! ```rust
//! use receipt_core::validation::parse_receipt;
//!
//! let body = br#"{
//!     "retailer": "Target",
//!     "purchaseDate": "2022-01-01",
//!     "purchaseTime": "13:01",
//!     "items": [{"shortDescription": "Mountain Dew 12PK", "price": "6.49"}],
//!     "total": "6.49"
//! }"#;
//! let receipt = parse_receipt(body).unwrap();
//! assert_eq!(receipt.total.cents(), 649);
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ReceiptError, ReceiptResult, ValidationError};
use crate::money::{Money, ParseMoneyError};
use crate::scoring::calculate_points;
use crate::types::{Receipt, ReceiptItem};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Patterns
// =============================================================================
// `(?-u)` keeps the classes ASCII-only: `\s` is [\t\n\v\f\r ] and `\d` is [0-9].

static RETAILER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)^[A-Za-z0-9\s&-]+$").expect("retailer pattern"));

static DESCRIPTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)^[A-Za-z0-9\s-]+$").expect("description pattern"));

static AMOUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)^\d+\.\d{2}$").expect("amount pattern"));

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)^\d{4}-\d{2}-\d{2}$").expect("date pattern"));

static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)^\d{2}:\d{2}$").expect("time pattern"));

const RETAILER_EXPECTED: &str =
    "contain only alphanumeric characters, spaces, hyphens, and ampersands";
const DESCRIPTION_EXPECTED: &str = "contain only alphanumeric characters, spaces, and hyphens";
const AMOUNT_EXPECTED: &str = "be a decimal number with two decimal places";

// =============================================================================
// Inbound Payload
// =============================================================================

/// One item exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ItemPayload {
    pub short_description: Option<String>,
    pub price: Option<String>,
}

/// A receipt exactly as submitted.
///
/// ## Why `Option<String>` Everywhere?
/// A missing field must be reported as "X is required" alongside every other
/// violation, not abort decoding. Only shape problems (bad JSON, a number
/// where a string belongs, unknown keys) fail at decode time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReceiptPayload {
    pub retailer: Option<String>,
    pub purchase_date: Option<String>,
    pub purchase_time: Option<String>,
    pub items: Option<Vec<ItemPayload>>,
    pub total: Option<String>,
}

impl ReceiptPayload {
    /// Decodes a request body.
    ///
    /// ## Errors
    /// `ReceiptError::Malformed` for an empty body, invalid JSON, wrong value
    /// types, or any field outside the receipt schema.
    pub fn from_json(body: &[u8]) -> ReceiptResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ReceiptError::Malformed(
                "missing request body; provide a JSON object representing a receipt".to_string(),
            ));
        }

        let value: Value =
            serde_json::from_slice(body).map_err(|e| ReceiptError::Malformed(e.to_string()))?;
        ensure_object_shape(&value)?;
        serde_json::from_value(value).map_err(|e| ReceiptError::Malformed(e.to_string()))
    }

    /// Runs every field rule and returns all violations found.
    pub fn violations(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        collect(&mut errors, validate_retailer(self.retailer.as_deref()));
        collect(&mut errors, validate_purchase_date(self.purchase_date.as_deref()));
        collect(&mut errors, validate_purchase_time(self.purchase_time.as_deref()));

        match self.items.as_deref() {
            None | Some([]) => errors.push(ValidationError::NoItems),
            Some(items) => {
                for (position, item) in items.iter().enumerate() {
                    errors.extend(
                        item.violations()
                            .into_iter()
                            .map(|e| e.in_item(position)),
                    );
                }
            }
        }

        collect(&mut errors, validate_amount("total", self.total.as_deref()));

        errors
    }

    /// Succeeds only when no rule is violated.
    pub fn validate(&self) -> ReceiptResult<()> {
        let errors = self.violations();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ReceiptError::Invalid(errors))
        }
    }

    /// Validates, then converts into a [`Receipt`].
    ///
    /// The returned receipt always scores: one whose points would overflow
    /// `u64` is rejected with [`ValidationError::PointsOverflow`].
    pub fn into_receipt(self) -> ReceiptResult<Receipt> {
        self.validate()?;

        let date = validate_purchase_date(self.purchase_date.as_deref())
            .map_err(ReceiptError::invalid)?;
        let time = validate_purchase_time(self.purchase_time.as_deref())
            .map_err(ReceiptError::invalid)?;

        let items = self
            .items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(position, item)| {
                item.to_item()
                    .map_err(|e| ReceiptError::invalid(e.in_item(position)))
            })
            .collect::<ReceiptResult<Vec<_>>>()?;

        let total =
            validate_amount("total", self.total.as_deref()).map_err(ReceiptError::invalid)?;
        let retailer = validate_retailer(self.retailer.as_deref())
            .map_err(ReceiptError::invalid)?
            .to_string();

        let receipt = Receipt::new(retailer, NaiveDateTime::new(date, time), items, total);
        if calculate_points(&receipt).is_none() {
            return Err(ReceiptError::invalid(ValidationError::PointsOverflow));
        }
        Ok(receipt)
    }
}

impl ItemPayload {
    /// Runs both item rules and returns all violations found.
    pub fn violations(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        collect(
            &mut errors,
            validate_short_description(self.short_description.as_deref()),
        );
        collect(&mut errors, validate_amount("price", self.price.as_deref()));
        errors
    }

    /// Converts into a [`ReceiptItem`], failing on the first bad field.
    pub fn to_item(&self) -> ValidationResult<ReceiptItem> {
        let description = validate_short_description(self.short_description.as_deref())?;
        let price = validate_amount("price", self.price.as_deref())?;
        Ok(ReceiptItem::new(description, price))
    }
}

/// Decodes, validates and converts a request body in one call.
///
/// ## Flow
/// ```text
/// body ──► from_json ──► violations() ──► into_receipt ──► Receipt
///              │               │
///              ▼               ▼
///          Malformed        Invalid
/// ```
pub fn parse_receipt(body: &[u8]) -> ReceiptResult<Receipt> {
    ReceiptPayload::from_json(body)?.into_receipt()
}

/// serde accepts a JSON array for a struct; a receipt and its items must be objects.
fn ensure_object_shape(value: &Value) -> ReceiptResult<()> {
    let object = value
        .as_object()
        .ok_or_else(|| ReceiptError::Malformed("expected a JSON object".to_string()))?;

    if let Some(Value::Array(items)) = object.get("items") {
        if let Some(position) = items.iter().position(|item| !item.is_object()) {
            return Err(ReceiptError::Malformed(format!(
                "item {} must be a JSON object",
                position + 1
            )));
        }
    }
    Ok(())
}

fn collect<T>(errors: &mut Vec<ValidationError>, result: ValidationResult<T>) {
    if let Err(e) = result {
        errors.push(e);
    }
}

// =============================================================================
// Field Validators
// =============================================================================

fn required<'a>(field: &'static str, value: Option<&'a str>) -> ValidationResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Required { field }),
    }
}

/// Validates a retailer name.
///
/// ## Example
/// ```rust
/// use receipt_core::validation::validate_retailer;
///
/// assert!(validate_retailer(Some("M&M Corner Market")).is_ok());
/// assert!(validate_retailer(Some("Target!")).is_err());
/// assert!(validate_retailer(None).is_err());
/// ```
pub fn validate_retailer(value: Option<&str>) -> ValidationResult<&str> {
    let retailer = required("retailer", value)?;
    if !RETAILER_PATTERN.is_match(retailer) {
        return Err(ValidationError::InvalidFormat {
            field: "retailer",
            expected: RETAILER_EXPECTED,
        });
    }
    Ok(retailer)
}

/// Validates an item description.
///
/// Unlike the retailer, `&` is not allowed here.
pub fn validate_short_description(value: Option<&str>) -> ValidationResult<&str> {
    let description = required("short description", value)?;
    if !DESCRIPTION_PATTERN.is_match(description) {
        return Err(ValidationError::InvalidFormat {
            field: "short description",
            expected: DESCRIPTION_EXPECTED,
        });
    }
    Ok(description)
}

/// Validates a price or total and converts it to [`Money`].
///
/// ## Rules
/// - Required
/// - `<digits>.<two digits>`: a leading `-` or any other number of decimal
///   places fails the pattern
/// - Must fit in i64 cents
///
/// ## Example
/// ```rust
/// use receipt_core::validation::validate_amount;
///
/// assert_eq!(validate_amount("price", Some("6.49")).unwrap().cents(), 649);
/// assert!(validate_amount("price", Some("-6.49")).is_err());
/// assert!(validate_amount("price", Some("6.4")).is_err());
/// assert!(validate_amount("price", Some("6.490")).is_err());
/// ```
pub fn validate_amount(field: &'static str, value: Option<&str>) -> ValidationResult<Money> {
    let amount = required(field, value)?;
    if !AMOUNT_PATTERN.is_match(amount) {
        return Err(ValidationError::InvalidFormat {
            field,
            expected: AMOUNT_EXPECTED,
        });
    }

    amount.parse::<Money>().map_err(|e| match e {
        ParseMoneyError::Overflow(_) => ValidationError::TooLarge { field },
        ParseMoneyError::InvalidFormat(_) => ValidationError::InvalidFormat {
            field,
            expected: AMOUNT_EXPECTED,
        },
    })
}

/// Validates a `YYYY-MM-DD` purchase date.
///
/// ## Example
/// ```rust
/// use receipt_core::validation::validate_purchase_date;
///
/// assert!(validate_purchase_date(Some("2022-01-01")).is_ok());
/// assert!(validate_purchase_date(Some("2022-13-01")).is_err());
/// assert!(validate_purchase_date(Some("2023-02-29")).is_err());
/// ```
pub fn validate_purchase_date(value: Option<&str>) -> ValidationResult<NaiveDate> {
    let date = required("purchase date", value)?;
    let invalid = || ValidationError::InvalidDate {
        value: date.to_string(),
    };

    if !DATE_PATTERN.is_match(date) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| invalid())
}

/// Validates a 24-hour `HH:MM` purchase time.
pub fn validate_purchase_time(value: Option<&str>) -> ValidationResult<NaiveTime> {
    let time = required("purchase time", value)?;
    let invalid = || ValidationError::InvalidTime {
        value: time.to_string(),
    };

    if !TIME_PATTERN.is_match(time) {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| invalid())
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Receipt Identifiers
//!
//! Opaque handles returned from a submission and used to look up points.
//!
//! Generated identifiers are UUID v4 strings (`8-4-4-4-12` hex). Lookups
//! accept any string though: an unknown identifier is simply not found.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

/// Identifier of a scored receipt.
///
/// Serializes as a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    /// Fresh random identifier.
    pub fn generate() -> Self {
        ReceiptId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for ReceiptId {
    fn from(value: String) -> Self {
        ReceiptId(value)
    }
}

impl From<&str> for ReceiptId {
    fn from(value: &str) -> Self {
        ReceiptId(value.to_string())
    }
}

impl AsRef<str> for ReceiptId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_id_is_uuid_v4() {
        let id = ReceiptId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id.as_str().len(), 36);
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(ReceiptId::generate(), ReceiptId::generate());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ReceiptId::from("abc-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
        assert_eq!(id.to_string(), "abc-123");
    }
}

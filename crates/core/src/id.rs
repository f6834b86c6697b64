//! Strongly-typed stock identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stock row.
///
/// Assigned by storage on insert and never changed afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockId(i64);

impl StockId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for StockId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for StockId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<StockId> for i64 {
    fn from(value: StockId) -> Self {
        value.0
    }
}

impl FromStr for StockId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .parse::<i64>()
            .map_err(|e| DomainError::invalid_id(format!("StockId: {e}")))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_plain_integer() {
        assert_eq!("42".parse::<StockId>().unwrap(), StockId::new(42));
    }

    #[test]
    fn rejects_non_numeric_input() {
        let err = "abc".parse::<StockId>().unwrap_err();
        match err {
            DomainError::InvalidId(msg) => assert!(msg.starts_with("StockId")),
            _ => panic!("Expected InvalidId error"),
        }
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        // "/api/stocks/%201" decodes to " 1".
        assert!(" 1".parse::<StockId>().is_err());
        assert!("1 ".parse::<StockId>().is_err());
        assert!("".parse::<StockId>().is_err());
    }

    #[test]
    fn rejects_fractional_input() {
        assert!("1.5".parse::<StockId>().is_err());
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&StockId::new(7)).unwrap();
        assert_eq!(json, "7");
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(n in any::<i64>()) {
            let id = StockId::new(n);
            prop_assert_eq!(id.to_string().parse::<StockId>().unwrap(), id);
        }
    }
}

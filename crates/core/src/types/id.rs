//! Product identifiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when an ID cannot be parsed from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid id '{input}': expected an integer")]
pub struct IdParseError {
    /// The rejected input.
    pub input: String,
}

/// Catalog product id, as assigned by the remote catalog.
///
/// Serialized as a bare integer. Parsed from URL path segments and
/// command-line arguments with [`FromStr`], which tolerates surrounding
/// whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i32);

impl ProductId {
    /// Create an id from its numeric value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// The numeric value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward so width and alignment flags apply
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(Self).map_err(|_| IdParseError {
            input: s.to_string(),
        })
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i32 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_parse() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert_eq!(" 7 ".parse::<ProductId>().unwrap(), ProductId::new(7));
    }

    #[test]
    fn test_product_id_parse_rejects_text() {
        let err = "abc".parse::<ProductId>().unwrap_err();
        assert_eq!(err.input, "abc");
        assert_eq!(err.to_string(), "invalid id 'abc': expected an integer");
    }

    #[test]
    fn test_product_id_serde_transparent() {
        let json = serde_json::to_string(&ProductId::new(3)).unwrap();
        assert_eq!(json, "3");
        let id: ProductId = serde_json::from_str("3").unwrap();
        assert_eq!(i32::from(id), 3);
    }

    #[test]
    fn test_product_id_display_honours_width() {
        assert_eq!(format!("{:>4}", ProductId::new(3)), "   3");
        assert_eq!(ProductId::from(12).as_i32(), 12);
    }
}

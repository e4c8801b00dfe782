//! Canonical type system.
//!
//! ink! and Solidity both have rich type systems, but the dashboard filter
//! layer only needs four coarse categories. Every source type maps to exactly
//! one of them; anything structured or unknown degrades to `String`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ABILens' canonical argument type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalType {
    /// Any signed or unsigned integer width.
    Integer,
    /// `f32` / `f64`
    Float,
    /// Text, addresses, byte strings, and every structured or unmapped type.
    #[default]
    String,
    Boolean,
}

impl CanonicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalType::Integer => "integer",
            CanonicalType::Float => "float",
            CanonicalType::String => "string",
            CanonicalType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_type_display() {
        assert_eq!(CanonicalType::Integer.to_string(), "integer");
        assert_eq!(CanonicalType::Float.to_string(), "float");
        assert_eq!(CanonicalType::Boolean.to_string(), "boolean");
    }

    #[test]
    fn canonical_type_serde() {
        let json = serde_json::to_string(&CanonicalType::String).unwrap();
        assert_eq!(json, "\"string\"");
        let parsed: CanonicalType = serde_json::from_str("\"integer\"").unwrap();
        assert_eq!(parsed, CanonicalType::Integer);
    }
}

//! ABI shape discrimination.
//!
//! Two structural predicates decide which model a raw JSON document is
//! parsed into. They look at the top-level layout only and never fail.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Item `type` values every EVM JSON ABI may contain.
pub const EVM_ITEM_TYPES: [&str; 5] = ["function", "constructor", "event", "fallback", "receive"];

/// Custom error declarations (Solidity 0.8.4+).
pub const EVM_ERROR_ITEM_TYPE: &str = "error";

/// The format family of an ABI document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiShape {
    /// ink!/Substrate contract metadata with a numeric type table.
    Ink,
    /// Solidity-style JSON ABI array.
    Evm,
    Unrecognized,
}

impl fmt::Display for AbiShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiShape::Ink => write!(f, "ink"),
            AbiShape::Evm => write!(f, "evm"),
            AbiShape::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Structural classifier for raw ABI documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeClassifier {
    /// Whether `{"type": "error"}` items are allowed in an EVM ABI.
    pub accept_error_items: bool,
}

impl Default for ShapeClassifier {
    fn default() -> Self {
        Self {
            accept_error_items: true,
        }
    }
}

impl ShapeClassifier {
    pub fn new(accept_error_items: bool) -> Self {
        Self { accept_error_items }
    }

    /// Classify `raw`. The ink! check runs first.
    pub fn classify(&self, raw: &Value) -> AbiShape {
        if is_ink_abi(raw) {
            AbiShape::Ink
        } else if self.is_evm_abi(raw) {
            AbiShape::Evm
        } else {
            AbiShape::Unrecognized
        }
    }

    /// `raw` is an array whose every item has a known EVM item `type`.
    /// An empty array qualifies.
    pub fn is_evm_abi(&self, raw: &Value) -> bool {
        let Some(items) = raw.as_array() else {
            return false;
        };
        items.iter().all(|item| {
            item.get("type")
                .and_then(Value::as_str)
                .is_some_and(|ty| self.is_evm_item_type(ty))
        })
    }

    fn is_evm_item_type(&self, ty: &str) -> bool {
        EVM_ITEM_TYPES.contains(&ty) || (self.accept_error_items && ty == EVM_ERROR_ITEM_TYPE)
    }
}

/// `raw.spec.events` and `raw.spec.messages` are both arrays.
pub fn is_ink_abi(raw: &Value) -> bool {
    let Some(spec) = raw.get("spec") else {
        return false;
    };
    spec.get("events").is_some_and(Value::is_array)
        && spec.get("messages").is_some_and(Value::is_array)
}

/// Classify with the default classifier (EVM `error` items accepted).
pub fn classify(raw: &Value) -> AbiShape {
    ShapeClassifier::default().classify(raw)
}

//! Normalized extraction output.
//!
//! These are the shapes the dashboard filter configuration consumes; field
//! names match its JSON contract.

use crate::types::CanonicalType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedArg {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: CanonicalType,
}

impl NormalizedArg {
    pub fn new(name: impl Into<String>, ty: CanonicalType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub name: String,
    pub args: Vec<NormalizedArg>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCall {
    pub name: String,
    /// ink!: the metadata selector verbatim. EVM: `0x` + 8 lowercase hex digits.
    pub selector: String,
    pub args: Vec<NormalizedArg>,
}

/// Everything extracted from one ABI document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedAbi {
    pub events: Vec<NormalizedEvent>,
    pub calls: Vec<NormalizedCall>,
}

impl ExtractedAbi {
    pub fn event(&self, name: &str) -> Option<&NormalizedEvent> {
        self.events.iter().find(|e| e.name == name)
    }

    pub fn call(&self, name: &str) -> Option<&NormalizedCall> {
        self.calls.iter().find(|c| c.name == name)
    }
}

// ─── Per-dApp output ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEvents {
    pub name: String,
    pub address: String,
    pub events: Vec<NormalizedEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractCalls {
    pub name: String,
    pub address: String,
    pub calls: Vec<NormalizedCall>,
}

/// `{ "contracts": [{ name, address, events }] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsOutput {
    pub contracts: Vec<ContractEvents>,
}

/// `{ "contracts": [{ name, address, calls }] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallsOutput {
    pub contracts: Vec<ContractCalls>,
}

//! Solidity JSON ABI model.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A parsed EVM JSON ABI (the top-level array).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EvmAbi {
    pub items: Vec<EvmAbiItem>,
}

impl EvmAbi {
    pub fn functions(&self) -> impl Iterator<Item = &EvmFunction> {
        self.items.iter().filter_map(|item| match item {
            EvmAbiItem::Function(f) => Some(f),
            _ => None,
        })
    }

    pub fn events(&self) -> impl Iterator<Item = &EvmEvent> {
        self.items.iter().filter_map(|item| match item {
            EvmAbiItem::Event(e) => Some(e),
            _ => None,
        })
    }
}

/// One entry of the ABI, discriminated by its `type` field.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EvmAbiItem {
    Function(EvmFunction),
    Constructor(EvmConstructor),
    Event(EvmEvent),
    Fallback(EvmSpecial),
    Receive(EvmSpecial),
    Error(EvmCustomError),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvmFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<EvmParam>,
    #[serde(default)]
    pub outputs: Vec<EvmParam>,
    #[serde(
        rename = "stateMutability",
        default,
        deserialize_with = "lenient_mutability",
        skip_serializing_if = "Option::is_none"
    )]
    pub state_mutability: Option<StateMutability>,
    /// Pre-0.5 Solidity ABIs: `true` for read-only functions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,
    /// Pre-0.5 Solidity ABIs: `true` for functions accepting value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
}

impl EvmFunction {
    /// `stateMutability` when present, otherwise derived from the legacy
    /// `constant` / `payable` flags.
    pub fn effective_mutability(&self) -> StateMutability {
        if let Some(m) = self.state_mutability {
            return m;
        }
        match (self.constant, self.payable) {
            (Some(true), _) => StateMutability::View,
            (_, Some(true)) => StateMutability::Payable,
            _ => StateMutability::NonPayable,
        }
    }

    /// Whether calling this function can change contract state.
    pub fn mutates_state(&self) -> bool {
        self.effective_mutability().mutates_state()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvmConstructor {
    #[serde(default)]
    pub inputs: Vec<EvmParam>,
    #[serde(
        rename = "stateMutability",
        default,
        deserialize_with = "lenient_mutability",
        skip_serializing_if = "Option::is_none"
    )]
    pub state_mutability: Option<StateMutability>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvmEvent {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<EvmParam>,
    #[serde(default)]
    pub anonymous: bool,
}

/// `fallback` and `receive` entries.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EvmSpecial {
    #[serde(
        rename = "stateMutability",
        default,
        deserialize_with = "lenient_mutability",
        skip_serializing_if = "Option::is_none"
    )]
    pub state_mutability: Option<StateMutability>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EvmCustomError {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<EvmParam>,
}

/// A function/event/error parameter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EvmParam {
    #[serde(default)]
    pub name: String,
    /// Solidity type string, e.g. `"uint256"`, `"address[]"`, `"tuple"`.
    #[serde(rename = "type")]
    pub ty: String,
    /// Members of a `tuple` type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<EvmParam>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexed: Option<bool>,
    #[serde(rename = "internalType", default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
}

impl EvmParam {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            components: Vec::new(),
            indexed: None,
            internal_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

impl StateMutability {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pure" => Some(StateMutability::Pure),
            "view" => Some(StateMutability::View),
            "nonpayable" => Some(StateMutability::NonPayable),
            "payable" => Some(StateMutability::Payable),
            _ => None,
        }
    }

    pub fn mutates_state(&self) -> bool {
        matches!(self, StateMutability::NonPayable | StateMutability::Payable)
    }
}

/// Unknown `stateMutability` strings read as absent, so the legacy flags
/// (or the non-payable default) decide.
fn lenient_mutability<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<StateMutability>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(StateMutability::parse))
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::NonPayable => "nonpayable",
            StateMutability::Payable => "payable",
        };
        write!(f, "{s}")
    }
}

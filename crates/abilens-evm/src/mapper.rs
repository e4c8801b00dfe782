//! Solidity type string → canonical type.

use abilens_core::types::CanonicalType;

const SOLIDITY_TYPES: &[(&str, CanonicalType)] = &[
    ("uint8", CanonicalType::Integer),
    ("uint16", CanonicalType::Integer),
    ("uint32", CanonicalType::Integer),
    ("uint64", CanonicalType::Integer),
    ("uint128", CanonicalType::Integer),
    ("uint256", CanonicalType::Integer),
    ("int8", CanonicalType::Integer),
    ("int16", CanonicalType::Integer),
    ("int32", CanonicalType::Integer),
    ("int64", CanonicalType::Integer),
    ("int128", CanonicalType::Integer),
    ("int256", CanonicalType::Integer),
    ("bool", CanonicalType::Boolean),
    ("address", CanonicalType::String),
    ("bytes", CanonicalType::String),
    ("string", CanonicalType::String),
];

/// Map a Solidity type string. Anything not in the table (other integer
/// widths, `bytes32`, arrays, tuples, ...) maps to `String`.
pub fn map_evm_type(solidity_type: &str) -> CanonicalType {
    SOLIDITY_TYPES
        .iter()
        .find(|(name, _)| *name == solidity_type)
        .map(|(_, ty)| *ty)
        .unwrap_or(CanonicalType::String)
}

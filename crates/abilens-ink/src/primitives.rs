//! SCALE primitive name → canonical type.

use abilens_core::types::CanonicalType;

const PRIMITIVES: &[(&str, CanonicalType)] = &[
    ("u8", CanonicalType::Integer),
    ("u16", CanonicalType::Integer),
    ("u32", CanonicalType::Integer),
    ("u64", CanonicalType::Integer),
    ("u128", CanonicalType::Integer),
    ("i8", CanonicalType::Integer),
    ("i16", CanonicalType::Integer),
    ("i32", CanonicalType::Integer),
    ("i64", CanonicalType::Integer),
    ("i128", CanonicalType::Integer),
    ("f32", CanonicalType::Float),
    ("f64", CanonicalType::Float),
    ("str", CanonicalType::String),
    ("bool", CanonicalType::Boolean),
];

/// Map a primitive name. Unknown names (`char`, `u256`, ...) map to `String`.
pub fn map_primitive(name: &str) -> CanonicalType {
    PRIMITIVES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, ty)| *ty)
        .unwrap_or(CanonicalType::String)
}

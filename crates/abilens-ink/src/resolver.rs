//! Type table resolution.
//!
//! Only `array` and `sequence` pass their element's type through, so
//! resolution is a walk down a single chain of ids that ends at a primitive
//! or at some other shape, which degrades to `String`. The chain is walked
//! iteratively; the metadata is untrusted, so a repeated id or an overly long
//! chain is an error instead of a hang.

use abilens_core::{
    error::ExtractError,
    ink::{TypeId, TypeShape, TypeTable},
    types::CanonicalType,
};

use crate::primitives::map_primitive;

/// Maximum number of wrapper levels followed by default.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Resolves type-table ids to canonical types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeResolver {
    max_depth: usize,
}

impl Default for TypeResolver {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Resolve `type_id` against `table`.
    ///
    /// # Errors
    /// - `UnknownTypeId` if `type_id`, or any element type on its chain, is
    ///   not in the table
    /// - `CyclicTypeDefinition` if the chain revisits an id
    /// - `TypeDepthExceeded` if the chain has more than `max_depth` wrappers
    pub fn resolve(&self, type_id: TypeId, table: &TypeTable) -> Result<CanonicalType, ExtractError> {
        let mut current = type_id;
        let mut chain: Vec<TypeId> = Vec::new();

        loop {
            let def = table
                .get(current)
                .ok_or(ExtractError::UnknownTypeId { type_id: current })?;

            let element = match def.shape() {
                TypeShape::Primitive(name) => return Ok(map_primitive(name)),
                TypeShape::Array { element, .. } | TypeShape::Sequence { element } => *element,
                TypeShape::Composite { .. }
                | TypeShape::Tuple(_)
                | TypeShape::Variant { .. }
                | TypeShape::Compact { .. }
                | TypeShape::BitSequence(_)
                | TypeShape::Other { .. } => return Ok(CanonicalType::String),
            };

            chain.push(current);
            if chain.contains(&element) {
                return Err(ExtractError::CyclicTypeDefinition { type_id: element });
            }
            if chain.len() > self.max_depth {
                return Err(ExtractError::TypeDepthExceeded {
                    type_id,
                    max_depth: self.max_depth,
                });
            }
            current = element;
        }
    }
}

/// Resolve with the default depth limit.
pub fn resolve(type_id: TypeId, table: &TypeTable) -> Result<CanonicalType, ExtractError> {
    TypeResolver::default().resolve(type_id, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use abilens_core::ink::{Field, TypeDef, Variant};

    fn prim(id: TypeId, name: &str) -> TypeDef {
        TypeDef::new(id, TypeShape::Primitive(name.into()))
    }

    #[test]
    fn array_inherits_element_type() {
        let table = TypeTable::new(vec![
            prim(1, "u32"),
            TypeDef::new(2, TypeShape::Array { len: 3, element: 1 }),
        ]);
        assert_eq!(resolve(2, &table).unwrap(), CanonicalType::Integer);
    }

    #[test]
    fn nested_wrappers_resolve_to_innermost_primitive() {
        let table = TypeTable::new(vec![
            prim(0, "bool"),
            TypeDef::new(1, TypeShape::Sequence { element: 0 }),
            TypeDef::new(2, TypeShape::Array { len: 4, element: 1 }),
            prim(4, "u128"),
            TypeDef::new(5, TypeShape::Sequence { element: 4 }),
        ]);
        assert_eq!(resolve(2, &table).unwrap(), CanonicalType::Boolean);
        assert_eq!(resolve(5, &table).unwrap(), CanonicalType::Integer);
    }

    #[test]
    fn compact_is_not_a_pass_through_wrapper() {
        let table = TypeTable::new(vec![
            prim(0, "u128"),
            TypeDef::new(1, TypeShape::Compact { element: 0 }),
            TypeDef::new(2, TypeShape::Sequence { element: 1 }),
            // Element never visited.
            TypeDef::new(3, TypeShape::Compact { element: 99 }),
        ]);
        assert_eq!(resolve(1, &table).unwrap(), CanonicalType::String);
        assert_eq!(resolve(2, &table).unwrap(), CanonicalType::String);
        assert_eq!(resolve(3, &table).unwrap(), CanonicalType::String);
    }

    #[test]
    fn unmodelled_shapes_degrade_to_string() {
        let table = TypeTable::new(vec![
            TypeDef::new(
                0,
                TypeShape::Other { kind: "phantom".into(), body: serde_json::json!({"type": 1}) },
            ),
            TypeDef::new(1, TypeShape::Sequence { element: 0 }),
        ]);
        assert_eq!(resolve(0, &table).unwrap(), CanonicalType::String);
        assert_eq!(resolve(1, &table).unwrap(), CanonicalType::String);
    }

    #[test]
    fn structured_shapes_degrade_to_string() {
        let table = TypeTable::new(vec![
            prim(0, "u8"),
            TypeDef::new(
                1,
                TypeShape::Composite {
                    fields: vec![Field { name: None, ty: 0, type_name: None }],
                },
            ),
            TypeDef::new(2, TypeShape::Tuple(vec![0, 0])),
            TypeDef::new(
                3,
                TypeShape::Variant {
                    variants: vec![Variant { index: 0, name: "None".into(), fields: vec![] }],
                },
            ),
            // A sequence of composites is still a string.
            TypeDef::new(4, TypeShape::Sequence { element: 1 }),
        ]);
        for id in 1..=4 {
            assert_eq!(resolve(id, &table).unwrap(), CanonicalType::String, "id {id}");
        }
    }

    #[test]
    fn structured_shapes_do_not_check_their_members() {
        // Composite field points at a missing id: never visited.
        let table = TypeTable::new(vec![TypeDef::new(
            0,
            TypeShape::Composite {
                fields: vec![Field { name: Some("x".into()), ty: 42, type_name: None }],
            },
        )]);
        assert_eq!(resolve(0, &table).unwrap(), CanonicalType::String);
    }

    #[test]
    fn unknown_type_id() {
        let table = TypeTable::new(vec![prim(0, "u8")]);
        let err = resolve(9, &table).unwrap_err();
        assert!(matches!(err, ExtractError::UnknownTypeId { type_id: 9 }));
    }

    #[test]
    fn dangling_element_reports_the_missing_id() {
        let table = TypeTable::new(vec![TypeDef::new(0, TypeShape::Sequence { element: 5 })]);
        let err = resolve(0, &table).unwrap_err();
        assert!(matches!(err, ExtractError::UnknownTypeId { type_id: 5 }));
    }

    #[test]
    fn self_referential_sequence_is_cyclic() {
        let table = TypeTable::new(vec![TypeDef::new(7, TypeShape::Sequence { element: 7 })]);
        let err = resolve(7, &table).unwrap_err();
        assert!(matches!(err, ExtractError::CyclicTypeDefinition { type_id: 7 }));
    }

    #[test]
    fn longer_cycle_is_detected() {
        let table = TypeTable::new(vec![
            TypeDef::new(1, TypeShape::Array { len: 2, element: 2 }),
            TypeDef::new(2, TypeShape::Sequence { element: 3 }),
            TypeDef::new(3, TypeShape::Sequence { element: 1 }),
        ]);
        let err = resolve(1, &table).unwrap_err();
        assert!(matches!(err, ExtractError::CyclicTypeDefinition { type_id: 1 }));
    }

    #[test]
    fn depth_limit_is_enforced() {
        // 0 -> 1 -> 2 -> 3 (u8): three wrappers.
        let table = TypeTable::new(vec![
            TypeDef::new(0, TypeShape::Sequence { element: 1 }),
            TypeDef::new(1, TypeShape::Sequence { element: 2 }),
            TypeDef::new(2, TypeShape::Sequence { element: 3 }),
            prim(3, "u8"),
        ]);
        assert_eq!(
            TypeResolver::with_max_depth(3).resolve(0, &table).unwrap(),
            CanonicalType::Integer
        );
        let err = TypeResolver::with_max_depth(2).resolve(0, &table).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::TypeDepthExceeded { type_id: 0, max_depth: 2 }
        ));
    }
}

//! ink!/Substrate contract metadata model.
//!
//! Only the parts of the metadata the extractor reads are modelled; unknown
//! keys (`source`, `contract`, `storage`, `version`, ...) are ignored.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Key into one document's type table.
pub type TypeId = u32;

/// A parsed ink! metadata document.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InkAbi {
    pub spec: InkSpec,
    #[serde(default)]
    pub types: TypeTable,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InkSpec {
    pub events: Vec<InkEvent>,
    pub messages: Vec<InkMessage>,
    #[serde(default)]
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InkEvent {
    pub label: String,
    #[serde(default)]
    pub args: Vec<InkArg>,
    #[serde(default)]
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InkMessage {
    pub label: String,
    /// Selector as emitted by the contract toolchain, e.g. `"0x84a15da1"`.
    pub selector: String,
    #[serde(default)]
    pub mutates: bool,
    #[serde(default)]
    pub payable: bool,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub args: Vec<InkArg>,
    #[serde(rename = "returnType", default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<InkTypeSpec>,
    #[serde(default)]
    pub docs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InkArg {
    pub label: String,
    #[serde(rename = "type")]
    pub ty: InkTypeSpec,
    /// Events only: whether the argument is a topic.
    #[serde(default)]
    pub indexed: bool,
    #[serde(default)]
    pub docs: Vec<String>,
}

/// Reference from an argument into the type table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InkTypeSpec {
    #[serde(rename = "type")]
    pub type_id: TypeId,
    #[serde(rename = "displayName", default)]
    pub display_name: Vec<String>,
}

// ─── Type table ───────────────────────────────────────────────────────────────

/// One entry of the type table.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TypeDef {
    pub id: TypeId,
    #[serde(rename = "type")]
    pub ty: TypeInfo,
}

impl TypeDef {
    pub fn new(id: TypeId, shape: TypeShape) -> Self {
        Self {
            id,
            ty: TypeInfo {
                def: shape,
                path: Vec::new(),
                params: Vec::new(),
            },
        }
    }

    pub fn shape(&self) -> &TypeShape {
        &self.ty.def
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TypeInfo {
    pub def: TypeShape,
    /// Rust path of the type, e.g. `["ink_primitives", "types", "AccountId"]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<TypeParam>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TypeParam {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeId>,
}

/// The structural definition of a type.
///
/// Definition kinds this crate does not model land in [`TypeShape::Other`]
/// instead of failing the whole document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub enum TypeShape {
    Primitive(String),
    Composite {
        #[serde(default)]
        fields: Vec<Field>,
    },
    Array {
        len: u32,
        #[serde(rename = "type")]
        element: TypeId,
    },
    Sequence {
        #[serde(rename = "type")]
        element: TypeId,
    },
    Tuple(Vec<TypeId>),
    Variant {
        #[serde(default)]
        variants: Vec<Variant>,
    },
    /// SCALE compact-encoded wrapper around an integer type.
    Compact {
        #[serde(rename = "type")]
        element: TypeId,
    },
    #[serde(alias = "bitsequence")]
    BitSequence(serde_json::Value),
    /// Unrecognized definition kind, kept with its raw body.
    #[serde(skip)]
    Other { kind: String, body: serde_json::Value },
}

const KNOWN_SHAPE_KINDS: &[&str] = &[
    "primitive",
    "composite",
    "array",
    "sequence",
    "tuple",
    "variant",
    "compact",
    "bitSequence",
    "bitsequence",
];

impl<'de> Deserialize<'de> for TypeShape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        if let serde_json::Value::Object(map) = &raw {
            if map.len() == 1 {
                if let Some((kind, body)) = map.iter().next() {
                    if !KNOWN_SHAPE_KINDS.contains(&kind.as_str()) {
                        return Ok(TypeShape::Other { kind: kind.clone(), body: body.clone() });
                    }
                }
            }
        }
        TypeShape::deserialize(raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for TypeShape {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypeShape::Other { kind, body } => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(kind, body)?;
                map.end()
            }
            known => TypeShape::serialize(known, serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Field {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeId,
    #[serde(rename = "typeName", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Variant {
    pub index: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

/// Immutable, indexed type table.
///
/// When an id occurs more than once the first definition wins.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    defs: Vec<TypeDef>,
    index: HashMap<TypeId, usize>,
}

impl TypeTable {
    pub fn new(defs: Vec<TypeDef>) -> Self {
        let mut index = HashMap::with_capacity(defs.len());
        for (pos, def) in defs.iter().enumerate() {
            index.entry(def.id).or_insert(pos);
        }
        Self { defs, index }
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeDef> {
        self.index.get(&id).map(|&pos| &self.defs[pos])
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl FromIterator<TypeDef> for TypeTable {
    fn from_iter<I: IntoIterator<Item = TypeDef>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for TypeTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<TypeDef>::deserialize(deserializer).map(Self::new)
    }
}

impl Serialize for TypeTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.defs.serialize(serializer)
    }
}

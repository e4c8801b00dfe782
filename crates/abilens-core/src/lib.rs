//! # abilens-core
//!
//! Core types shared across all ABILens crates: the canonical type system,
//! the typed ink! and EVM ABI document models, the shape classifier, the
//! normalized output types, and the `AbiExtractor` trait every
//! format-specific extractor implements.

pub mod document;
pub mod error;
pub mod evm;
pub mod extractor;
pub mod ink;
pub mod normalized;
pub mod shape;
pub mod types;

pub use document::{parse_document, AbiDocument};
pub use error::{BatchError, ExtractError};
pub use extractor::{AbiExtractor, Dispatcher};
pub use normalized::{
    CallsOutput, ContractCalls, ContractEvents, EventsOutput, ExtractedAbi, NormalizedArg,
    NormalizedCall, NormalizedEvent,
};
pub use shape::{classify, AbiShape, ShapeClassifier};
pub use types::CanonicalType;

//! Typed ABI documents.
//!
//! A raw JSON value is classified first and only then deserialized into the
//! matching model, so no code downstream probes fields on untyped JSON.

use crate::error::ExtractError;
use crate::evm::EvmAbi;
use crate::ink::InkAbi;
use crate::shape::{AbiShape, ShapeClassifier};
use serde::Deserialize;
use serde_json::Value;

/// A classified and parsed ABI document.
#[derive(Debug, Clone)]
pub enum AbiDocument {
    Ink(InkAbi),
    Evm(EvmAbi),
}

impl AbiDocument {
    pub fn shape(&self) -> AbiShape {
        match self {
            AbiDocument::Ink(_) => AbiShape::Ink,
            AbiDocument::Evm(_) => AbiShape::Evm,
        }
    }
}

/// Classify `raw` and parse it into the matching model.
///
/// # Errors
/// `UnsupportedAbiFormat` when the shape is not recognized,
/// `InvalidDocument` when a recognized shape does not match its model.
pub fn parse_document(
    raw: &Value,
    classifier: &ShapeClassifier,
) -> Result<AbiDocument, ExtractError> {
    match classifier.classify(raw) {
        AbiShape::Ink => InkAbi::deserialize(raw)
            .map(AbiDocument::Ink)
            .map_err(|e| invalid(AbiShape::Ink, e)),
        AbiShape::Evm => EvmAbi::deserialize(raw)
            .map(AbiDocument::Evm)
            .map_err(|e| invalid(AbiShape::Evm, e)),
        AbiShape::Unrecognized => Err(ExtractError::UnsupportedAbiFormat),
    }
}

fn invalid(shape: AbiShape, err: serde_json::Error) -> ExtractError {
    ExtractError::InvalidDocument {
        shape,
        reason: err.to_string(),
    }
}

//! The `AbiExtractor` trait and the shape-based `Dispatcher`.
//!
//! Each ABI format (ink!, EVM) implements `AbiExtractor`. The trait is
//! object-safe so extractors can be stored as `Arc<dyn AbiExtractor>` and
//! shared across Rayon threads.

use crate::document::{parse_document, AbiDocument};
use crate::error::ExtractError;
use crate::normalized::ExtractedAbi;
use crate::shape::{AbiShape, ShapeClassifier};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Turns one typed ABI document into its normalized events and calls.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` and must not keep per-call state:
/// extracting the same document twice yields identical output.
pub trait AbiExtractor: Send + Sync {
    /// The document shape this extractor handles.
    fn shape(&self) -> AbiShape;

    /// Extract events and state-mutating calls.
    ///
    /// Returns `UnsupportedAbiFormat` when `doc` is of another shape.
    fn extract(&self, doc: &AbiDocument) -> Result<ExtractedAbi, ExtractError>;
}

/// Classifies raw documents and routes them to the registered extractor.
#[derive(Clone, Default)]
pub struct Dispatcher {
    classifier: ShapeClassifier,
    extractors: HashMap<AbiShape, Arc<dyn AbiExtractor>>,
}

impl Dispatcher {
    pub fn new(classifier: ShapeClassifier) -> Self {
        Self {
            classifier,
            extractors: HashMap::new(),
        }
    }

    /// Register an extractor under its own shape, replacing any previous one.
    pub fn register(&mut self, extractor: Arc<dyn AbiExtractor>) {
        self.extractors.insert(extractor.shape(), extractor);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, extractor: Arc<dyn AbiExtractor>) -> Self {
        self.register(extractor);
        self
    }

    pub fn classifier(&self) -> &ShapeClassifier {
        &self.classifier
    }

    pub fn classify(&self, raw: &Value) -> AbiShape {
        self.classifier.classify(raw)
    }

    /// Extract from an already parsed document.
    pub fn extract_document(&self, doc: &AbiDocument) -> Result<ExtractedAbi, ExtractError> {
        let shape = doc.shape();
        let extractor = self
            .extractors
            .get(&shape)
            .ok_or(ExtractError::NoExtractor { shape })?;
        extractor.extract(doc)
    }

    /// Classify, parse, and extract a raw ABI document.
    pub fn extract(&self, raw: &Value) -> Result<ExtractedAbi, ExtractError> {
        let doc = parse_document(raw, &self.classifier)?;
        self.extract_document(&doc)
    }
}

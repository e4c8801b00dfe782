//! Error types for the ABILens extraction pipeline.

use crate::ink::TypeId;
use crate::shape::AbiShape;
use thiserror::Error;

/// Errors that can occur while extracting events and calls from one ABI document.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported ABI format: document is neither ink! metadata nor an EVM JSON ABI")]
    UnsupportedAbiFormat,

    #[error("Invalid {shape} ABI document: {reason}")]
    InvalidDocument { shape: AbiShape, reason: String },

    #[error("Type ID {type_id} not found in ABI")]
    UnknownTypeId { type_id: TypeId },

    #[error("Cyclic type definition through type ID {type_id}")]
    CyclicTypeDefinition { type_id: TypeId },

    #[error("Type ID {type_id} nests deeper than {max_depth} levels")]
    TypeDepthExceeded { type_id: TypeId, max_depth: usize },

    #[error("No extractor registered for {shape} ABIs")]
    NoExtractor { shape: AbiShape },

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ExtractError {
    /// `true` when the error is caused by the caller-supplied document rather
    /// than by the engine.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ExtractError::NoExtractor { .. })
    }

    /// HTTP status an API layer should answer with.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// Stable variant name, used as a metric / log tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::UnsupportedAbiFormat => "UnsupportedAbiFormat",
            ExtractError::InvalidDocument { .. } => "InvalidDocument",
            ExtractError::UnknownTypeId { .. } => "UnknownTypeId",
            ExtractError::CyclicTypeDefinition { .. } => "CyclicTypeDefinition",
            ExtractError::TypeDepthExceeded { .. } => "TypeDepthExceeded",
            ExtractError::NoExtractor { .. } => "NoExtractor",
            ExtractError::Serde(_) => "Serde",
        }
    }
}

/// Errors from normalizing a dApp's full contract set.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Contract '{name}' ({address}) at index {index}: {source}")]
    ContractFailed {
        index: usize,
        name: String,
        address: String,
        #[source]
        source: ExtractError,
    },

    #[error("{0}")]
    Other(String),
}

impl BatchError {
    pub fn status_code(&self) -> u16 {
        match self {
            BatchError::ContractFailed { source, .. } => source.status_code(),
            BatchError::Other(_) => 500,
        }
    }
}

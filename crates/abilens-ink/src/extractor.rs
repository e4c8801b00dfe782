//! `InkExtractor` — the `AbiExtractor` implementation for ink! metadata.

use abilens_core::{
    document::AbiDocument,
    error::ExtractError,
    extractor::AbiExtractor,
    ink::{InkAbi, InkArg, InkEvent, InkMessage, TypeTable},
    normalized::{ExtractedAbi, NormalizedArg, NormalizedCall, NormalizedEvent},
    shape::AbiShape,
};
use tracing::debug;

use crate::resolver::TypeResolver;

/// Extracts events and mutating messages from ink! metadata.
/// Stateless; cheap to clone.
#[derive(Debug, Default, Clone)]
pub struct InkExtractor {
    resolver: TypeResolver,
}

impl InkExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom wrapper-depth limit for type resolution.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            resolver: TypeResolver::with_max_depth(max_depth),
        }
    }

    pub fn extract_ink(&self, abi: &InkAbi) -> Result<ExtractedAbi, ExtractError> {
        let events = abi
            .spec
            .events
            .iter()
            .map(|event| self.normalize_event(event, &abi.types))
            .collect::<Result<Vec<_>, _>>()?;

        let calls = abi
            .spec
            .messages
            .iter()
            .filter(|msg| msg.mutates)
            .map(|msg| self.normalize_message(msg, &abi.types))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            events = events.len(),
            calls = calls.len(),
            messages = abi.spec.messages.len(),
            "extracted ink! ABI"
        );

        Ok(ExtractedAbi { events, calls })
    }

    fn normalize_event(
        &self,
        event: &InkEvent,
        types: &TypeTable,
    ) -> Result<NormalizedEvent, ExtractError> {
        Ok(NormalizedEvent {
            name: event.label.clone(),
            args: self.normalize_args(&event.args, types)?,
        })
    }

    fn normalize_message(
        &self,
        msg: &InkMessage,
        types: &TypeTable,
    ) -> Result<NormalizedCall, ExtractError> {
        Ok(NormalizedCall {
            name: msg.label.clone(),
            selector: msg.selector.clone(),
            args: self.normalize_args(&msg.args, types)?,
        })
    }

    fn normalize_args(
        &self,
        args: &[InkArg],
        types: &TypeTable,
    ) -> Result<Vec<NormalizedArg>, ExtractError> {
        args.iter()
            .map(|arg| {
                let ty = self.resolver.resolve(arg.ty.type_id, types)?;
                Ok(NormalizedArg::new(arg.label.clone(), ty))
            })
            .collect()
    }
}

impl AbiExtractor for InkExtractor {
    fn shape(&self) -> AbiShape {
        AbiShape::Ink
    }

    fn extract(&self, doc: &AbiDocument) -> Result<ExtractedAbi, ExtractError> {
        match doc {
            AbiDocument::Ink(abi) => self.extract_ink(abi),
            AbiDocument::Evm(_) => Err(ExtractError::UnsupportedAbiFormat),
        }
    }
}

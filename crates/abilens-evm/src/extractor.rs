//! `EvmExtractor` — the `AbiExtractor` implementation for Solidity JSON ABIs.

use abilens_core::{
    document::AbiDocument,
    error::ExtractError,
    evm::{EvmAbi, EvmEvent, EvmFunction, EvmParam},
    extractor::AbiExtractor,
    normalized::{ExtractedAbi, NormalizedArg, NormalizedCall, NormalizedEvent},
    shape::AbiShape,
};
use std::sync::Arc;
use tracing::debug;

use crate::{mapper::map_evm_type, selector};

/// Extracts events and state-mutating functions from an EVM JSON ABI.
#[derive(Debug, Default, Clone)]
pub struct EvmExtractor {
    cache: Option<Arc<selector::SelectorCache>>,
}

impl EvmExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoize selectors in `cache`, which may be shared between extractors.
    pub fn with_cache(cache: Arc<selector::SelectorCache>) -> Self {
        Self { cache: Some(cache) }
    }

    pub fn extract_evm(&self, abi: &EvmAbi) -> Result<ExtractedAbi, ExtractError> {
        let events: Vec<NormalizedEvent> = abi.events().map(normalize_event).collect();

        let calls: Vec<NormalizedCall> = abi
            .functions()
            .filter(|f| f.mutates_state())
            .map(|f| self.normalize_function(f))
            .collect();

        debug!(
            events = events.len(),
            calls = calls.len(),
            items = abi.items.len(),
            "extracted EVM ABI"
        );

        Ok(ExtractedAbi { events, calls })
    }

    fn normalize_function(&self, func: &EvmFunction) -> NormalizedCall {
        let signature = selector::function_signature(&func.name, &func.inputs);
        let selector = match &self.cache {
            Some(cache) => cache.get_or_compute(&signature),
            None => selector::selector_from_signature(&signature),
        };
        NormalizedCall {
            name: func.name.clone(),
            selector,
            args: normalize_params(&func.inputs),
        }
    }
}

fn normalize_event(event: &EvmEvent) -> NormalizedEvent {
    NormalizedEvent {
        name: event.name.clone(),
        args: normalize_params(&event.inputs),
    }
}

fn normalize_params(params: &[EvmParam]) -> Vec<NormalizedArg> {
    params
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let name = if p.name.is_empty() {
                format!("arg{i}")
            } else {
                p.name.clone()
            };
            NormalizedArg::new(name, map_evm_type(&p.ty))
        })
        .collect()
}

impl AbiExtractor for EvmExtractor {
    fn shape(&self) -> AbiShape {
        AbiShape::Evm
    }

    fn extract(&self, doc: &AbiDocument) -> Result<ExtractedAbi, ExtractError> {
        match doc {
            AbiDocument::Evm(abi) => self.extract_evm(abi),
            AbiDocument::Ink(_) => Err(ExtractError::UnsupportedAbiFormat),
        }
    }
}

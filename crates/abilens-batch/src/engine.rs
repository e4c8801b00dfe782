//! `BatchEngine` — normalizes a dApp's contracts in parallel.

use crate::config::{EngineConfig, ErrorMode};
use crate::request::{BatchRequest, ContractAbiInput};
use abilens_core::{
    document::parse_document,
    error::{BatchError, ExtractError},
    extractor::Dispatcher,
    normalized::{CallsOutput, ContractCalls, ContractEvents, EventsOutput, ExtractedAbi},
    shape::{AbiShape, ShapeClassifier},
};
use abilens_evm::{EvmExtractor, SelectorCache};
use abilens_ink::InkExtractor;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One successfully normalized contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedContract {
    pub index: usize,
    pub name: String,
    pub address: String,
    pub shape: AbiShape,
    #[serde(flatten)]
    pub abi: ExtractedAbi,
}

/// Result of a batch normalization job.
#[derive(Debug, Default)]
pub struct BatchResult {
    /// Successfully normalized contracts, in input order
    pub contracts: Vec<NormalizedContract>,
    /// Failed contracts, in input order. Empty in Skip mode.
    pub errors: Vec<BatchError>,
    /// Total contracts in the request
    pub total_input: usize,
}

impl BatchResult {
    /// `{ contracts: [{ name, address, events }] }`
    pub fn events_output(&self) -> EventsOutput {
        EventsOutput {
            contracts: self
                .contracts
                .iter()
                .map(|c| ContractEvents {
                    name: c.name.clone(),
                    address: c.address.clone(),
                    events: c.abi.events.clone(),
                })
                .collect(),
        }
    }

    /// `{ contracts: [{ name, address, calls }] }`
    pub fn calls_output(&self) -> CallsOutput {
        CallsOutput {
            contracts: self
                .contracts
                .iter()
                .map(|c| ContractCalls {
                    name: c.name.clone(),
                    address: c.address.clone(),
                    calls: c.abi.calls.clone(),
                })
                .collect(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.contracts.len() == self.total_input
    }
}

/// Batch normalization engine.
#[derive(Clone)]
pub struct BatchEngine {
    dispatcher: Dispatcher,
}

impl BatchEngine {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Engine with the ink! and EVM extractors configured from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        let evm = if config.cache_selectors {
            EvmExtractor::with_cache(Arc::new(SelectorCache::with_capacity(
                config.selector_cache_capacity,
            )))
        } else {
            EvmExtractor::new()
        };
        let dispatcher = Dispatcher::new(ShapeClassifier::new(config.accept_error_items))
            .with(Arc::new(InkExtractor::with_max_depth(config.max_type_depth)))
            .with(Arc::new(evm));
        Self::new(dispatcher)
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Normalize one contract; `index` is its position in the dApp manifest.
    pub fn normalize_contract(
        &self,
        index: usize,
        input: &ContractAbiInput,
    ) -> Result<NormalizedContract, BatchError> {
        let extracted = parse_document(&input.abi, self.dispatcher.classifier()).and_then(|doc| {
            let shape = doc.shape();
            self.dispatcher
                .extract_document(&doc)
                .map(|abi| (shape, abi))
        });

        match extracted {
            Ok((shape, abi)) => {
                debug!(
                    contract = %input.name,
                    address = %input.address,
                    %shape,
                    events = abi.events.len(),
                    calls = abi.calls.len(),
                    "normalized contract"
                );
                Ok(NormalizedContract {
                    index,
                    name: input.name.clone(),
                    address: input.address.clone(),
                    shape,
                    abi,
                })
            }
            Err(source) => {
                warn!(
                    contract = %input.name,
                    address = %input.address,
                    error = %source,
                    "failed to normalize contract"
                );
                Err(contract_failed(index, input, source))
            }
        }
    }

    /// Execute a batch request.
    pub fn normalize(&self, req: BatchRequest) -> Result<BatchResult, BatchError> {
        let total_input = req.contracts.len();
        info!(
            "BatchEngine: normalizing {} contracts (error_mode={:?}, concurrency={})",
            total_input, req.error_mode, req.concurrency
        );

        let done = AtomicUsize::new(0);
        let run = || -> Vec<Result<NormalizedContract, BatchError>> {
            req.contracts
                .par_iter()
                .enumerate()
                .map(|(index, input)| {
                    let result = self.normalize_contract(index, input);
                    if let Some(cb) = &req.on_progress {
                        cb(done.fetch_add(1, Ordering::Relaxed) + 1, total_input);
                    }
                    result
                })
                .collect()
        };

        let results = if req.concurrency == 0 {
            run()
        } else {
            rayon::ThreadPoolBuilder::new()
                .num_threads(req.concurrency)
                .build()
                .map_err(|e| BatchError::Other(format!("cannot build worker pool: {e}")))?
                .install(run)
        };

        let mut contracts = Vec::with_capacity(total_input);
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(contract) => contracts.push(contract),
                Err(err) => match req.error_mode {
                    ErrorMode::Throw => return Err(err),
                    ErrorMode::Collect => errors.push(err),
                    ErrorMode::Skip => {}
                },
            }
        }

        info!(
            "BatchEngine: complete — {} normalized, {} failed",
            contracts.len(),
            total_input - contracts.len()
        );

        Ok(BatchResult {
            contracts,
            errors,
            total_input,
        })
    }

    /// Normalize a single raw ABI outside of any manifest.
    pub fn extract(&self, raw: &serde_json::Value) -> Result<ExtractedAbi, ExtractError> {
        self.dispatcher.extract(raw)
    }
}

fn contract_failed(index: usize, input: &ContractAbiInput, source: ExtractError) -> BatchError {
    BatchError::ContractFailed {
        index,
        name: input.name.clone(),
        address: input.address.clone(),
        source,
    }
}

//! Batch normalization request.

use crate::config::ErrorMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One contract of a dApp registration: its identity plus the raw ABI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractAbiInput {
    pub name: String,
    pub address: String,
    pub abi: Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Manifest {
    List(Vec<ContractAbiInput>),
    Registration { abis: Vec<ContractAbiInput> },
}

impl ContractAbiInput {
    pub fn new(name: impl Into<String>, address: impl Into<String>, abi: Value) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            abi,
        }
    }

    /// Parse a dApp manifest: either a bare JSON array of contracts or a
    /// registration object carrying them under `abis`.
    pub fn parse_manifest(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        Ok(match serde_json::from_str(json)? {
            Manifest::List(contracts) => contracts,
            Manifest::Registration { abis } => abis,
        })
    }
}

/// Configuration for a batch normalization job.
pub struct BatchRequest {
    pub contracts: Vec<ContractAbiInput>,
    /// Number of Rayon workers (0 = the global pool)
    pub concurrency: usize,
    pub error_mode: ErrorMode,
    /// Called with (contracts done, total) after each contract
    pub on_progress: Option<Box<dyn Fn(usize, usize) + Send + Sync>>,
}

impl BatchRequest {
    pub fn new(contracts: Vec<ContractAbiInput>) -> Self {
        Self {
            contracts,
            concurrency: 0,
            error_mode: ErrorMode::default(),
            on_progress: None,
        }
    }

    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    pub fn error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    pub fn on_progress<F: Fn(usize, usize) + Send + Sync + 'static>(mut self, f: F) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }
}

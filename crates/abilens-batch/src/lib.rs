//! # abilens-batch
//!
//! Normalizes the full contract set of a dApp registration.
//!
//! ## Features
//! - CPU-parallel extraction via Rayon, output order equals input order
//! - Optional bounded worker count and progress callbacks
//! - Three error modes: Skip, Collect, Throw
//! - `EngineConfig` loaded from YAML or JSON
//!
//! ## Usage
//! ```no_run
//! use abilens_batch::{BatchEngine, BatchRequest, ContractAbiInput, EngineConfig};
//!
//! let engine = BatchEngine::from_config(&EngineConfig::default());
//! let contracts = ContractAbiInput::parse_manifest("[]").unwrap();
//! let result = engine.normalize(BatchRequest::new(contracts)).unwrap();
//! println!("{}", serde_json::to_string(&result.events_output()).unwrap());
//! ```

pub mod config;
pub mod engine;
pub mod request;

pub use config::{ConfigError, EngineConfig, ErrorMode};
pub use engine::{BatchEngine, BatchResult, NormalizedContract};
pub use request::{BatchRequest, ContractAbiInput};

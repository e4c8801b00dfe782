//! # abilens-observability
//!
//! OpenTelemetry-based observability for ABILens.
//!
//! ## Built-in metrics
//! - `abilens.contracts_normalized` — counter, tagged with shape
//! - `abilens.extract_errors`       — counter, tagged with error kind
//! - `abilens.events_extracted`     — counter
//! - `abilens.calls_extracted`      — counter
//! - `abilens.extract_latency_ms`   — histogram
//!
//! ## Structured logging
//! Text or JSON logs through `tracing-subscriber`, with levels configurable
//! per component.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::AbiLensMetrics;
pub use tracing_setup::{init_tracing, LogConfig};

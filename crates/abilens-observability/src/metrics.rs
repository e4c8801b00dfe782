//! ABILens metrics definitions.
//!
//! All metrics use OpenTelemetry conventions. Without an installed meter
//! provider the global meter is a no-op.

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Central metrics handle for ABILens.
#[derive(Clone)]
pub struct AbiLensMetrics {
    pub contracts_normalized: Counter<u64>,
    pub extract_errors: Counter<u64>,
    pub events_extracted: Counter<u64>,
    pub calls_extracted: Counter<u64>,
    pub extract_latency_ms: Histogram<f64>,
}

impl AbiLensMetrics {
    pub fn new(meter: &Meter) -> Self {
        Self {
            contracts_normalized: meter
                .u64_counter("abilens.contracts_normalized")
                .with_description("Contracts whose ABI was normalized successfully")
                .init(),
            extract_errors: meter
                .u64_counter("abilens.extract_errors")
                .with_description("Contracts whose ABI failed to normalize")
                .init(),
            events_extracted: meter
                .u64_counter("abilens.events_extracted")
                .with_description("Normalized events produced")
                .init(),
            calls_extracted: meter
                .u64_counter("abilens.calls_extracted")
                .with_description("Normalized state-mutating calls produced")
                .init(),
            extract_latency_ms: meter
                .f64_histogram("abilens.extract_latency_ms")
                .with_description("Time to normalize one batch of contracts in milliseconds")
                .init(),
        }
    }

    /// Metrics bound to the global meter named `abilens`.
    pub fn global() -> Self {
        Self::new(&global::meter("abilens"))
    }

    pub fn record_contract(&self, shape: &str, events: usize, calls: usize) {
        let attrs = [KeyValue::new("shape", shape.to_string())];
        self.contracts_normalized.add(1, &attrs);
        self.events_extracted.add(events as u64, &attrs);
        self.calls_extracted.add(calls as u64, &attrs);
    }

    pub fn record_error(&self, error_kind: &str) {
        self.extract_errors
            .add(1, &[KeyValue::new("error_kind", error_kind.to_string())]);
    }

    pub fn record_latency(&self, ms: f64) {
        self.extract_latency_ms.record(ms, &[]);
    }
}

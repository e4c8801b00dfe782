//! `abilens events` / `abilens calls` — normalize every contract of a dApp
//! manifest.

use crate::render;
use abilens_batch::{BatchEngine, BatchRequest, BatchResult, ContractAbiInput, ErrorMode};
use abilens_core::error::BatchError;
use abilens_observability::AbiLensMetrics;
use anyhow::{Context, Result};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Events,
    Calls,
}

pub fn run(
    engine: &BatchEngine,
    manifest_path: &str,
    error_mode: ErrorMode,
    output: Output,
    as_json: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(manifest_path)
        .with_context(|| format!("read manifest file '{}'", manifest_path))?;
    let contracts = ContractAbiInput::parse_manifest(&content)
        .with_context(|| format!("parse manifest '{}'", manifest_path))?;

    let metrics = AbiLensMetrics::global();
    let start = Instant::now();
    let result = engine.normalize(BatchRequest::new(contracts).error_mode(error_mode));
    metrics.record_latency(start.elapsed().as_secs_f64() * 1_000.0);

    let result = match result {
        Ok(r) => r,
        Err(e) => {
            record_failure(&metrics, &e);
            return Err(e).context("dApp normalization aborted");
        }
    };
    record(&metrics, &result);

    if as_json {
        let json = match output {
            Output::Events => serde_json::to_string_pretty(&result.events_output())?,
            Output::Calls => serde_json::to_string_pretty(&result.calls_output())?,
        };
        println!("{}", json);
    } else {
        print_text(&result, output);
    }

    for err in &result.errors {
        eprintln!("  ✗ {}", err);
    }
    if !result.errors.is_empty() {
        eprintln!(
            "{} of {} contracts failed to normalize",
            result.errors.len(),
            result.total_input
        );
    }
    Ok(())
}

fn print_text(result: &BatchResult, output: Output) {
    for contract in &result.contracts {
        println!("{} ({}) [{}]", contract.name, contract.address, contract.shape);
        match output {
            Output::Events => {
                for e in &contract.abi.events {
                    println!("  {}", render::event(e));
                }
            }
            Output::Calls => {
                for c in &contract.abi.calls {
                    println!("  {}", render::call(c));
                }
            }
        }
    }
}

fn record(metrics: &AbiLensMetrics, result: &BatchResult) {
    for contract in &result.contracts {
        metrics.record_contract(
            &contract.shape.to_string(),
            contract.abi.events.len(),
            contract.abi.calls.len(),
        );
    }
    for err in &result.errors {
        record_failure(metrics, err);
    }
}

fn record_failure(metrics: &AbiLensMetrics, err: &BatchError) {
    match err {
        BatchError::ContractFailed { source, .. } => metrics.record_error(source.kind()),
        BatchError::Other(_) => metrics.record_error("Other"),
    }
}

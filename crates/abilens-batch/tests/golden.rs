//! Golden fixture integration tests.
//!
//! Each fixture in `fixtures/{evm,ink}/` holds a real contract ABI together
//! with the events and calls it must normalize to.

use abilens_batch::{BatchEngine, BatchRequest, ContractAbiInput, EngineConfig, ErrorMode};
use abilens_core::{
    error::{BatchError, ExtractError},
    normalized::ExtractedAbi,
    shape::{is_ink_abi, AbiShape, ShapeClassifier},
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// The fixtures live two levels above the crate root.
fn fixtures_root() -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures");
    p
}

fn fixture_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn load_fixture(path: &Path) -> Value {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("fixture {} not found: {e}", path.display()));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("fixture {} is not JSON: {e}", path.display()))
}

fn all_fixture_paths() -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(fixtures_root())
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .map(|e| e.into_path())
        .collect();
    paths.sort();
    paths
}

fn contract_input(fixture: &Value) -> ContractAbiInput {
    ContractAbiInput::new(
        fixture["name"].as_str().unwrap(),
        fixture["address"].as_str().unwrap(),
        fixture["abi"].clone(),
    )
}

fn engine() -> BatchEngine {
    BatchEngine::from_config(&EngineConfig::default())
}

fn assert_golden(rel: &str) -> ExtractedAbi {
    let fixture = load_fixture(&fixture_path(rel));
    let expected: ExtractedAbi = serde_json::from_value(fixture["expected"].clone())
        .unwrap_or_else(|e| panic!("{rel}: bad expected block: {e}"));

    let actual = engine()
        .extract(&fixture["abi"])
        .unwrap_or_else(|e| panic!("{rel}: extraction failed: {e}"));

    assert_eq!(actual.events, expected.events, "{rel}: events");
    assert_eq!(actual.calls, expected.calls, "{rel}: calls");
    actual
}

// ─── EVM ──────────────────────────────────────────────────────────────────────

#[test]
fn evm_erc20_golden() {
    let out = assert_golden("evm/erc20.json");
    assert!(out.call("balanceOf").is_none());
    assert_eq!(out.call("transfer").unwrap().selector, "0xa9059cbb");
}

#[test]
fn evm_weth9_legacy_flags_golden() {
    let out = assert_golden("evm/weth9.json");
    assert_eq!(out.call("deposit").unwrap().selector, "0xd0e30db0");
    assert!(out.call("totalSupply").is_none());
}

#[test]
fn evm_erc721_overloads_golden() {
    let out = assert_golden("evm/erc721.json");
    let selectors: Vec<_> = out
        .calls
        .iter()
        .filter(|c| c.name == "safeTransferFrom")
        .map(|c| c.selector.as_str())
        .collect();
    assert_eq!(selectors, ["0x42842e0e", "0xb88d4fde"]);
}

// ─── ink! ─────────────────────────────────────────────────────────────────────

#[test]
fn ink_erc20_golden() {
    let out = assert_golden("ink/erc20.json");
    assert!(out.call("balance_of").is_none());
}

#[test]
fn ink_flipper_golden() {
    let out = assert_golden("ink/flipper.json");
    assert!(out.events.is_empty());
    assert_eq!(out.calls.len(), 1);
}

#[test]
fn ink_wrapper_chains_golden() {
    assert_golden("ink/registry.json");
}

// ─── Whole fixture set ────────────────────────────────────────────────────────

#[test]
fn every_fixture_matches() {
    let paths = all_fixture_paths();
    assert!(paths.len() >= 6, "expected the bundled fixtures, found {}", paths.len());
    for path in paths {
        let rel = path.strip_prefix(fixtures_root()).unwrap().to_string_lossy().to_string();
        assert_golden(&rel);
    }
}

#[test]
fn classifier_is_exclusive_over_fixtures() {
    let classifier = ShapeClassifier::default();
    for path in all_fixture_paths() {
        let fixture = load_fixture(&path);
        let abi = &fixture["abi"];
        let ink = is_ink_abi(abi);
        let evm = classifier.is_evm_abi(abi);
        assert!(ink != evm, "{}: ink={ink} evm={evm}", path.display());

        let dir = path.parent().and_then(|p| p.file_name()).unwrap();
        let expected = if dir == "ink" { AbiShape::Ink } else { AbiShape::Evm };
        assert_eq!(classifier.classify(abi), expected, "{}", path.display());
    }
}

#[test]
fn extraction_is_idempotent() {
    let engine = engine();
    for path in all_fixture_paths() {
        let fixture = load_fixture(&path);
        let first = serde_json::to_string(&engine.extract(&fixture["abi"]).unwrap()).unwrap();
        let second = serde_json::to_string(&engine.extract(&fixture["abi"]).unwrap()).unwrap();
        assert_eq!(first, second, "{}", path.display());
    }
}

#[test]
fn dapp_manifest_isolates_broken_contract() {
    let mut contracts: Vec<ContractAbiInput> = all_fixture_paths()
        .iter()
        .map(|p| contract_input(&load_fixture(p)))
        .collect();

    let mut broken = load_fixture(&fixture_path("ink/flipper.json"));
    broken["abi"]["spec"]["messages"][0]["args"] =
        json!([{"label": "value", "type": {"type": 999, "displayName": ["u8"]}}]);
    let broken_index = 2;
    contracts.insert(
        broken_index,
        ContractAbiInput::new("BrokenFlipper", "5Broken", broken["abi"].clone()),
    );

    let engine = engine();
    let result = engine
        .normalize(BatchRequest::new(contracts.clone()).error_mode(ErrorMode::Collect))
        .unwrap();

    assert_eq!(result.total_input, contracts.len());
    assert_eq!(result.contracts.len(), contracts.len() - 1);
    assert_eq!(result.errors.len(), 1);
    match &result.errors[0] {
        BatchError::ContractFailed { index, name, source, .. } => {
            assert_eq!(*index, broken_index);
            assert_eq!(name, "BrokenFlipper");
            assert!(matches!(source, ExtractError::UnknownTypeId { type_id: 999 }));
        }
        other => panic!("unexpected error: {other}"),
    }

    for normalized in &result.contracts {
        let standalone = engine.extract(&contracts[normalized.index].abi).unwrap();
        assert_eq!(normalized.abi, standalone, "{}", normalized.name);
    }

    let events = result.events_output();
    assert_eq!(events.contracts.len(), result.contracts.len());
    assert!(events.contracts.iter().all(|c| c.name != "BrokenFlipper"));
}

//! ABILens CLI — inspect and normalize ink! and EVM contract ABIs.
//!
//! # Commands
//! ```text
//! abilens classify  --abi <file.json>
//! abilens normalize --abi <file.json> [--name N] [--address A] [--json]
//! abilens events    --manifest <dapp.json> [--json]
//! abilens calls     --manifest <dapp.json> [--json]
//! abilens selector  --name <fn> --types t1,t2 | --signature "fn(t1,t2)"
//! abilens test      --fixtures <dir>
//! abilens info
//! ```

use abilens_batch::{BatchEngine, EngineConfig};
use abilens_core::normalized::ExtractedAbi;
use abilens_evm::selector::{compute_selector, selector_from_signature, signature};
use abilens_observability::init_tracing;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod cmd_manifest;
mod render;

use cmd_manifest::Output;

#[derive(Parser)]
#[command(
    name = "abilens",
    about = "ABI introspection and normalization — ABILens CLI",
    long_about = "
ABILens CLI: classify smart-contract ABIs (ink! metadata or EVM JSON ABI),
list their events and state-mutating calls with canonical argument types,
and compute EVM function selectors.

CONFIGURATION:
  --config <file>   YAML or JSON engine config (error mode, depth limit,
                    selector cache, logging)
",
    version
)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Engine configuration file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the shape of an ABI document (ink, evm, unrecognized)
    Classify {
        /// Path to the ABI JSON file
        #[arg(long)]
        abi: String,
    },

    /// Print the events and state-mutating calls of one contract
    Normalize {
        /// Path to the ABI JSON file
        #[arg(long)]
        abi: String,
        /// Contract name shown in the output
        #[arg(long, default_value = "contract")]
        name: String,
        /// Contract address shown in the output
        #[arg(long, default_value = "")]
        address: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a dApp manifest and print every contract's events
    Events {
        /// JSON array of { name, address, abi } (or an object with `abis`)
        #[arg(long)]
        manifest: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize a dApp manifest and print every contract's calls
    Calls {
        /// JSON array of { name, address, abi } (or an object with `abis`)
        #[arg(long)]
        manifest: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute an EVM function selector
    Selector {
        /// Function name
        #[arg(long, required_unless_present = "signature")]
        name: Option<String>,
        /// Comma-separated input types, e.g. address,uint256
        #[arg(long, value_delimiter = ',', requires = "name")]
        types: Vec<String>,
        /// Full signature, e.g. "transfer(address,uint256)"
        #[arg(long, conflicts_with_all = ["name", "types"])]
        signature: Option<String>,
    },

    /// Run golden test fixtures
    Test {
        /// Directory containing fixture JSON files
        #[arg(long, default_value = "./fixtures")]
        fixtures: String,
    },

    /// Show ABILens build and capability info
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            EngineConfig::load(path).with_context(|| format!("load config '{}'", path))?
        }
        None => EngineConfig::default(),
    };
    if cli.verbose {
        config.log.level = "debug".into();
    }
    init_tracing(&config.log).context("initialise logging")?;

    let engine = BatchEngine::from_config(&config);

    match cli.command {
        Commands::Classify { abi } => cmd_classify(&engine, &abi),

        Commands::Normalize { abi, name, address, json } => {
            cmd_normalize(&engine, &abi, &name, &address, json)
        }

        Commands::Events { manifest, json } => {
            cmd_manifest::run(&engine, &manifest, config.error_mode, Output::Events, json)
        }

        Commands::Calls { manifest, json } => {
            cmd_manifest::run(&engine, &manifest, config.error_mode, Output::Calls, json)
        }

        Commands::Selector { name, types, signature } => {
            cmd_selector(name.as_deref(), &types, signature.as_deref())
        }

        Commands::Test { fixtures } => cmd_test::run(&engine, &fixtures, cli.verbose),

        Commands::Info => cmd_info(&config),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

fn read_abi(path: &str) -> Result<serde_json::Value> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("read ABI file '{}'", path))?;
    serde_json::from_str(&content).with_context(|| format!("parse ABI file '{}'", path))
}

fn cmd_classify(engine: &BatchEngine, abi_path: &str) -> Result<()> {
    let raw = read_abi(abi_path)?;
    println!("{}", engine.dispatcher().classify(&raw));
    Ok(())
}

fn cmd_normalize(
    engine: &BatchEngine,
    abi_path: &str,
    name: &str,
    address: &str,
    as_json: bool,
) -> Result<()> {
    let raw = read_abi(abi_path)?;
    let shape = engine.dispatcher().classify(&raw);
    let extracted: ExtractedAbi = engine
        .extract(&raw)
        .with_context(|| format!("normalize '{}'", abi_path))?;

    if as_json {
        let out = serde_json::json!({
            "name": name,
            "address": address,
            "shape": shape,
            "events": extracted.events,
            "calls": extracted.calls,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Contract: {} ({})", name, address);
        println!("Shape:    {}", shape);
        println!("Events ({}):", extracted.events.len());
        for e in &extracted.events {
            println!("  {}", render::event(e));
        }
        println!("Calls ({}):", extracted.calls.len());
        for c in &extracted.calls {
            println!("  {}", render::call(c));
        }
    }
    Ok(())
}

fn cmd_selector(name: Option<&str>, types: &[String], full: Option<&str>) -> Result<()> {
    let (sig, selector) = match (full, name) {
        (Some(full), _) => {
            let sig: String = full.split_whitespace().collect();
            let selector = selector_from_signature(&sig);
            (sig, selector)
        }
        (None, Some(name)) => (signature(name, types), compute_selector(name, types)),
        (None, None) => anyhow::bail!("either --name or --signature is required"),
    };
    println!("{}  {}", selector, sig);
    Ok(())
}

fn cmd_info(config: &EngineConfig) -> Result<()> {
    println!("ABILens v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Capabilities:");
    println!("  ✓ ABI shape classification   (ink! metadata / EVM JSON ABI)");
    println!("  ✓ ink! type-table resolution (cycle + depth guarded)");
    println!("  ✓ EVM type mapping           (Solidity elementary types)");
    println!("  ✓ EVM function selectors     (tiny-keccak)");
    println!("  ✓ Parallel dApp batches      (Rayon)");
    println!();
    println!("Engine config:");
    println!("  accept_error_items: {}", config.accept_error_items);
    println!("  max_type_depth:     {}", config.max_type_depth);
    println!("  cache_selectors:    {}", config.cache_selectors);
    println!("  cache capacity:     {}", config.selector_cache_capacity);
    println!("  error_mode:         {:?}", config.error_mode);
    println!("  log level:          {}", config.log.level);
    Ok(())
}

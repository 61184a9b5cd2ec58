//! ADSYNC Retail Reference Runtime: Demo CLI
//!
//! Runs the retail reference scenarios, lists the built-in ad type catalogue,
//! or previews an arbitrary request document.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- product-launch
//!   cargo run -p demo -- multi-platform
//!   cargo run -p demo -- broken-feed
//!   cargo run -p demo -- catalog --platform meta
//!   cargo run -p demo -- request product-launch > launch.json
//!   cargo run -p demo -- preview --request launch.json --config retail.toml

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use adsync_contracts::{
    error::{AdsyncError, AdsyncResult},
    platform::Platform,
    request::PreviewRequest,
};
use adsync_core::{EngineConfig, SyncPreviewBuilder};
use adsync_ref_retail::scenarios::{broken_feed, multi_platform, product_launch};
use adsync_registry::AdTypeRegistry;
use adsync_validate::FieldValidator;

// ── CLI definition ────────────────────────────────────────────────────────────

/// ADSYNC ad sync preview demo.
///
/// Classifies every ad of a campaign set as valid, fallback, or skipped
/// before anything is sent to an ad platform.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "ADSYNC retail reference runtime demo",
    long_about = "Runs ADSYNC retail scenarios showing template resolution,\n\
                  platform limit resolution, field validation, and sync previews."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three retail scenarios in sequence.
    RunAll,
    /// Scenario 1: Spring Product Launch (fallback + skip, memoized).
    ProductLaunch,
    /// Scenario 2: One Catalogue, Three Platforms (tightest limit wins).
    MultiPlatform,
    /// Scenario 3: Broken Feed (one skip reason per ad).
    BrokenFeed,
    /// List the built-in ad type catalogue.
    Catalog {
        /// Only list ad types for this platform.
        #[arg(long)]
        platform: Option<Platform>,
    },
    /// Print a scenario's preview request as JSON.
    Request {
        #[arg(value_enum)]
        scenario: Scenario,
    },
    /// Preview a request document and print the result as JSON.
    Preview {
        /// Preview request, JSON.
        #[arg(long)]
        request: PathBuf,
        /// Engine configuration, TOML. Defaults to the standard sync fields.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Extra ad type definitions, TOML, registered over the built-ins.
        #[arg(long)]
        ad_types: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Scenario {
    ProductLaunch,
    MultiPlatform,
    BrokenFeed,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Logs go to stderr. Set RUST_LOG=debug for per-field detail.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::RunAll => {
            print_banner();
            run_all()
        }
        Command::ProductLaunch => {
            print_banner();
            product_launch::run_scenario()
        }
        Command::MultiPlatform => {
            print_banner();
            multi_platform::run_scenario()
        }
        Command::BrokenFeed => {
            print_banner();
            broken_feed::run_scenario()
        }
        Command::Catalog { platform } => {
            print_catalog(platform);
            Ok(())
        }
        Command::Request { scenario } => print_request(scenario),
        Command::Preview {
            request,
            config,
            ad_types,
        } => run_preview(&request, config.as_deref(), ad_types.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> AdsyncResult<()> {
    product_launch::run_scenario()?;
    multi_platform::run_scenario()?;
    broken_feed::run_scenario()?;
    println!("All selected scenarios completed successfully.");
    Ok(())
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

fn print_catalog(platform: Option<Platform>) {
    let registry = AdTypeRegistry::with_builtins();
    let platforms: Vec<Platform> = match platform {
        Some(p) => vec![p],
        None => Platform::ALL.to_vec(),
    };

    for platform in platforms {
        println!("{}", platform);
        for definition in registry.by_platform(platform) {
            let required: Vec<&str> = definition
                .fields
                .iter()
                .filter(|f| f.required)
                .map(|f| f.id.as_str())
                .collect();
            println!(
                "  {:<24} {:<26} {:<9} required: {}",
                definition.id,
                definition.name,
                format!("{:?}", definition.category).to_lowercase(),
                required.join(", ")
            );
        }
        println!();
    }
}

// ── Request documents ─────────────────────────────────────────────────────────

fn print_request(scenario: Scenario) -> AdsyncResult<()> {
    let request = match scenario {
        Scenario::ProductLaunch => product_launch::launch_request(),
        Scenario::MultiPlatform => multi_platform::multi_platform_request(vec![
            Platform::Google,
            Platform::Meta,
            Platform::Tiktok,
        ]),
        Scenario::BrokenFeed => broken_feed::broken_feed_request(),
    };
    print_json(&request)
}

fn run_preview(
    request_path: &Path,
    config_path: Option<&Path>,
    ad_types_path: Option<&Path>,
) -> AdsyncResult<()> {
    let raw = std::fs::read_to_string(request_path).map_err(|e| AdsyncError::RequestDecode {
        reason: format!("failed to read request '{}': {}", request_path.display(), e),
    })?;
    let request = PreviewRequest::from_json_str(&raw)?;

    let config = match config_path {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let mut registry = AdTypeRegistry::with_builtins();
    if let Some(path) = ad_types_path {
        let added = registry.load_file(path)?;
        info!(path = %path.display(), added, "extra ad types registered");
    }

    let builder = SyncPreviewBuilder::new(Box::new(registry), Box::new(FieldValidator::new()), config);
    print_json(&builder.build(&request))
}

fn print_json<T: serde::Serialize>(value: &T) -> AdsyncResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| AdsyncError::RequestDecode {
        reason: format!("failed to encode JSON: {}", e),
    })?;
    println!("{}", json);
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("ADSYNC: Ad Sync Preview");
    println!("Retail Reference Demo");
    println!("========================");
    println!();
    println!("ADSYNC classification pipeline per ad:");
    println!("  [1] Sample row selected; ad group budget and schedule checked");
    println!("  [2] Template variables checked against the data source columns");
    println!("  [3] Templates resolved (fallback chains, filters)");
    println!("  [4] Most restrictive limit across the selected platforms applied");
    println!("  [5] Field checked; length overruns degrade to fallback when allowed");
    println!("  [6] Resolved ad checked against its registered ad type");
    println!();
}

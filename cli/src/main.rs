//! `diamond` - run upgrade scenarios against an in-process diamond proxy.
//!
//! ```text
//! diamond selector <signature>...            print 4-byte selectors
//! diamond run <manifest.toml> [--format F]   deploy, cut, call, report
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, else `[log] filter` from
//! `~/.diamond/config.toml`, else `info`). Reports go to stdout.

mod config;
mod manifest;
mod runner;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use alloy_json_abi::Function;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use config::{DiamondConfig, OutputFormat};
use manifest::Manifest;

#[derive(Parser)]
#[command(name = "diamond")]
#[command(about = "Diamond proxy selector dispatch and upgrade engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the selector of each function signature
    Selector {
        /// Signatures such as `transferOwnership(address)`
        #[arg(required = true)]
        signatures: Vec<String>,
    },
    /// Execute a scenario manifest and print a report
    Run {
        /// Manifest file (TOML)
        manifest: PathBuf,
        /// Report format; overrides `[output] format` from the config
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
}

fn init_tracing(config_filter: Option<&str>) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_filter.unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config, config_error) = match DiamondConfig::load() {
        Ok(config) => (config.unwrap_or_default(), None),
        Err(e) => (DiamondConfig::default(), Some(e)),
    };
    init_tracing(config.log_filter());
    if let Some(e) = config_error {
        tracing::warn!(path = %e.path().display(), "Ignoring config: {e}");
    }

    match cli.command {
        Commands::Selector { signatures } => {
            for signature in signatures {
                let parsed = Function::parse(&signature)
                    .with_context(|| format!("Invalid signature {signature:?}"))?;
                println!("{}  {}", parsed.selector(), parsed.signature());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run { manifest, format } => {
            let format = format
                .or_else(|| config.output_format())
                .unwrap_or_default();
            let loaded = Manifest::load(&manifest)?;
            let report = runner::run(&loaded)
                .with_context(|| format!("Failed to run {}", manifest.display()))?;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Text => print!("{}", runner::render_text(&report)),
            }
            Ok(if report.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sha1dc_bridge_core::{IngestStrategy, SessionManager};
use std::path::PathBuf;
use std::process::ExitCode;

mod config;
mod hash;
mod output;

use crate::config::AppConfig;
use crate::hash::Hasher;
use crate::output::OutputFormat;

/// Exit status when any input carries a detected collision attack
const EXIT_COLLISION: u8 = 2;

#[derive(Parser)]
#[command(name = "sha1dc")]
#[command(author, version, about = "SHA-1 with collision detection", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Configuration file (defaults to ./sha1dc.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash files, or stdin when given `-` or nothing
    Hash {
        /// Files to hash
        paths: Vec<PathBuf>,

        /// How input regions are handed to the engine
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Bytes per region
        #[arg(long, value_name = "BYTES")]
        chunk_size: Option<usize>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Config,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Copy,
    Pin,
}

impl From<StrategyArg> for IngestStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Copy => IngestStrategy::Copy,
            StrategyArg::Pin => IngestStrategy::Pin,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("sha1dc_bridge_core", log::LevelFilter::Debug)
            .filter_module("sha1dc_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Hash {
            paths,
            strategy,
            chunk_size,
            format,
        } => {
            config.apply_cli_overrides(strategy.map(Into::into), chunk_size);
            config.validate()?;
            log::debug!(
                "Hashing {} input(s) with strategy {} in {}-byte regions",
                paths.len().max(1),
                config.bridge.default_strategy,
                config.hash.chunk_size
            );
            run_hash(&config, paths, format)
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_hash(config: &AppConfig, mut paths: Vec<PathBuf>, format: OutputFormat) -> Result<ExitCode> {
    if paths.is_empty() {
        paths.push(PathBuf::from("-"));
    }

    let hasher = Hasher::new(
        SessionManager::new(config.bridge.clone()),
        config.hash.chunk_size,
    );

    let mut reports = Vec::with_capacity(paths.len());
    for path in &paths {
        let report = hasher.hash_path(path)?;
        if report.collision {
            log::warn!("Collision attack detected in {}", report.name);
        }
        if format == OutputFormat::Text {
            println!("{}", output::format_text(&report));
        }
        reports.push(report);
    }

    if format == OutputFormat::Json {
        println!(
            "{}",
            output::format_json(&reports).context("Failed to format results")?
        );
    }

    if reports.iter().any(|r| r.collision) {
        Ok(ExitCode::from(EXIT_COLLISION))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

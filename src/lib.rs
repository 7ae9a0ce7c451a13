// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::Path;

use anyhow::Result;
use tracing::{debug, error, info};

use crate::cli::{CliArgs, CliCommand};
use crate::config::defaults::available_tags;
use crate::config::{create_default_config, load_and_validate, RawConfigFile, WatchConfig, BUILTIN_CATALOG};
use crate::engine::{shutdown_channel, WatchLoop};
use crate::errors::KigoError;
use crate::exec::ProcessExecutor;
use crate::watch::ChangeDetector;

/// High-level entry point used by `main.rs`.
pub async fn run(args: CliArgs) -> Result<()> {
    match args.command {
        CliCommand::Run { config, dry_run } => run_watch(&config, dry_run).await,
        CliCommand::Create { tag, out } => create(&tag, &out),
    }
}

/// `kigo run`: load config, then poll until Ctrl-C or a fatal walk error.
///
/// This wires together:
/// - config loading + pattern compilation
/// - change detector over the real filesystem
/// - process executor
/// - Ctrl-C handling
async fn run_watch(config_path: &Path, dry_run: bool) -> Result<()> {
    let cfg = load_and_validate(config_path)?;

    if dry_run {
        print_dry_run(&cfg)?;
        return Ok(());
    }

    let (shutdown, shutdown_rx) = shutdown_channel();

    // First Ctrl-C → stop at the next cycle boundary; second → exit now.
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            return;
        }
        info!("Ctrl+C received; finishing current cycle (press again to force exit)");
        shutdown.request();

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });

    let watch_loop = WatchLoop::new(
        cfg,
        ChangeDetector::real(),
        ProcessExecutor::new(),
        shutdown_rx,
    );
    watch_loop.run().await?;
    Ok(())
}

/// `kigo create`: materialise a tagged default config.
fn create(tag: &str, out: &Path) -> Result<()> {
    match create_default_config(BUILTIN_CATALOG, tag, out) {
        Ok(()) => {
            println!("Created {} config at {}", tag, out.display());
            Ok(())
        }
        Err(err @ KigoError::UnknownTag(_)) => {
            let tags = available_tags(BUILTIN_CATALOG)?;
            error!(available = ?tags, "unknown default config tag");
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

/// Simple dry-run output: print the effective (validated) config as TOML.
fn print_dry_run(cfg: &WatchConfig) -> Result<()> {
    println!("kigo dry-run");
    for pattern in cfg.include.patterns() {
        println!("  include {:<20} -> {}", pattern.as_str(), pattern.regex_str());
    }
    for pattern in cfg.exclude.patterns() {
        println!("  exclude {:<20} -> {}", pattern.as_str(), pattern.regex_str());
    }
    println!();
    println!("{}", toml::to_string_pretty(&RawConfigFile::from(cfg))?);

    debug!("dry-run complete (no execution)");
    Ok(())
}

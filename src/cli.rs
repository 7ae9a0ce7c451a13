// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `kigo`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "kigo",
    version,
    about = "Poll a directory tree and run commands when watched files change.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `KIGO_LOG` or a default level will be used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Watch the configured tree and run commands on changes.
    Run {
        /// Path to the config file (TOML).
        #[arg(short, long, value_name = "PATH", default_value_os_t = default_config_path())]
        config: PathBuf,

        /// Load and validate the config, print it, and exit.
        #[arg(long)]
        dry_run: bool,
    },

    /// Write one of the built-in default configs to a file.
    Create {
        /// Tag of the default config (e.g. `go`, `rust`).
        #[arg(short, long, value_name = "TAG")]
        tag: String,

        /// Output path for the config.
        #[arg(short, long, value_name = "PATH", default_value_os_t = default_config_path())]
        out: PathBuf,
    },
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

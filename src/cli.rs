// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `monobuild`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "monobuild",
    version,
    about = "Decide whether a build directory of a monorepo must be rebuilt.",
    long_about = None
)]
pub struct CliArgs {
    /// Repository root.
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub repository: PathBuf,

    /// Build directory to decide for, relative to the repository (or an
    /// absolute path inside it).
    #[arg(short, long, value_name = "DIR")]
    pub target: PathBuf,

    /// Path to the config file (TOML).
    ///
    /// Default: `monobuild.toml` at the repository root, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Treat these repo-relative files as the change set instead of asking
    /// git. May be repeated.
    #[arg(long = "changed", value_name = "PATH")]
    pub changed: Vec<String>,

    /// Print the triggering files after `<YES>`.
    #[arg(long)]
    pub list_files: bool,

    /// Load the dependency graph and print it in build order; decide nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MONOBUILD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
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

//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading and output formatting.

use crate::error::CliError;
use clap::ValueEnum;
use normtmp::{Config, ConfigBuilder, Logger, SystemHost};
use serde::Serialize;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Extra configuration file.
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Logger honoring `--verbose`, `--quiet` and `NORMTMP_LOG_MODE`.
    pub fn logger(&self) -> Logger {
        normtmp::init_logger(self.verbose, self.quiet)
    }
}

/// Output format for path-printing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The bare path.
    Text,
    /// A JSON object.
    Json,
}

/// Load layered configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables (highest priority)
/// 2. `--config` file
/// 3. User config file
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref path) = global.config {
        builder = builder.with_config_file(path);
    }

    Ok(builder.build()?)
}

/// The production host, with query settings taken from `config`.
pub fn system_host(config: &Config) -> SystemHost {
    SystemHost::new().with_query_config(config.query_config())
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Io(e.into()))?;
    println!("{json}");
    Ok(())
}

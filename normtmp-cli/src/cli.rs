//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{CompletionsCommand, ExpandCommand, TmpdirCommand};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for printing normalized temp directory paths.
#[derive(Parser)]
#[command(name = "normtmp")]
#[command(version, about = "Print the normalized temp directory", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file as well as the user config
    #[arg(long, value_name = "PATH", global = true, env = "NORMTMP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Print the normalized temp directory
    Tmpdir(TmpdirCommand),

    /// Expand the short (8.3) segments of a Windows path
    Expand(ExpandCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}

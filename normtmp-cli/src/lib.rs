//! Library exports for normtmp-cli.
//!
//! This module exports the CLI structure so the binary and integration
//! tests share one definition.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;

//! Main entry point for the normtmp CLI.
//!
//! - `tmpdir`: Print the normalized temp directory
//! - `expand`: Expand the short segments of a Windows path
//! - `completions`: Generate shell completion scripts

use clap::Parser;
use normtmp_cli::cli::{Cli, Command};
use normtmp_cli::utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config: cli.config,
    };

    // Execute the command
    let result = match cli.command {
        Command::Tmpdir(cmd) => cmd.execute(&global),
        Command::Expand(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

//! Command to print the normalized temp directory.

use crate::error::CliError;
use crate::utils::{load_configuration, print_json, system_host, GlobalOptions, OutputFormat};
use clap::Args;
use normtmp::{Host, NormalizeOptions, Reporting, TmpdirNormalizer};
use serde::Serialize;
use std::sync::Arc;

/// Print the normalized temp directory.
#[derive(Args)]
pub struct TmpdirCommand {
    /// Warn on stderr if a short path segment cannot be expanded
    #[arg(long)]
    pub warn: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct TmpdirReport {
    tmpdir: String,
    raw: String,
}

impl TmpdirCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let logger = global.logger();

        let options = if self.warn {
            NormalizeOptions::new().with_reporting(Reporting::Custom(Arc::new(logger)))
        } else {
            config.normalize_options_with_sink(Arc::new(logger))
        };

        let normalizer = TmpdirNormalizer::new(system_host(&config));
        let tmpdir = normalizer.normalized_tmpdir(&options);
        let raw = normalizer.host().temp_dir();
        if raw != tmpdir {
            logger.info(&format!("Normalized {} to {}", raw.display(), tmpdir.display()));
        }

        match self.format {
            OutputFormat::Text => println!("{}", tmpdir.display()),
            OutputFormat::Json => print_json(&TmpdirReport {
                tmpdir: tmpdir.display().to_string(),
                raw: raw.display().to_string(),
            })?,
        }

        Ok(())
    }
}

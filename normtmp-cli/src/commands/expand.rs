//! Command to expand the short segments of a Windows path.

use crate::error::CliError;
use crate::utils::{load_configuration, print_json, system_host, GlobalOptions, OutputFormat};
use clap::Args;
use normtmp::ShortPathExpander;
use serde::Serialize;

/// Expand the short (8.3) segments of a Windows path.
#[derive(Args)]
pub struct ExpandCommand {
    /// Absolute Windows path, e.g. C:\Users\VERYLO~1
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ExpandReport<'a> {
    input: &'a str,
    expanded: Option<&'a str>,
}

impl ExpandCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.path.trim().is_empty() {
            return Err(CliError::InvalidArguments("PATH cannot be empty".into()));
        }

        let config = load_configuration(global)?;
        let host = system_host(&config);
        let result = ShortPathExpander::new(&host).expand(&self.path);

        match self.format {
            OutputFormat::Text => {
                if let Some(expanded) = result.as_expanded() {
                    println!("{expanded}");
                }
            }
            OutputFormat::Json => print_json(&ExpandReport {
                input: &self.path,
                expanded: result.as_expanded(),
            })?,
        }

        if result.is_unsupported() {
            return Err(CliError::SemanticFailure(format!(
                "Cannot expand {}: not a short path on this platform, or a segment could not be resolved",
                self.path
            )));
        }

        Ok(())
    }
}

//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `NORMTMP_*` environment variables that
//! override configuration file values.

use crate::config::schema::{Config, ReportingMode};
use crate::error::{Error, Result};
use std::env;

/// Overrides `reporting`.
pub const REPORTING_ENV: &str = "NORMTMP_REPORTING";

/// Overrides `query.program`.
pub const QUERY_PROGRAM_ENV: &str = "NORMTMP_QUERY_PROGRAM";

/// Overrides `query.timeout_ms`.
pub const QUERY_TIMEOUT_ENV: &str = "NORMTMP_QUERY_TIMEOUT_MS";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use normtmp::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (unknown reporting mode, non-numeric timeout).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(REPORTING_ENV) {
            config.reporting = Some(Self::parse_reporting(&val)?);
        }

        if let Ok(program) = env::var(QUERY_PROGRAM_ENV) {
            config.query.get_or_insert_with(Default::default).program = Some(program);
        }

        if let Ok(val) = env::var(QUERY_TIMEOUT_ENV) {
            let timeout = val.trim().parse().map_err(|_| Error::Validation {
                field: QUERY_TIMEOUT_ENV.into(),
                message: "Must be a non-negative integer".into(),
            })?;
            config.query.get_or_insert_with(Default::default).timeout_ms = Some(timeout);
        }

        Ok(())
    }

    fn parse_reporting(s: &str) -> Result<ReportingMode> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: REPORTING_ENV.into(),
            message: format!("Invalid reporting mode: '{s}' (expected disabled/default)"),
        })
    }
}

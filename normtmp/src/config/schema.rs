//! Configuration schema definitions.
//!
//! This module defines the YAML configuration structure for normtmp: how
//! temp directory warnings are reported and how the long-name query is run.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::host::{QueryConfig, DEFAULT_QUERY_PROGRAM, DEFAULT_QUERY_TIMEOUT};
use crate::tmpdir::{NormalizeOptions, Reporting, WarningSink};

/// Complete configuration structure.
///
/// Every field is optional so that partial configurations from several
/// sources can be merged.
///
/// # Examples
///
/// ```
/// use normtmp::config::{Config, QuerySettings, ReportingMode};
///
/// let config = Config {
///     reporting: Some(ReportingMode::Default),
///     query: Some(QuerySettings {
///         program: Some("attrib.exe".to_string()),
///         timeout_ms: Some(5_000),
///     }),
/// };
/// assert!(config.normalize_options().reporting.is_enabled());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where warnings from `normalized_tmpdir` go.
    pub reporting: Option<ReportingMode>,

    /// Long-name query settings.
    pub query: Option<QuerySettings>,
}

/// Warning destination selectable from configuration.
///
/// Custom sinks can only be installed programmatically.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportingMode {
    /// Stay silent.
    #[default]
    Disabled,
    /// Warn on stderr.
    Default,
}

impl std::fmt::Display for ReportingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "disabled"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl std::str::FromStr for ReportingMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disabled" => Ok(Self::Disabled),
            "default" => Ok(Self::Default),
            _ => Err(format!("invalid reporting mode: {s}")),
        }
    }
}

/// Settings for the external long-name query.
///
/// # Examples
///
/// ```
/// use normtmp::config::QuerySettings;
/// use std::time::Duration;
///
/// let settings: QuerySettings = serde_yaml::from_str("timeout_ms: 0").unwrap();
/// assert_eq!(settings.to_query_config().timeout, None);
///
/// let settings = QuerySettings::default();
/// assert_eq!(settings.to_query_config().timeout, Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QuerySettings {
    /// Program invoked with the partial path as its only argument.
    pub program: Option<String>,

    /// Milliseconds before the program is killed; 0 waits forever.
    pub timeout_ms: Option<u64>,
}

impl QuerySettings {
    /// Convert to the runtime query configuration, filling in defaults.
    #[must_use]
    pub fn to_query_config(&self) -> QueryConfig {
        let program = self
            .program
            .clone()
            .unwrap_or_else(|| DEFAULT_QUERY_PROGRAM.to_string());
        let timeout = match self.timeout_ms {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => Some(DEFAULT_QUERY_TIMEOUT),
        };
        QueryConfig { program, timeout }
    }
}

impl Config {
    /// Runtime query configuration for [`SystemHost`](crate::SystemHost).
    #[must_use]
    pub fn query_config(&self) -> QueryConfig {
        self.query
            .as_ref()
            .map_or_else(QueryConfig::default, QuerySettings::to_query_config)
    }

    /// Options for `normalized_tmpdir`.
    #[must_use]
    pub fn normalize_options(&self) -> NormalizeOptions {
        let reporting = match self.reporting.unwrap_or_default() {
            ReportingMode::Disabled => Reporting::Disabled,
            ReportingMode::Default => Reporting::DefaultSink,
        };
        NormalizeOptions::new().with_reporting(reporting)
    }

    /// Like [`Config::normalize_options`], but warnings go to `sink`
    /// whenever reporting is enabled.
    #[must_use]
    pub fn normalize_options_with_sink(&self, sink: Arc<dyn WarningSink>) -> NormalizeOptions {
        let reporting = match self.reporting.unwrap_or_default() {
            ReportingMode::Disabled => Reporting::Disabled,
            ReportingMode::Default => Reporting::Custom(sink),
        };
        NormalizeOptions::new().with_reporting(reporting)
    }
}

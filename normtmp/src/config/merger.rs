//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, QuerySettings};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use normtmp::config::{Config, ConfigMerger, ReportingMode};
///
/// let low = Config { reporting: Some(ReportingMode::Disabled), ..Default::default() };
/// let high = Config { reporting: Some(ReportingMode::Default), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.reporting, Some(ReportingMode::Default));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources are applied in order of increasing precedence regardless of
    /// the order they are given in.
    #[must_use]
    pub fn merge(mut sources: Vec<ConfigSource>) -> Config {
        sources.sort_by_key(|s| s.precedence);

        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// Fields are merged one by one: a `None` in `source` never clears a
    /// value already in `target`.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.reporting.is_some() {
            target.reporting = source.reporting;
        }

        if let Some(ref source_query) = source.query {
            target.query = Some(match &target.query {
                Some(target_query) => Self::merge_query(target_query, source_query),
                None => source_query.clone(),
            });
        }
    }

    fn merge_query(target: &QuerySettings, source: &QuerySettings) -> QuerySettings {
        QuerySettings {
            program: source.program.clone().or_else(|| target.program.clone()),
            timeout_ms: source.timeout_ms.or(target.timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ReportingMode;
    use std::path::PathBuf;

    fn source(precedence: u8, yaml: &str) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("config-{precedence}.yaml")),
            precedence,
            config: serde_yaml::from_str(yaml).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(ConfigMerger::merge(Vec::new()), Config::default());
    }

    #[test]
    fn test_higher_precedence_wins() {
        let merged = ConfigMerger::merge(vec![
            source(2, "reporting: default\n"),
            source(1, "reporting: disabled\n"),
        ]);
        assert_eq!(merged.reporting, Some(ReportingMode::Default));
    }

    #[test]
    fn test_query_merged_field_by_field() {
        let merged = ConfigMerger::merge(vec![
            source(1, "query:\n  program: low.exe\n  timeout_ms: 10\n"),
            source(2, "query:\n  timeout_ms: 20\n"),
        ]);
        let query = merged.query.unwrap();
        assert_eq!(query.program.as_deref(), Some("low.exe"));
        assert_eq!(query.timeout_ms, Some(20));
    }

    #[test]
    fn test_none_does_not_clear() {
        let mut target = Config {
            reporting: Some(ReportingMode::Default),
            query: None,
        };
        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.reporting, Some(ReportingMode::Default));
    }
}

//! Builder assembling the final configuration from every source.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{ConfigLoader, ConfigSource};
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Precedence of programmatic overrides; above every file.
const OVERRIDE_PRECEDENCE: u8 = u8::MAX;

/// Builds a [`Config`] by merging defaults, files, environment variables
/// and programmatic overrides.
///
/// # Examples
///
/// ```
/// use normtmp::config::{Config, ConfigBuilder, ReportingMode};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         reporting: Some(ReportingMode::Default),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.reporting, Some(ReportingMode::Default));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// Create a builder that reads the user config and environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the user config from `dir` instead of `~/.normtmp`.
    #[must_use]
    pub fn with_config_dir(mut self, dir: &Path) -> Self {
        self.config_dir = Some(dir.to_path_buf());
        self
    }

    /// Also read `path`, which outranks the user config and must exist.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Apply `config` on top of every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Ignore configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `NORMTMP_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Load, merge and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// variable is invalid, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut sources = Vec::new();

        if !self.skip_files {
            if let Some(user) = ConfigLoader::load_user_config(self.config_dir.as_deref())? {
                log::debug!("Loaded user config from {}", user.path.display());
                sources.push(user);
            }
            if let Some(ref path) = self.config_file {
                sources.push(ConfigLoader::load_explicit(path)?);
                log::debug!("Loaded config from {}", path.display());
            }
        }

        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(overrides) = self.overrides {
            config = ConfigMerger::merge(vec![
                ConfigSource {
                    path: PathBuf::new(),
                    precedence: 0,
                    config,
                },
                ConfigSource {
                    path: PathBuf::new(),
                    precedence: OVERRIDE_PRECEDENCE,
                    config: overrides,
                },
            ]);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{QuerySettings, ReportingMode};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_only() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_explicit_file_outranks_user_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "reporting: default\nquery:\n  program: user.exe\n",
        )
        .unwrap();
        let explicit = dir.path().join("explicit.yaml");
        fs::write(&explicit, "query:\n  program: explicit.exe\n").unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_config_dir(dir.path())
            .with_config_file(&explicit)
            .build()
            .unwrap();

        assert_eq!(config.reporting, Some(ReportingMode::Default));
        assert_eq!(
            config.query.unwrap().program.as_deref(),
            Some("explicit.exe")
        );
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = TempDir::new().unwrap();
        let result = ConfigBuilder::new()
            .skip_env()
            .with_config_dir(dir.path())
            .with_config_file(&dir.path().join("nope.yaml"))
            .build();
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_skip_files_ignores_explicit_file() {
        let dir = TempDir::new().unwrap();
        let config = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config_file(&dir.path().join("nope.yaml"))
            .build()
            .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_win() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.yaml"), "query:\n  timeout_ms: 5\n").unwrap();

        let config = ConfigBuilder::new()
            .skip_env()
            .with_config_dir(dir.path())
            .with_config(Config {
                query: Some(QuerySettings {
                    program: Some("override.exe".into()),
                    timeout_ms: None,
                }),
                ..Default::default()
            })
            .build()
            .unwrap();

        let query = config.query.unwrap();
        assert_eq!(query.program.as_deref(), Some("override.exe"));
        assert_eq!(query.timeout_ms, Some(5));
    }

    #[test]
    fn test_invalid_override_rejected() {
        let result = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                query: Some(QuerySettings {
                    program: Some(String::new()),
                    timeout_ms: None,
                }),
                ..Default::default()
            })
            .build();
        assert!(result.is_err());
    }
}

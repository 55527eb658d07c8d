//! Configuration file discovery and loading.
//!
//! This module handles loading normtmp configuration files from the user
//! config location and from explicitly named paths.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the home directory holding the user config.
pub const USER_CONFIG_DIR: &str = ".normtmp";

/// File name of the user config.
pub const USER_CONFIG_FILE: &str = "config.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
///
/// # Examples
///
/// ```
/// use normtmp::config::ConfigSource;
/// use std::path::PathBuf;
///
/// // User config has lowest precedence
/// let user_config = ConfigSource {
///     path: PathBuf::from("~/.normtmp/config.yaml"),
///     precedence: 1,
///     config: Default::default(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use normtmp::config::ConfigLoader;
///
/// if let Some(source) = ConfigLoader::load_user_config(None).unwrap() {
///     println!("Using {}", source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load the user configuration file, if there is one.
    ///
    /// If `config_dir` is provided, loads from `{config_dir}/config.yaml`.
    /// Otherwise uses `~/.normtmp/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined, or if
    /// the file exists but cannot be read or parsed.
    pub fn load_user_config(config_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match config_dir {
            Some(dir) => dir.join(USER_CONFIG_FILE),
            None => Self::user_config_path()?,
        };

        if !config_path.exists() {
            log::debug!("No user config at {}", config_path.display());
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: 1,
            config,
        }))
    }

    /// Load an explicitly named configuration file.
    ///
    /// Unlike the user config, the file must exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if the file does not exist, or an
    /// error if it cannot be read or parsed.
    pub fn load_explicit(path: &Path) -> Result<ConfigSource> {
        if !path.exists() {
            return Err(Error::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(ConfigSource {
            path: path.to_path_buf(),
            precedence: 2,
            config: Self::load_file(path)?,
        })
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] or [`Error::PermissionDenied`] for a
    /// missing or unreadable file, [`Error::Io`] for any other read failure,
    /// and [`Error::Configuration`] if the YAML does not match the schema.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::PathNotFound {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => Error::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;

        // An empty file is an empty mapping, not an error.
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let config = serde_yaml::from_str(&contents).map_err(|e| {
            log::debug!("Rejected configuration file {}: {e}", path.display());
            Error::Configuration(e)
        })?;
        Ok(config)
    }

    /// Path of the user config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn user_config_path() -> Result<PathBuf> {
        let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
            path: PathBuf::from("~"),
            reason: "Cannot determine home directory".into(),
        })?;
        Ok(home.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
    }
}

//! Configuration system for normtmp.
//!
//! This module provides layered configuration with support for:
//! - A YAML user config file and an explicitly named config file
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`NORMTMP_*`)
//! 3. Explicit config file (via `ConfigBuilder::with_config_file`)
//! 4. User config (`~/.normtmp/config.yaml`)
//! 5. Built-in defaults
//!
//! # File Format
//!
//! ```yaml
//! reporting: default        # or: disabled
//! query:
//!   program: attrib.exe
//!   timeout_ms: 30000       # 0 waits forever
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use normtmp::config::ConfigBuilder;
//! use normtmp::{SystemHost, TmpdirNormalizer};
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! let host = SystemHost::new().with_query_config(config.query_config());
//! let tmpdir = TmpdirNormalizer::new(host).normalized_tmpdir(&config.normalize_options());
//! println!("{}", tmpdir.display());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, QuerySettings, ReportingMode};
pub use validator::ConfigValidator;

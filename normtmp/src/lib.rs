#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # normtmp
//!
//! A library for obtaining the OS temp directory in a form that compares
//! equal to other real paths.
//!
//! The reported temp directory may pass through a symbolic link (macOS
//! `/var` → `/private/var`) or, on Windows, contain short 8.3 segments
//! (`C:\Users\VERYLO~1\...`). This library resolves the former and expands
//! the latter, memoizing the expensive expansion per temp directory.
//!
//! ## Core Types
//!
//! - [`normalized_tmpdir`] and [`TmpdirNormalizer`]: The normalized temp directory
//! - [`expand_short_path`] and [`ShortPathExpander`]: Short path expansion
//! - [`TmpdirCache`]: Memoized expansion outcomes
//! - [`Host`] and [`SystemHost`]: Operating system access
//! - [`Config`] and [`ConfigBuilder`]: Layered configuration
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use normtmp::{normalized_tmpdir, NormalizeOptions, Reporting};
//!
//! let options = NormalizeOptions::new().with_reporting(Reporting::DefaultSink);
//! let tmpdir = normalized_tmpdir(&options);
//! assert!(tmpdir.is_absolute());
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod path;
pub mod tmpdir;

// Re-export key types at crate root for convenience
pub use cache::TmpdirCache;
pub use config::{Config, ConfigBuilder};
pub use error::{Error, ExpansionFailure, Result};
pub use host::{FileIdentity, Host, Platform, QueryConfig, SystemHost};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{ExpansionResult, ShortPathExpander};
pub use tmpdir::{
    expand_short_path, normalized_tmpdir, reset_cache, NormalizeOptions, Reporting,
    TmpdirNormalizer, WarningSink,
};

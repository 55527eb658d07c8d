//! Normalized temp directory paths.
//!
//! The OS temp directory is compared against other paths surprisingly often
//! (test fixtures, sandbox checks), and two platform quirks break those
//! comparisons: macOS reports `/var/...` where the real path is
//! `/private/var/...`, and Windows may report short (8.3) segments such as
//! `C:\Users\VERYLO~1\AppData\Local\Temp`. [`TmpdirNormalizer`] resolves the
//! real path on every call and, on Windows, expands short segments once per
//! distinct temp directory through a [`TmpdirCache`].

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::TmpdirCache;
use crate::host::{Host, SystemHost};
use crate::logging::{init_logger, Logger};
use crate::path::classify::has_short_segment;
use crate::path::{ExpansionResult, ShortPathExpander};

/// Destination for the warning emitted when the temp directory keeps a
/// short segment.
///
/// # Examples
///
/// ```
/// use normtmp::WarningSink;
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct Collect(Mutex<Vec<String>>);
///
/// impl WarningSink for Collect {
///     fn warn(&self, message: &str) {
///         self.0.lock().unwrap().push(message.to_string());
///     }
/// }
/// ```
pub trait WarningSink: Send + Sync {
    /// Accept a human-readable warning.
    fn warn(&self, message: &str);
}

/// Where, if anywhere, normalization warnings are reported.
#[derive(Clone, Default)]
pub enum Reporting {
    /// Do not report anything.
    #[default]
    Disabled,
    /// Report through the stderr [`Logger`], at the level `NORMTMP_LOG_MODE`
    /// selects.
    DefaultSink,
    /// Report through a caller-provided sink.
    Custom(Arc<dyn WarningSink>),
}

impl Reporting {
    /// Whether warnings will be emitted at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    fn default_logger() -> Logger {
        init_logger(false, false)
    }

    fn warn(&self, message: &str) {
        match self {
            Self::Disabled => {}
            Self::DefaultSink => Self::default_logger().warn(message),
            Self::Custom(sink) => sink.warn(message),
        }
    }
}

impl fmt::Debug for Reporting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => write!(f, "Disabled"),
            Self::DefaultSink => write!(f, "DefaultSink"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Options for [`TmpdirNormalizer::normalized_tmpdir`].
///
/// # Examples
///
/// ```
/// use normtmp::{NormalizeOptions, Reporting};
///
/// let options = NormalizeOptions::default();
/// assert!(!options.reporting.is_enabled());
///
/// let options = NormalizeOptions::new().with_reporting(Reporting::DefaultSink);
/// assert!(options.reporting.is_enabled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Warning destination when a short segment cannot be expanded.
    pub reporting: Reporting,
}

impl NormalizeOptions {
    /// Options with reporting disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the warning destination.
    #[must_use]
    pub fn with_reporting(mut self, reporting: Reporting) -> Self {
        self.reporting = reporting;
        self
    }
}

/// Message reported when `tmpdir` still contains a short segment.
#[must_use]
pub fn short_tmpdir_warning(tmpdir: &str) -> String {
    format!(
        "temp directory \"{tmpdir}\" contains a short (8.3) path segment which could not be \
         expanded by available heuristics. This may cause issues with tests or utilities \
         which rely on path comparisons."
    )
}

/// Computes normalized temp directory paths from a [`Host`], memoizing
/// short path expansions in a [`TmpdirCache`].
///
/// # Examples
///
/// ```
/// use normtmp::{NormalizeOptions, SystemHost, TmpdirCache, TmpdirNormalizer};
///
/// let cache = TmpdirCache::new();
/// let normalizer = TmpdirNormalizer::with_cache(SystemHost::new(), &cache);
///
/// let tmpdir = normalizer.normalized_tmpdir(&NormalizeOptions::default());
/// assert!(tmpdir.is_absolute());
/// assert!(tmpdir.exists());
/// ```
#[derive(Debug)]
pub struct TmpdirNormalizer<'c, H> {
    host: H,
    cache: &'c TmpdirCache,
}

impl<H: Host> TmpdirNormalizer<'static, H> {
    /// Create a normalizer that shares the process-wide cache.
    #[must_use]
    pub fn new(host: H) -> Self {
        Self::with_cache(host, TmpdirCache::global())
    }
}

impl<'c, H: Host> TmpdirNormalizer<'c, H> {
    /// Create a normalizer with its own cache.
    #[must_use]
    pub fn with_cache(host: H, cache: &'c TmpdirCache) -> Self {
        Self { host, cache }
    }

    /// The host this normalizer queries.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The cache this normalizer populates.
    #[must_use]
    pub fn cache(&self) -> &'c TmpdirCache {
        self.cache
    }

    /// Expand the short segments of an absolute Windows path.
    ///
    /// Not cached; see [`ShortPathExpander::expand`].
    pub fn expand_short_path(&self, short_path: &str) -> ExpansionResult {
        ShortPathExpander::new(&self.host).expand(short_path)
    }

    /// The OS temp directory with symbolic links resolved and, on Windows,
    /// short segments expanded.
    ///
    /// Never fails: if the temp directory cannot be resolved the raw value
    /// is used, and if a short segment cannot be expanded the resolved path
    /// is returned as is, with a warning when `options` enable reporting.
    pub fn normalized_tmpdir(&self, options: &NormalizeOptions) -> PathBuf {
        let raw = self.host.temp_dir();
        let resolved = match self.host.real_path(&raw) {
            Ok(real) => real,
            Err(e) => {
                log::debug!("Cannot resolve temp directory {}: {e}", raw.display());
                raw
            }
        };

        if !self.host.platform().is_short_path_prone() {
            return resolved;
        }
        let Some(resolved_str) = resolved.to_str() else {
            return resolved;
        };
        if !has_short_segment(resolved_str) {
            return resolved;
        }

        let outcome = self
            .cache
            .get_or_compute(resolved_str, || self.expand_short_path(resolved_str));

        match outcome.as_expanded() {
            Some(long_path) if !has_short_segment(long_path) => PathBuf::from(long_path),
            _ => {
                options.reporting.warn(&short_tmpdir_warning(resolved_str));
                resolved
            }
        }
    }
}

/// Expand the short segments of an absolute Windows path using the real
/// operating system.
///
/// # Examples
///
/// ```
/// use normtmp::{expand_short_path, ExpansionResult};
///
/// assert_eq!(expand_short_path("relative\\PROGRA~1"), ExpansionResult::Unsupported);
/// ```
#[must_use]
pub fn expand_short_path(short_path: &str) -> ExpansionResult {
    ShortPathExpander::new(&SystemHost::new()).expand(short_path)
}

/// The normalized OS temp directory, memoized in the process-wide cache.
///
/// # Examples
///
/// ```
/// use normtmp::{normalized_tmpdir, NormalizeOptions};
///
/// let tmpdir = normalized_tmpdir(&NormalizeOptions::default());
/// assert!(tmpdir.is_absolute());
/// ```
#[must_use]
pub fn normalized_tmpdir(options: &NormalizeOptions) -> PathBuf {
    TmpdirNormalizer::new(SystemHost::new()).normalized_tmpdir(options)
}

/// Forget every memoized temp directory expansion.
pub fn reset_cache() {
    TmpdirCache::global().reset();
}

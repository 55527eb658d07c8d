//! Error types for the normtmp library.
//!
//! Two families live here. [`Error`] is the ordinary, propagated error used
//! by configuration loading and real-path helpers. [`ExpansionFailure`]
//! describes why a short path could not be expanded; it never leaves the
//! expander, which collapses every variant into
//! [`ExpansionResult::Unsupported`](crate::ExpansionResult::Unsupported).

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a normtmp error.
///
/// # Examples
///
/// ```
/// use normtmp::{Error, Result};
///
/// fn example_operation() -> Result<u64> {
///     Ok(30_000)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the normtmp library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Permission denied accessing a path.
    #[error("permission denied: {}", path.display())]
    PermissionDenied {
        /// The path that could not be accessed.
        path: PathBuf,
    },
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use normtmp::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PathNotFound { .. })
    }

    /// Check if error is permission-related.
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

/// Why a short path could not be expanded.
///
/// Only ever observed in debug logs; callers of the expander see a plain
/// `Unsupported`.
#[derive(Debug, Error)]
pub enum ExpansionFailure {
    /// Short path expansion only exists on Windows.
    #[error("short path expansion is not supported on {platform}")]
    UnsupportedPlatform {
        /// The platform the process runs on.
        platform: crate::host::Platform,
    },

    /// The input is relative, a network path, or otherwise not `X:\...`.
    #[error("not a local absolute drive path: {path}")]
    UnsupportedPathShape {
        /// The rejected input.
        path: String,
    },

    /// The short user directory and the home directory are different objects.
    #[error("{prefix} is not the home directory {home}")]
    IdentityMismatch {
        /// The user directory prefix of the short path.
        prefix: String,
        /// The home directory it was compared with.
        home: String,
    },

    /// The external long-name query failed or returned something unusable.
    #[error("long name query for {path} failed: {reason}")]
    QueryFailure {
        /// The partial path that was queried.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// The reassembled long path does not exist.
    #[error("expanded path does not exist: {path}")]
    PostExpansionVerificationFailure {
        /// The reassembled path.
        path: String,
    },
}

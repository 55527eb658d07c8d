//! Memoized short path expansions of the temp directory.
//!
//! Expanding a short path may spawn one process per short segment, so each
//! distinct temp directory is expanded at most once per cache lifetime. A
//! failed expansion is remembered as well and is not retried.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

use crate::path::ExpansionResult;

static GLOBAL_CACHE: Lazy<TmpdirCache> = Lazy::new(TmpdirCache::new);

/// Cache of expansion outcomes keyed by the raw temp directory string.
///
/// A missing key means expansion was never attempted; a stored
/// [`ExpansionResult::Unsupported`] means it was attempted and failed.
/// Entries live until [`TmpdirCache::reset`].
///
/// # Examples
///
/// ```
/// use normtmp::{ExpansionResult, TmpdirCache};
///
/// let cache = TmpdirCache::new();
/// let key = r"C:\Users\VERYLO~1\AppData\Local\Temp";
/// assert_eq!(cache.get(key), None);
///
/// cache.set(key, ExpansionResult::Unsupported);
/// assert_eq!(cache.get(key), Some(ExpansionResult::Unsupported));
///
/// cache.reset();
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct TmpdirCache {
    entries: Mutex<HashMap<String, ExpansionResult>>,
}

impl TmpdirCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by [`crate::normalized_tmpdir`].
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL_CACHE
    }

    // Entries are only ever inserted whole, so a panic elsewhere cannot
    // leave the map half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, ExpansionResult>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stored outcome for `key`, or `None` if never attempted.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ExpansionResult> {
        self.lock().get(key).cloned()
    }

    /// Store the outcome for `key`, replacing any previous one.
    pub fn set(&self, key: &str, value: ExpansionResult) {
        self.lock().insert(key.to_string(), value);
    }

    /// Return the stored outcome for `key`, computing and storing it first
    /// if this is the first request.
    ///
    /// The lock is held while `compute` runs, so concurrent callers asking
    /// for the same key wait for the first computation instead of repeating
    /// it.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> ExpansionResult
    where
        F: FnOnce() -> ExpansionResult,
    {
        let mut entries = self.lock();
        if let Some(cached) = entries.get(key) {
            log::debug!("Using cached expansion for {key}");
            return cached.clone();
        }
        let value = compute();
        entries.insert(key.to_string(), value.clone());
        value
    }

    /// Forget every stored outcome.
    pub fn reset(&self) {
        self.lock().clear();
    }

    /// Number of stored outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

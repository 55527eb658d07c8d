//! Common test utilities for integration tests.
//!
//! This module provides a scripted [`Host`] that behaves like a small
//! Windows machine: a table of existing paths with identities, a home
//! directory, a temp directory, and canned long-name query answers. Every
//! call is counted so tests can assert on how much work was done.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use normtmp::{FileIdentity, Host, Platform};

/// Scripted host with call counters.
#[allow(dead_code)]
pub struct ScriptedHost {
    platform: Platform,
    temp_dir: PathBuf,
    home_dir: Option<PathBuf>,
    /// Existing paths and their identities.
    objects: HashMap<PathBuf, u64>,
    /// Symbolic links: path → target.
    links: HashMap<PathBuf, PathBuf>,
    /// Query input → raw output (`Err` text becomes an I/O error).
    answers: HashMap<String, Result<String, String>>,
    queries: Mutex<Vec<String>>,
    identity_calls: AtomicUsize,
    home_calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedHost {
    /// A Windows host whose temp directory is `temp_dir`.
    pub fn windows(temp_dir: &str) -> Self {
        Self {
            platform: Platform::Windows,
            temp_dir: PathBuf::from(temp_dir),
            home_dir: None,
            objects: HashMap::new(),
            links: HashMap::new(),
            answers: HashMap::new(),
            queries: Mutex::new(Vec::new()),
            identity_calls: AtomicUsize::new(0),
            home_calls: AtomicUsize::new(0),
        }
    }

    /// Same as [`ScriptedHost::windows`] on another platform.
    pub fn on(platform: Platform, temp_dir: &str) -> Self {
        Self {
            platform,
            ..Self::windows(temp_dir)
        }
    }

    /// Set the home directory.
    pub fn with_home(mut self, home: &str) -> Self {
        self.home_dir = Some(PathBuf::from(home));
        self
    }

    /// Register an existing filesystem object with identity `id`.
    pub fn with_object(mut self, path: &str, id: u64) -> Self {
        self.objects.insert(PathBuf::from(path), id);
        self
    }

    /// Make `path` a symbolic link to `target`.
    pub fn with_link(mut self, path: &str, target: &str) -> Self {
        self.links.insert(PathBuf::from(path), PathBuf::from(target));
        self
    }

    /// Make the resolver print `long_path` for `partial`.
    pub fn answering(mut self, partial: &str, long_path: &str) -> Self {
        self.answers.insert(
            partial.to_string(),
            Ok(format!("A                  {long_path}\r\n")),
        );
        self
    }

    /// Make the resolver print `output` verbatim for `partial`.
    pub fn printing(mut self, partial: &str, output: &str) -> Self {
        self.answers
            .insert(partial.to_string(), Ok(output.to_string()));
        self
    }

    /// Make the resolver fail to run for `partial`.
    pub fn failing(mut self, partial: &str, reason: &str) -> Self {
        self.answers
            .insert(partial.to_string(), Err(reason.to_string()));
        self
    }

    /// Partial paths queried so far, in order.
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    /// Number of identity lookups so far.
    pub fn identity_calls(&self) -> usize {
        self.identity_calls.load(Ordering::SeqCst)
    }

    /// Number of home directory lookups so far.
    pub fn home_calls(&self) -> usize {
        self.home_calls.load(Ordering::SeqCst)
    }
}

impl Host for ScriptedHost {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn exists(&self, path: &Path) -> bool {
        self.objects.contains_key(path) || self.links.contains_key(path)
    }

    fn file_identity(&self, path: &Path) -> io::Result<FileIdentity> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        let path = self.real_path(path)?;
        Ok(FileIdentity::from_raw(self.objects[&path]))
    }

    fn real_path(&self, path: &Path) -> io::Result<PathBuf> {
        let target = self.links.get(path).map_or(path, PathBuf::as_path);
        if self.objects.contains_key(target) {
            Ok(target.to_path_buf())
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", target.display()),
            ))
        }
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home_calls.fetch_add(1, Ordering::SeqCst);
        self.home_dir.clone()
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone()
    }

    fn query_long_name(&self, path: &str) -> io::Result<String> {
        self.queries.lock().unwrap().push(path.to_string());
        match self.answers.get(path) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(reason)) => Err(io::Error::new(io::ErrorKind::Other, reason.clone())),
            None => Ok(format!("File not found - {path}\r\n")),
        }
    }
}

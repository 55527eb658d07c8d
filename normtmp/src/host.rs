//! Host capabilities consumed by the expander and the temp-dir entry point.
//!
//! Everything that touches the operating system goes through the [`Host`]
//! trait so the expansion logic can be exercised on any platform with
//! scripted collaborators. [`SystemHost`] is the production implementation.

use std::env;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Program used to resolve the last segment of a path to its long name.
///
/// `attrib.exe` exists to get and set file attributes, but it always prints
/// the long form of the path it was given.
pub const DEFAULT_QUERY_PROGRAM: &str = "attrib.exe";

/// Default upper bound on a single long-name query.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(30);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Operating system family the process runs on.
///
/// # Examples
///
/// ```
/// use normtmp::Platform;
///
/// assert!(Platform::Windows.is_short_path_prone());
/// assert!(!Platform::Linux.is_short_path_prone());
/// assert_eq!(Platform::MacOs.to_string(), "macos");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Microsoft Windows.
    Windows,
    /// Apple macOS.
    MacOs,
    /// Linux.
    Linux,
    /// Anything else.
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Whether paths on this platform may contain short (8.3) segments.
    #[must_use]
    pub const fn is_short_path_prone(self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Opaque identity of a filesystem object.
///
/// Two identities compare equal only if they denote the same underlying
/// object (volume serial and file index on Windows, device and inode on
/// Unix), regardless of the path used to reach it.
///
/// # Examples
///
/// ```
/// use normtmp::FileIdentity;
///
/// assert_eq!(FileIdentity::from_raw(7), FileIdentity::from_raw(7));
/// assert_ne!(FileIdentity::from_raw(7), FileIdentity::from_raw(8));
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct FileIdentity(IdentityRepr);

#[derive(Debug, PartialEq, Eq)]
enum IdentityRepr {
    Handle(same_file::Handle),
    Raw(u64),
}

impl FileIdentity {
    /// Identify the object at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be opened.
    pub fn of(path: &Path) -> io::Result<Self> {
        same_file::Handle::from_path(path).map(|handle| Self(IdentityRepr::Handle(handle)))
    }

    /// Build an identity from a raw number, for hosts that track objects
    /// themselves.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(IdentityRepr::Raw(id))
    }
}

/// Capabilities the short path expander and temp-dir normalization need
/// from the operating system.
#[cfg_attr(test, mockall::automock)]
pub trait Host {
    /// Which OS family the process runs on.
    fn platform(&self) -> Platform;

    /// Whether `path` currently exists.
    fn exists(&self, path: &Path) -> bool;

    /// Identity of the filesystem object at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be inspected.
    fn file_identity(&self, path: &Path) -> io::Result<FileIdentity>;

    /// Fully resolved form of `path`, with all symbolic links removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or cannot be resolved.
    fn real_path(&self, path: &Path) -> io::Result<PathBuf>;

    /// The current user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// The OS-configured temporary directory.
    fn temp_dir(&self) -> PathBuf;

    /// Ask the OS for the long form of the last segment of `path`, returning
    /// the raw text output of the resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver cannot be run, times out, or prints
    /// something that is not text.
    fn query_long_name(&self, path: &str) -> io::Result<String>;
}

/// Settings for the external long-name query.
///
/// # Examples
///
/// ```
/// use normtmp::QueryConfig;
/// use std::time::Duration;
///
/// let config = QueryConfig::default();
/// assert_eq!(config.program, "attrib.exe");
/// assert_eq!(config.timeout, Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Program to run; it receives the partial path as its only argument.
    pub program: String,
    /// Kill the program if it runs longer than this. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_QUERY_PROGRAM.to_string(),
            timeout: Some(DEFAULT_QUERY_TIMEOUT),
        }
    }
}

/// Production [`Host`] backed by the standard library and the OS.
///
/// # Examples
///
/// ```
/// use normtmp::{Host, Platform, SystemHost};
///
/// let host = SystemHost::new();
/// assert_eq!(host.platform(), Platform::current());
/// assert!(host.exists(&host.temp_dir()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SystemHost {
    query: QueryConfig,
}

impl SystemHost {
    /// Create a host with the default query settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom settings for the long-name query.
    #[must_use]
    pub fn with_query_config(mut self, query: QueryConfig) -> Self {
        self.query = query;
        self
    }

    /// Current query settings.
    #[must_use]
    pub fn query_config(&self) -> &QueryConfig {
        &self.query
    }

    fn wait_with_deadline(&self, child: &mut Child, timeout: Duration) -> io::Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if child.try_wait()?.is_some() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                // The child may have exited between the two checks.
                let _ = child.kill();
                let _ = child.wait();
                return Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("{} did not exit within {timeout:?}", self.query.program),
                ));
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl Host for SystemHost {
    fn platform(&self) -> Platform {
        Platform::current()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn file_identity(&self, path: &Path) -> io::Result<FileIdentity> {
        FileIdentity::of(path)
    }

    fn real_path(&self, path: &Path) -> io::Result<PathBuf> {
        // std's canonicalize yields `\\?\C:\...` on Windows, which is not a
        // drive-absolute path as far as the classifier is concerned.
        dunce::canonicalize(path)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        home::home_dir()
    }

    fn temp_dir(&self) -> PathBuf {
        env::temp_dir()
    }

    fn query_long_name(&self, path: &str) -> io::Result<String> {
        let mut child = Command::new(&self.query.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        // The resolver prints a single line, well under pipe capacity, so
        // waiting before draining stdout cannot deadlock.
        if let Some(timeout) = self.query.timeout {
            self.wait_with_deadline(&mut child, timeout)?;
        }

        let output = child.wait_with_output()?;
        String::from_utf8(output.stdout)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

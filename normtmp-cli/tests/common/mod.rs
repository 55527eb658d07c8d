//! Common test utilities for CLI integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const NORMTMP_VARS: [&str; 5] = [
    "NORMTMP_CONFIG",
    "NORMTMP_LOG_MODE",
    "NORMTMP_REPORTING",
    "NORMTMP_QUERY_PROGRAM",
    "NORMTMP_QUERY_TIMEOUT_MS",
];

/// Test environment with an isolated home directory.
///
/// The user config is read from the home directory, so each test gets an
/// empty one and no `NORMTMP_*` variables leak in from the caller.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Stand-in home directory
    pub home: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let home = temp_dir.path().join("home");
        fs::create_dir_all(&home).expect("Failed to create home dir");
        Self { temp_dir, home }
    }

    /// The normtmp binary, isolated from the real user config.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("normtmp").expect("Failed to find normtmp binary");
        cmd.env("HOME", &self.home).env("USERPROFILE", &self.home);
        for var in NORMTMP_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Write the user config file.
    pub fn write_user_config(&self, content: &str) {
        let dir = self.home.join(".normtmp");
        fs::create_dir_all(&dir).expect("Failed to create config dir");
        fs::write(dir.join("config.yaml"), content).expect("Failed to write config");
    }

    /// Write a config file outside the home directory and return its path.
    pub fn write_config(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write config");
        path
    }
}

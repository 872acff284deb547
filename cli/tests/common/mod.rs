//! Common test utilities for anypay CLI tests

#![allow(dead_code)]

use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Account id written by the default test config
pub const TEST_ACCOUNT_ID: &str = "1234";

/// API key written by the default test config
pub const TEST_API_KEY: &str = "test-api-key-0000";

/// Project id and notification secret used by the link golden value
pub const TEST_PROJECT_ID: &str = "42";
pub const TEST_SECRET: &str = "s3cr3t";

/// An address nothing listens on, so requests fail fast with a connection error
pub const UNREACHABLE_API_URL: &str = "http://127.0.0.1:1/api";

/// Builder for creating test configurations
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    lines: Vec<String>,
}

impl TestConfigBuilder {
    /// Create a builder with the default account id and API key
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            lines: Vec::new(),
        }
        .with("account_id", TEST_ACCOUNT_ID)
        .with("api_key", TEST_API_KEY)
    }

    /// Add a string setting
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.lines.push(format!("{key} = \"{value}\""));
        self
    }

    /// Add project id and notification secret
    pub fn with_project(self) -> Self {
        self.with("project_id", TEST_PROJECT_ID)
            .with("secret", TEST_SECRET)
    }

    /// Point the API at an address that refuses connections
    pub fn unreachable(self) -> Self {
        self.with("api_url", UNREACHABLE_API_URL)
    }

    /// Add a raw TOML line
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Write `$HOME/.anypay/config.toml` and return the fake home directory
    pub fn build(self) -> TempDir {
        let anypay_dir = self.temp_dir.path().join(".anypay");
        fs::create_dir_all(&anypay_dir).expect("Failed to create anypay directory");

        let mut config = self.lines.join("\n");
        config.push('\n');
        fs::write(anypay_dir.join("config.toml"), config).expect("Failed to write config");

        self.temp_dir
    }
}

/// Home directory with a config holding credentials and project settings
pub fn setup_test_config() -> TempDir {
    TestConfigBuilder::new().with_project().build()
}

/// Home directory without any config file
pub fn empty_home() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Path of the default config file inside a test home directory
pub fn config_file(temp_dir: &TempDir) -> std::path::PathBuf {
    temp_dir.path().join(".anypay").join("config.toml")
}

/// Create a test command with proper environment variables set
///
/// HOME points at the temp directory so anypay uses `$HOME/.anypay/`, and
/// any `ANYPAY_*` variables from the outer environment are removed.
pub fn test_command(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("anypay"));

    cmd.env("HOME", temp_dir.path());
    for var in [
        "ANYPAY_ACCOUNT_ID",
        "ANYPAY_API_KEY",
        "ANYPAY_PROJECT_ID",
        "ANYPAY_SECRET",
        "ANYPAY_API_URL",
        "ANYPAY_MERCHANT_URL",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }

    cmd
}

//! # Pure Data Module - Data Transfer Objects Only
//!
//! Configuration data structures and the TOML → DTO mapping.
//!
//! This module contains data only: no validation and no default value
//! calculation. Empty strings and zero values are facts handed to the host,
//! which decides what to fall back to.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL, e.g. `https://api.example.com`
    pub api_base_url: String,

    /// Per-request timeout in seconds (0 means "not set")
    pub api_timeout_secs: u64,

    /// Key-value store file (path info only, no existence check)
    pub storage_path: PathBuf,

    /// Directory for log files (may be empty)
    pub log_dir: PathBuf,

    /// Clinical-factors verification attempts (0 means "not set")
    pub clinical_retry_attempts: u32,

    /// Delay between clinical-factors attempts in milliseconds
    pub clinical_retry_delay_ms: u64,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// This method must NOT contain any validation or default value logic.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let section = |name: &str, key: &str| toml_value.get(name).and_then(|s| s.get(key));

        Ok(Self {
            api_base_url: section("api", "base_url")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            api_timeout_secs: section("api", "timeout_secs")
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            storage_path: PathBuf::from(
                section("storage", "path")
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            log_dir: PathBuf::from(
                section("logging", "dir")
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            clinical_retry_attempts: section("retry", "clinical_attempts")
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u32,
            clinical_retry_delay_ms: section("retry", "clinical_delay_ms")
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
        })
    }
}

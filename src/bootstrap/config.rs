//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Read the TOML configuration file
//! - Parse TOML into the `AppConfig` DTO
//! - Report I/O and parsing errors with context
//!
//! No validation and no default values here. Empty fields are handed to
//! [`wiring`](super::wiring), which decides what to fall back to.

use std::path::{Path, PathBuf};

use anyhow::Context;
use gc_core::config::AppConfig;

pub const APP_DIR_NAME: &str = "gerd-coach";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Load the config at `path`, or an all-empty config when no file exists.
///
/// A file that exists but fails to parse is still an error.
pub fn load_config_or_empty(path: &Path) -> anyhow::Result<AppConfig> {
    if path.exists() {
        return load_config(path.to_path_buf());
    }
    AppConfig::from_toml(&toml::Value::Table(toml::Table::new()))
}

/// `<config dir>/gerd-coach/config.toml`, falling back to the working
/// directory when the platform has no config dir.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_default()
        .join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [api]
            base_url = "https://coach.example.com"
            timeout_secs = 15

            [storage]
            path = "/path/to/store.json"

            [retry]
            clinical_attempts = 4
            clinical_delay_ms = 250
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.api_base_url, "https://coach.example.com");
        assert_eq!(config.api_timeout_secs, 15);
        assert_eq!(config.storage_path, PathBuf::from("/path/to/store.json"));
        assert_eq!(config.clinical_retry_attempts, 4);
        assert_eq!(config.clinical_retry_delay_ms, 250);
    }

    #[test]
    fn test_load_config_reports_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[api\nbase_url = ").unwrap();

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = load_config(path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_missing_file_yields_empty_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config_or_empty(&temp_dir.path().join("missing.toml")).unwrap();

        assert_eq!(config.api_base_url, "");
        assert_eq!(config.storage_path, PathBuf::new());
    }

    #[test]
    fn test_default_config_path_ends_with_app_file() {
        let path = default_config_path();
        assert!(path.ends_with(Path::new(APP_DIR_NAME).join(CONFIG_FILE_NAME))
            || path == PathBuf::from(CONFIG_FILE_NAME));
    }
}

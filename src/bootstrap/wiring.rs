//! # Dependency Injection
//!
//! ## Responsibilities
//!
//! - Create infra implementations (HTTP client, key-value store, clock)
//! - Inject them into [`AppDeps`] through the port traits
//! - Fill in host defaults for config fields left empty
//!
//! This is the only place that depends on gc-infra and gc-app at once. It
//! assembles; it does not decide anything about onboarding or sessions.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use gc_app::AppDeps;
use gc_core::config::AppConfig;
use gc_core::ports::KeyValueStorePort;
use gc_core::{Backoff, RetryPolicy};
use gc_infra::{FileKeyValueStore, HttpBackendClient, SystemClock, TokioSleeper};
use tracing::info;

use super::config::APP_DIR_NAME;

pub const DEFAULT_API_TIMEOUT: Duration = Duration::from_secs(30);

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Configuration incomplete: {0}")]
    MissingConfig(String),

    #[error("Storage initialization failed: {0}")]
    StorageInit(String),

    #[error("HTTP client initialization failed: {0}")]
    HttpInit(String),
}

/// Storage file from config, or `<data dir>/gerd-coach/local_store.json`.
pub fn resolve_storage_path(config: &AppConfig) -> WiringResult<PathBuf> {
    if !config.storage_path.as_os_str().is_empty() {
        return Ok(config.storage_path.clone());
    }
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| WiringError::StorageInit("no data directory on this platform".into()))?;
    Ok(FileKeyValueStore::with_defaults(data_dir.join(APP_DIR_NAME))
        .path()
        .to_path_buf())
}

/// Log directory from config, or `<data dir>/gerd-coach/logs`.
pub fn resolve_log_dir(config: &AppConfig) -> Option<PathBuf> {
    if !config.log_dir.as_os_str().is_empty() {
        return Some(config.log_dir.clone());
    }
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join("logs"))
}

/// Clinical-factors policy; unset fields keep the 3 x 500 ms default.
///
/// A zero delay is read as "not set", so the backend always gets time to
/// catch up between attempts.
pub fn resolve_clinical_retry(config: &AppConfig) -> RetryPolicy {
    if config.clinical_retry_attempts == 0 {
        return RetryPolicy::clinical_factors();
    }
    let delay = match config.clinical_retry_delay_ms {
        0 => RetryPolicy::CLINICAL_FACTORS_DELAY,
        ms => Duration::from_millis(ms),
    };
    RetryPolicy::new(config.clinical_retry_attempts, Backoff::Fixed(delay))
}

fn resolve_timeout(config: &AppConfig) -> Duration {
    match config.api_timeout_secs {
        0 => DEFAULT_API_TIMEOUT,
        secs => Duration::from_secs(secs),
    }
}

/// Wire every port against the given store.
pub fn wire_with_store(
    config: &AppConfig,
    store: Arc<dyn KeyValueStorePort>,
) -> WiringResult<AppDeps> {
    if config.api_base_url.trim().is_empty() {
        return Err(WiringError::MissingConfig("[api] base_url is not set".into()));
    }

    let client = HttpBackendClient::new(&config.api_base_url, resolve_timeout(config), store.clone())
        .map_err(|e| WiringError::HttpInit(e.to_string()))?;
    let client = Arc::new(client);

    Ok(AppDeps {
        profile_api: client.clone(),
        questionnaire_api: client.clone(),
        habit_api: client.clone(),
        content_api: client.clone(),
        auth_api: client,
        store,
        clock: Arc::new(SystemClock),
        sleeper: Arc::new(TokioSleeper),
        clinical_retry: resolve_clinical_retry(config),
    })
}

/// Wire the application against the file-backed store.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    let storage_path = resolve_storage_path(config)?;
    info!(path = %storage_path.display(), base_url = %config.api_base_url, "wiring dependencies");
    let store: Arc<dyn KeyValueStorePort> = Arc::new(FileKeyValueStore::new(storage_path));
    wire_with_store(config, store)
}

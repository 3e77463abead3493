//! File-based key-value store
//!
//! Persists the whole map as one JSON object in the application data
//! directory. Every write rewrites the file under a per-instance lock, so two
//! writes to the same key never interleave. Writes go through a temp file and
//! a rename; a corrupt file fails reads but is replaced by the next write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use gc_core::ports::KeyValueStorePort;

pub const DEFAULT_STORE_FILE: &str = "local_store.json";

type Entries = BTreeMap<String, String>;

pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create store with custom file path
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Create store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn read_content(&self) -> anyhow::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).await?;
        Ok((!content.trim().is_empty()).then_some(content))
    }

    async fn read_entries(&self) -> anyhow::Result<Entries> {
        match self.read_content().await? {
            Some(content) => serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse local store: {}", e)),
            None => Ok(Entries::new()),
        }
    }

    /// Entries to rewrite, and whether the file on disk was corrupt. A corrupt
    /// file is replaced rather than blocking every later write.
    async fn entries_for_write(&self) -> anyhow::Result<(Entries, bool)> {
        let Some(content) = self.read_content().await? else {
            return Ok((Entries::new(), false));
        };
        match serde_json::from_str(&content) {
            Ok(entries) => Ok((entries, false)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "local store is corrupt, starting over");
                Ok((Entries::new(), true))
            }
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_STORE_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write to a sibling temp file, then rename over the store so a crash
    /// never leaves a truncated file behind.
    async fn write_entries(&self, entries: &Entries) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| anyhow::anyhow!("Failed to serialize local store: {}", e))?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create local store file: {}", e))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write local store file: {}", e))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync local store file: {}", e))?;
        drop(file);

        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to replace local store file: {}", e))?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let (mut entries, _) = self.entries_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await?;
        debug!(key, "local store key written");
        Ok(())
    }

    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_entries().await?.remove(key))
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let (mut entries, corrupt) = self.entries_for_write().await?;
        if entries.remove(key).is_some() || corrupt {
            self.write_entries(&entries).await?;
        }
        Ok(())
    }
}

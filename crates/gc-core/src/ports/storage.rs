use async_trait::async_trait;

/// Raw string key-value persistence.
///
/// Implementations report failures; the application layer decides whether
/// to surface or swallow them.
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

//! Local key-value store wrapper.
//!
//! Every operation is infallible from the caller's point of view: write and
//! delete failures are logged and swallowed, read failures come back as
//! `None`. Callers cannot tell an absent key from a failed read.

use std::sync::Arc;

use gc_core::ports::KeyValueStorePort;
use tracing::warn;

#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<dyn KeyValueStorePort>,
}

impl LocalStore {
    pub fn new(inner: Arc<dyn KeyValueStorePort>) -> Self {
        Self { inner }
    }

    pub async fn store(&self, key: &str, value: &str) {
        if let Err(err) = self.inner.set(key, value).await {
            warn!(key, error = %err, "local store write failed");
        }
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        match self.inner.get(key).await {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "local store read failed");
                None
            }
        }
    }

    pub async fn remove(&self, key: &str) {
        if let Err(err) = self.inner.remove(key).await {
            warn!(key, error = %err, "local store remove failed");
        }
    }
}

//! Session persistence on top of [`LocalStore`].

use gc_core::session::keys;
use gc_core::SessionContext;
use tracing::debug;

use crate::storage::LocalStore;

#[derive(Clone)]
pub struct SessionStore {
    store: LocalStore,
}

impl SessionStore {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Read the token and username once.
    pub async fn load(&self) -> SessionContext {
        let token = self.store.get(keys::AUTH_TOKEN).await;
        let username = self.store.get(keys::USERNAME).await;
        SessionContext::new(token, username)
    }

    pub async fn save(&self, token: &str, username: &str) -> SessionContext {
        self.store.store(keys::AUTH_TOKEN, token).await;
        self.store.store(keys::USERNAME, username).await;
        debug!(username, "session stored");
        SessionContext::new(Some(token.to_string()), Some(username.to_string()))
    }

    /// Forget the token and username. Onboarding checkpoints are kept so the
    /// same user resumes where they left off after signing back in.
    pub async fn clear(&self) {
        self.store.remove(keys::AUTH_TOKEN).await;
        self.store.remove(keys::USERNAME).await;
        debug!("session cleared");
    }
}

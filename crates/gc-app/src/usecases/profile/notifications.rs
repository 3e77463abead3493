use gc_core::session::keys;

use crate::storage::LocalStore;

/// Local on/off switch for reminders, stored as `"true"` / `"false"`.
///
/// Anything unreadable counts as enabled.
pub struct NotificationPreference {
    store: LocalStore,
}

impl NotificationPreference {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub async fn is_enabled(&self) -> bool {
        match self.store.get(keys::NOTIFICATIONS_ENABLED).await.as_deref() {
            Some("false") => false,
            _ => true,
        }
    }

    pub async fn set_enabled(&self, enabled: bool) {
        let value = if enabled { "true" } else { "false" };
        self.store.store(keys::NOTIFICATIONS_ENABLED, value).await;
    }
}

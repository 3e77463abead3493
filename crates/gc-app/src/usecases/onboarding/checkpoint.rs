use gc_core::onboarding::OnboardingStep;
use gc_core::SessionContext;
use tracing::debug;

use crate::storage::LocalStore;

/// Onboarding checkpoint bookkeeping for one session.
///
/// The key is derived from the session captured at construction; later
/// username changes do not affect an existing manager.
#[derive(Clone)]
pub struct CheckpointManager {
    store: LocalStore,
    key: String,
}

impl CheckpointManager {
    pub fn new(store: LocalStore, session: &SessionContext) -> Self {
        Self {
            store,
            key: session.checkpoint_key(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn save_progress(&self, step: OnboardingStep) {
        self.store.store(&self.key, step.screen_name()).await;
        debug!(key = %self.key, step = %step, "onboarding checkpoint saved");
    }

    /// `None` when nothing is saved or the saved value is not a known step.
    pub async fn get_progress(&self) -> Option<OnboardingStep> {
        let raw = self.store.get(&self.key).await?;
        let step = OnboardingStep::from_screen_name(&raw);
        if step.is_none() {
            debug!(key = %self.key, value = %raw, "ignoring unknown onboarding checkpoint");
        }
        step
    }

    pub async fn clear_progress(&self) {
        self.store.remove(&self.key).await;
        debug!(key = %self.key, "onboarding checkpoint cleared");
    }
}

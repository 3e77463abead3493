use std::sync::Arc;

use tracing::{debug, info};

use gc_core::navigation::Route;
use gc_core::onboarding::OnboardingStep;
use gc_core::ports::{ApiError, ProfileApiPort};

use super::checkpoint::CheckpointManager;
use crate::session::SessionStore;
use crate::storage::LocalStore;

/// Pick the screen to open at app start.
///
/// - no token: login
/// - server says onboarding is complete: home
/// - otherwise the saved checkpoint, or the first step
///
/// When the profile cannot be fetched for a reason other than 401 the
/// checkpoint decides.
pub struct ResumeOnboarding {
    profile_api: Arc<dyn ProfileApiPort>,
    store: LocalStore,
}

impl ResumeOnboarding {
    pub fn new(profile_api: Arc<dyn ProfileApiPort>, store: LocalStore) -> Self {
        Self { profile_api, store }
    }

    pub async fn execute(&self) -> Route {
        let sessions = SessionStore::new(self.store.clone());
        let session = sessions.load().await;
        if !session.is_authenticated() {
            return Route::Login;
        }

        match self.profile_api.get_profile().await {
            Ok(profile) if profile.onboarding_complete => return Route::Home,
            Ok(_) => {}
            Err(ApiError::Unauthorized) => {
                info!("stored token rejected, signing out");
                sessions.clear().await;
                return Route::Login;
            }
            Err(err) => debug!(error = %err, "profile unavailable, resuming from checkpoint"),
        }

        let step = CheckpointManager::new(self.store.clone(), &session)
            .get_progress()
            .await
            .unwrap_or_else(OnboardingStep::first);
        Route::onboarding(step)
    }
}

//! Profile screen use cases.

mod notifications;
mod password;

pub use notifications::NotificationPreference;
pub use password::{ChangePassword, ChangePasswordError};

use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use gc_core::ports::{ApiResult, ProfileApiPort};
use gc_core::profile::{Profile, ProfilePatch};

pub struct GetProfile {
    profile_api: Arc<dyn ProfileApiPort>,
}

impl GetProfile {
    pub fn new(profile_api: Arc<dyn ProfileApiPort>) -> Self {
        Self { profile_api }
    }

    pub async fn execute(&self) -> ApiResult<Profile> {
        self.profile_api.get_profile().await
    }
}

/// Partial profile update; returns the profile as saved by the server.
pub struct UpdateProfile {
    profile_api: Arc<dyn ProfileApiPort>,
}

impl UpdateProfile {
    pub fn new(profile_api: Arc<dyn ProfileApiPort>) -> Self {
        Self { profile_api }
    }

    pub async fn execute(&self, patch: &ProfilePatch) -> ApiResult<Profile> {
        let span = info_span!("usecase.update_profile.execute");
        async {
            let profile = self.profile_api.patch_profile(patch).await?;
            info!("profile updated");
            Ok(profile)
        }
        .instrument(span)
        .await
    }

    /// Replace the whole profile.
    pub async fn replace(&self, profile: &Profile) -> ApiResult<Profile> {
        self.profile_api.put_profile(profile).await
    }
}

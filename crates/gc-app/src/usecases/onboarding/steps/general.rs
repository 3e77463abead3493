use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use gc_core::onboarding::OnboardingStep;
use gc_core::ports::{ApiError, ApiResult, ProfileApiPort};
use gc_core::profile::{GeneralInfo, GeneralInfoForm};
use gc_core::session::keys;
use gc_core::validation::ValidationErrors;

use crate::storage::LocalStore;
use crate::usecases::onboarding::controller::{OnboardingStepHandler, StepReport};

/// Name, weight and height.
pub struct GeneralInfoStep {
    profile_api: Arc<dyn ProfileApiPort>,
    store: LocalStore,
}

impl GeneralInfoStep {
    pub fn new(profile_api: Arc<dyn ProfileApiPort>, store: LocalStore) -> Self {
        Self { profile_api, store }
    }
}

#[async_trait]
impl OnboardingStepHandler for GeneralInfoStep {
    type Data = GeneralInfoForm;
    type Form = GeneralInfoForm;
    type Payload = GeneralInfo;

    fn step(&self) -> OnboardingStep {
        OnboardingStep::General
    }

    /// Prefill from the saved profile; a missing profile yields a blank form.
    async fn load(&self) -> ApiResult<GeneralInfoForm> {
        match self.profile_api.get_profile().await {
            Ok(profile) => Ok(GeneralInfoForm::from_profile(&profile)),
            Err(ApiError::Status { status: 404, .. }) => {
                debug!("no saved profile, starting blank");
                Ok(GeneralInfoForm::default())
            }
            Err(err) => Err(err),
        }
    }

    fn validate(
        &self,
        _data: &GeneralInfoForm,
        form: &GeneralInfoForm,
    ) -> Result<GeneralInfo, ValidationErrors> {
        form.validate()
    }

    async fn submit(&self, info: &GeneralInfo) -> ApiResult<StepReport> {
        self.profile_api.patch_profile(&info.to_patch()).await?;
        self.store.store(keys::DISPLAY_NAME, &info.name).await;
        Ok(StepReport::default())
    }
}

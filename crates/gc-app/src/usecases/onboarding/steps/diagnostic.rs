use std::sync::Arc;

use async_trait::async_trait;

use gc_core::onboarding::OnboardingStep;
use gc_core::ports::{ApiResult, ProfileApiPort};
use gc_core::profile::DiagnosticTests;
use gc_core::validation::ValidationErrors;

use crate::usecases::onboarding::controller::{OnboardingStepHandler, StepReport};

pub struct DiagnosticTestsStep {
    profile_api: Arc<dyn ProfileApiPort>,
}

impl DiagnosticTestsStep {
    pub fn new(profile_api: Arc<dyn ProfileApiPort>) -> Self {
        Self { profile_api }
    }
}

#[async_trait]
impl OnboardingStepHandler for DiagnosticTestsStep {
    type Data = DiagnosticTests;
    type Form = DiagnosticTests;
    type Payload = DiagnosticTests;

    fn step(&self) -> OnboardingStep {
        OnboardingStep::DiagnosticTests
    }

    async fn load(&self) -> ApiResult<DiagnosticTests> {
        Ok(self.profile_api.get_profile().await?.tests)
    }

    fn validate(
        &self,
        _data: &DiagnosticTests,
        form: &DiagnosticTests,
    ) -> Result<DiagnosticTests, ValidationErrors> {
        form.validate()
    }

    async fn submit(&self, tests: &DiagnosticTests) -> ApiResult<StepReport> {
        self.profile_api.update_tests(tests).await?;
        Ok(StepReport::default())
    }
}

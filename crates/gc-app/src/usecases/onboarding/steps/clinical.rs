use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use gc_core::onboarding::OnboardingStep;
use gc_core::ports::{ApiError, ApiResult, ProfileApiPort};
use gc_core::profile::{ClinicalFactors, ClinicalFactorsForm};
use gc_core::validation::ValidationErrors;

use crate::usecases::onboarding::controller::{OnboardingStepHandler, StepReport};
use crate::usecases::onboarding::verify_clinical::{ClinicalOutcome, VerifyClinicalFactors};

/// Six yes/no clinical factors, saved with read-back verification.
///
/// When verification never succeeds but the server acknowledged at least one
/// save, the step still advances and reports a warning. The profile may then
/// hold partially saved answers.
pub struct ClinicalFactorsStep {
    profile_api: Arc<dyn ProfileApiPort>,
    verify: VerifyClinicalFactors,
    last_outcome: Mutex<Option<ClinicalOutcome>>,
}

impl ClinicalFactorsStep {
    pub fn new(profile_api: Arc<dyn ProfileApiPort>, verify: VerifyClinicalFactors) -> Self {
        Self {
            profile_api,
            verify,
            last_outcome: Mutex::new(None),
        }
    }

    pub async fn last_outcome(&self) -> Option<ClinicalOutcome> {
        self.last_outcome.lock().await.clone()
    }
}

#[async_trait]
impl OnboardingStepHandler for ClinicalFactorsStep {
    type Data = ClinicalFactorsForm;
    type Form = ClinicalFactorsForm;
    type Payload = ClinicalFactors;

    fn step(&self) -> OnboardingStep {
        OnboardingStep::ClinicalFactors
    }

    async fn load(&self) -> ApiResult<ClinicalFactorsForm> {
        Ok(self.profile_api.get_profile().await?.clinical_factors())
    }

    fn validate(
        &self,
        _data: &ClinicalFactorsForm,
        form: &ClinicalFactorsForm,
    ) -> Result<ClinicalFactors, ValidationErrors> {
        form.validate()
    }

    async fn submit(&self, factors: &ClinicalFactors) -> ApiResult<StepReport> {
        let outcome = self.verify.execute(factors).await?;
        *self.last_outcome.lock().await = Some(outcome.clone());

        match outcome {
            ClinicalOutcome::Verified { .. } => Ok(StepReport::default()),
            ClinicalOutcome::Unverified {
                last_profile: Some(_),
                mismatches,
                attempts,
                ..
            } => Ok(StepReport::warning(format!(
                "Clinical factors could not be confirmed after {attempts} attempts ({})",
                mismatches.join(", ")
            ))),
            ClinicalOutcome::Unverified {
                last_profile: None,
                last_error,
                attempts,
                ..
            } => Err(last_error.unwrap_or_else(|| {
                ApiError::Network(format!(
                    "clinical factors not saved after {attempts} attempts"
                ))
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockProfileApi, RecordingSleeper};
    use gc_core::profile::Profile;
    use gc_core::RetryPolicy;

    fn factors() -> ClinicalFactors {
        ClinicalFactors {
            has_hiatal_hernia: false,
            has_motility_disorder: false,
            has_delayed_emptying: true,
            has_dry_mouth: false,
            has_constipation: false,
            has_high_stress: false,
        }
    }

    fn step(api: MockProfileApi) -> ClinicalFactorsStep {
        let api: Arc<dyn ProfileApiPort> = Arc::new(api);
        let verify = VerifyClinicalFactors::new(
            api.clone(),
            Arc::new(RecordingSleeper::default()),
            RetryPolicy::clinical_factors(),
        );
        ClinicalFactorsStep::new(api, verify)
    }

    #[tokio::test]
    async fn unverified_but_acknowledged_advances_with_warning() {
        let mut api = MockProfileApi::new();
        api.expect_patch_profile().returning(|_| Ok(Profile::default()));
        api.expect_get_profile().returning(|| Ok(Profile::default()));
        let step = step(api);

        let report = step.submit(&factors()).await.unwrap();
        assert!(report.warning.unwrap().contains("3 attempts"));
        assert!(!step.last_outcome().await.unwrap().is_verified());
    }

    #[tokio::test]
    async fn never_acknowledged_fails_the_submit() {
        let mut api = MockProfileApi::new();
        api.expect_patch_profile().returning(|_| {
            Err(ApiError::Status {
                status: 500,
                body: "boom".into(),
            })
        });
        let step = step(api);

        let err = step.submit(&factors()).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }
}

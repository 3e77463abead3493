//! Onboarding use cases.
//!
//! Six screens walked in order, each driven by an [`OnboardingScreen`] over
//! a step-specific handler. [`OnboardingFlow`] builds the screens from
//! [`AppDeps`].

pub mod checkpoint;
pub mod controller;
pub mod resume;
pub mod steps;
pub mod verify_clinical;

pub use checkpoint::CheckpointManager;
pub use controller::{OnboardingScreen, OnboardingStepHandler, StepReport, UNAUTHORIZED_ALERT};
pub use resume::ResumeOnboarding;
pub use steps::{
    ClinicalFactorsStep, DiagnosticTestsStep, GeneralInfoStep, HabitsStep, QuestionnaireStep,
};
pub use verify_clinical::{ClinicalOutcome, VerifyClinicalFactors};

use crate::deps::AppDeps;
use crate::storage::LocalStore;

/// Screen factory for the onboarding flow.
#[derive(Clone)]
pub struct OnboardingFlow {
    deps: AppDeps,
}

impl OnboardingFlow {
    pub fn new(deps: AppDeps) -> Self {
        Self { deps }
    }

    fn store(&self) -> LocalStore {
        LocalStore::new(self.deps.store.clone())
    }

    pub fn resume(&self) -> ResumeOnboarding {
        ResumeOnboarding::new(self.deps.profile_api.clone(), self.store())
    }

    pub fn general(&self) -> OnboardingScreen<GeneralInfoStep> {
        let handler = GeneralInfoStep::new(self.deps.profile_api.clone(), self.store());
        self.screen(handler, false)
    }

    pub fn gerd_q(&self, renewal: bool) -> OnboardingScreen<QuestionnaireStep> {
        let handler = QuestionnaireStep::gerd_q(self.deps.questionnaire_api.clone());
        self.screen(handler, renewal)
    }

    pub fn rsi(&self, renewal: bool) -> OnboardingScreen<QuestionnaireStep> {
        let handler = QuestionnaireStep::rsi(self.deps.questionnaire_api.clone());
        self.screen(handler, renewal)
    }

    pub fn clinical_factors(&self) -> OnboardingScreen<ClinicalFactorsStep> {
        let verify = VerifyClinicalFactors::new(
            self.deps.profile_api.clone(),
            self.deps.sleeper.clone(),
            self.deps.clinical_retry,
        );
        let handler = ClinicalFactorsStep::new(self.deps.profile_api.clone(), verify);
        self.screen(handler, false)
    }

    pub fn diagnostic_tests(&self) -> OnboardingScreen<DiagnosticTestsStep> {
        let handler = DiagnosticTestsStep::new(self.deps.profile_api.clone());
        self.screen(handler, false)
    }

    pub fn habits(&self) -> OnboardingScreen<HabitsStep> {
        let handler = HabitsStep::new(self.deps.questionnaire_api.clone());
        self.screen(handler, false)
    }

    fn screen<H: OnboardingStepHandler>(&self, handler: H, renewal: bool) -> OnboardingScreen<H> {
        OnboardingScreen::new(handler, renewal, self.deps.profile_api.clone(), self.store())
    }
}

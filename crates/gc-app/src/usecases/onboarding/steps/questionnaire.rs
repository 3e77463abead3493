use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use gc_core::onboarding::OnboardingStep;
use gc_core::ports::{ApiResult, QuestionnaireApiPort};
use gc_core::questionnaire::{
    can_submit, validate_answers, Answers, Questionnaire, QuestionnaireId, SubmissionResult,
    SubmitAnswers,
};
use gc_core::validation::ValidationErrors;

use crate::usecases::onboarding::controller::{OnboardingStepHandler, StepReport};

/// GERD-Q or RSI questionnaire.
pub struct QuestionnaireStep {
    id: QuestionnaireId,
    api: Arc<dyn QuestionnaireApiPort>,
    last_result: Mutex<Option<SubmissionResult>>,
}

impl QuestionnaireStep {
    pub fn new(id: QuestionnaireId, api: Arc<dyn QuestionnaireApiPort>) -> Self {
        Self {
            id,
            api,
            last_result: Mutex::new(None),
        }
    }

    pub fn gerd_q(api: Arc<dyn QuestionnaireApiPort>) -> Self {
        Self::new(QuestionnaireId::GerdQ, api)
    }

    pub fn rsi(api: Arc<dyn QuestionnaireApiPort>) -> Self {
        Self::new(QuestionnaireId::Rsi, api)
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self, questionnaire: &Questionnaire, answers: &Answers) -> bool {
        can_submit(&questionnaire.questions, answers)
    }

    /// Score returned by the last accepted submission.
    pub async fn last_result(&self) -> Option<SubmissionResult> {
        self.last_result.lock().await.clone()
    }
}

#[async_trait]
impl OnboardingStepHandler for QuestionnaireStep {
    type Data = Questionnaire;
    type Form = Answers;
    type Payload = SubmitAnswers;

    fn step(&self) -> OnboardingStep {
        match self.id {
            QuestionnaireId::GerdQ => OnboardingStep::GerdQ,
            QuestionnaireId::Rsi => OnboardingStep::Rsi,
        }
    }

    async fn load(&self) -> ApiResult<Questionnaire> {
        self.api.get_questionnaire(self.id).await
    }

    fn validate(
        &self,
        questionnaire: &Questionnaire,
        answers: &Answers,
    ) -> Result<SubmitAnswers, ValidationErrors> {
        validate_answers(&questionnaire.questions, answers)
    }

    async fn submit(&self, answers: &SubmitAnswers) -> ApiResult<StepReport> {
        let result = self.api.submit_questionnaire(self.id, answers).await?;
        info!(
            questionnaire = ?self.id,
            score = ?result.score,
            classification = ?result.classification,
            "questionnaire submitted"
        );
        *self.last_result.lock().await = Some(result);
        Ok(StepReport::default())
    }
}

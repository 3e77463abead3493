use std::sync::Arc;

use async_trait::async_trait;

use gc_core::onboarding::OnboardingStep;
use gc_core::ports::{ApiResult, QuestionnaireApiPort};
use gc_core::questionnaire::{validate_answers, Answers, Question, SubmitAnswers};
use gc_core::validation::ValidationErrors;

use crate::usecases::onboarding::controller::{OnboardingStepHandler, StepReport};

/// Habit baseline questions, the last onboarding step.
pub struct HabitsStep {
    api: Arc<dyn QuestionnaireApiPort>,
}

impl HabitsStep {
    pub fn new(api: Arc<dyn QuestionnaireApiPort>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OnboardingStepHandler for HabitsStep {
    type Data = Vec<Question>;
    type Form = Answers;
    type Payload = SubmitAnswers;

    fn step(&self) -> OnboardingStep {
        OnboardingStep::Habits
    }

    async fn load(&self) -> ApiResult<Vec<Question>> {
        self.api.get_habit_questions().await
    }

    fn validate(
        &self,
        questions: &Vec<Question>,
        answers: &Answers,
    ) -> Result<SubmitAnswers, ValidationErrors> {
        validate_answers(questions, answers)
    }

    async fn submit(&self, answers: &SubmitAnswers) -> ApiResult<StepReport> {
        self.api.submit_habit_answers(answers).await?;
        Ok(StepReport::default())
    }
}

//! Mock ports shared by the use-case unit tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;

use gc_core::auth::{ChangePasswordRequest, LoginRequest, LoginResponse};
use gc_core::content::{
    GamificationDashboard, LearnDashboard, Medal, Program, Recommendation, RecommendationPatch,
};
use gc_core::habits::{
    CompletionCheck, DailyNote, HabitHistoryEntry, HabitLogRequest, MonthlyNotes, NotesSummary,
    TrackedHabit,
};
use gc_core::ports::*;
use gc_core::profile::{DiagnosticTests, Profile, ProfilePatch};
use gc_core::questionnaire::{
    Question, Questionnaire, QuestionnaireId, SubmissionResult, SubmitAnswers,
};
use gc_core::session::keys;
use gc_infra::storage::InMemoryKeyValueStore;

use crate::storage::LocalStore;

mock! {
    pub ProfileApi {}

    #[async_trait]
    impl ProfileApiPort for ProfileApi {
        async fn get_profile(&self) -> ApiResult<Profile>;
        async fn patch_profile(&self, patch: &ProfilePatch) -> ApiResult<Profile>;
        async fn put_profile(&self, profile: &Profile) -> ApiResult<Profile>;
        async fn update_tests(&self, tests: &DiagnosticTests) -> ApiResult<()>;
    }
}

mock! {
    pub QuestionnaireApi {}

    #[async_trait]
    impl QuestionnaireApiPort for QuestionnaireApi {
        async fn get_questionnaire(&self, id: QuestionnaireId) -> ApiResult<Questionnaire>;
        async fn submit_questionnaire(
            &self,
            id: QuestionnaireId,
            answers: &SubmitAnswers,
        ) -> ApiResult<SubmissionResult>;
        async fn get_habit_questions(&self) -> ApiResult<Vec<Question>>;
        async fn submit_habit_answers(&self, answers: &SubmitAnswers) -> ApiResult<()>;
    }
}

mock! {
    pub HabitApi {}

    #[async_trait]
    impl HabitApiPort for HabitApi {
        async fn list_habits(&self) -> ApiResult<Vec<TrackedHabit>>;
        async fn log_habit(&self, entry: &HabitLogRequest) -> ApiResult<()>;
        async fn habit_history(&self, tracker_id: u64) -> ApiResult<Vec<HabitHistoryEntry>>;
        async fn check_completion(&self) -> ApiResult<CompletionCheck>;
        async fn save_daily_note(&self, note: &DailyNote) -> ApiResult<DailyNote>;
        async fn monthly_notes(&self, year: i32, month: u32) -> ApiResult<MonthlyNotes>;
        async fn notes_summary(&self) -> ApiResult<NotesSummary>;
    }
}

mock! {
    pub ContentApi {}

    #[async_trait]
    impl ContentApiPort for ContentApi {
        async fn my_program(&self) -> ApiResult<Program>;
        async fn recommendations(&self) -> ApiResult<Vec<Recommendation>>;
        async fn prioritized_recommendations(&self) -> ApiResult<Vec<Recommendation>>;
        async fn update_recommendation(
            &self,
            id: u64,
            patch: &RecommendationPatch,
        ) -> ApiResult<Recommendation>;
        async fn learn_dashboard(&self) -> ApiResult<LearnDashboard>;
        async fn mark_article_read(&self, article_id: u64) -> ApiResult<()>;
        async fn gamification_dashboard(&self) -> ApiResult<GamificationDashboard>;
        async fn all_medals(&self) -> ApiResult<Vec<Medal>>;
    }
}

mock! {
    pub AuthApi {}

    #[async_trait]
    impl AuthApiPort for AuthApi {
        async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;
        async fn logout(&self) -> ApiResult<()>;
        async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<()>;
    }
}

/// Records requested delays without sleeping.
#[derive(Default)]
pub struct RecordingSleeper {
    pub slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn total(&self) -> Duration {
        self.slept.lock().unwrap().iter().sum()
    }

    pub fn count(&self) -> usize {
        self.slept.lock().unwrap().len()
    }
}

#[async_trait]
impl SleeperPort for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

pub struct FixedClock(pub NaiveDate);

impl ClockPort for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn memory_store() -> LocalStore {
    LocalStore::new(Arc::new(InMemoryKeyValueStore::new()))
}

/// Store with a signed-in session for `username`.
pub async fn signed_in_store(username: &str) -> LocalStore {
    let store = memory_store();
    store.store(keys::AUTH_TOKEN, "token-123").await;
    store.store(keys::USERNAME, username).await;
    store
}

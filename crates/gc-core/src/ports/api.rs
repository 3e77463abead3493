//! Backend API ports, one per resource family.
//!
//! Every method maps to exactly one REST call; retries and verification are
//! the caller's business.

use async_trait::async_trait;

use crate::auth::{ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::content::{
    GamificationDashboard, LearnDashboard, Medal, Program, Recommendation, RecommendationPatch,
};
use crate::habits::{
    CompletionCheck, DailyNote, HabitHistoryEntry, HabitLogRequest, MonthlyNotes, NotesSummary,
    TrackedHabit,
};
use crate::ports::errors::ApiResult;
use crate::profile::{DiagnosticTests, Profile, ProfilePatch};
use crate::questionnaire::{
    Question, Questionnaire, QuestionnaireId, SubmissionResult, SubmitAnswers,
};

#[async_trait]
pub trait ProfileApiPort: Send + Sync {
    /// `GET /api/profiles/me/`
    async fn get_profile(&self) -> ApiResult<Profile>;
    /// `PATCH /api/profiles/me/`, returns the server's echoed profile.
    async fn patch_profile(&self, patch: &ProfilePatch) -> ApiResult<Profile>;
    /// `PUT /api/profiles/me/`
    async fn put_profile(&self, profile: &Profile) -> ApiResult<Profile>;
    /// `PUT /api/profiles/tests/update/`
    async fn update_tests(&self, tests: &DiagnosticTests) -> ApiResult<()>;
}

#[async_trait]
pub trait QuestionnaireApiPort: Send + Sync {
    /// `GET /api/questionnaires/{id}/`
    async fn get_questionnaire(&self, id: QuestionnaireId) -> ApiResult<Questionnaire>;
    /// `POST /api/questionnaires/{id}/submit/`
    async fn submit_questionnaire(
        &self,
        id: QuestionnaireId,
        answers: &SubmitAnswers,
    ) -> ApiResult<SubmissionResult>;
    /// `GET /api/questionnaires/habits/`
    async fn get_habit_questions(&self) -> ApiResult<Vec<Question>>;
    /// `POST /api/questionnaires/habits/submit/`
    async fn submit_habit_answers(&self, answers: &SubmitAnswers) -> ApiResult<()>;
}

#[async_trait]
pub trait HabitApiPort: Send + Sync {
    /// `GET /api/habits/`
    async fn list_habits(&self) -> ApiResult<Vec<TrackedHabit>>;
    /// `POST /api/habits/log/`
    async fn log_habit(&self, entry: &HabitLogRequest) -> ApiResult<()>;
    /// `GET /api/habits/{id}/history/`
    async fn habit_history(&self, tracker_id: u64) -> ApiResult<Vec<HabitHistoryEntry>>;
    /// `GET /api/habits/check-completion/`
    async fn check_completion(&self) -> ApiResult<CompletionCheck>;
    /// `POST /api/habits/daily-notes/`
    async fn save_daily_note(&self, note: &DailyNote) -> ApiResult<DailyNote>;
    /// `GET /api/habits/daily-notes/monthly/?year=&month=`
    async fn monthly_notes(&self, year: i32, month: u32) -> ApiResult<MonthlyNotes>;
    /// `GET /api/habits/daily-notes/summary/`
    async fn notes_summary(&self) -> ApiResult<NotesSummary>;
}

#[async_trait]
pub trait ContentApiPort: Send + Sync {
    /// `GET /api/programs/my-program/`
    async fn my_program(&self) -> ApiResult<Program>;
    /// `GET /api/recommendations/`
    async fn recommendations(&self) -> ApiResult<Vec<Recommendation>>;
    /// `GET /api/recommendations/prioritized/`
    async fn prioritized_recommendations(&self) -> ApiResult<Vec<Recommendation>>;
    /// `PATCH /api/recommendations/{id}/`
    async fn update_recommendation(
        &self,
        id: u64,
        patch: &RecommendationPatch,
    ) -> ApiResult<Recommendation>;
    /// `GET /api/learn/dashboard/`
    async fn learn_dashboard(&self) -> ApiResult<LearnDashboard>;
    /// `POST /api/learn/read/{id}/`
    async fn mark_article_read(&self, article_id: u64) -> ApiResult<()>;
    /// `GET /api/gamification/dashboard/`
    async fn gamification_dashboard(&self) -> ApiResult<GamificationDashboard>;
    /// `GET /api/gamification/all-medals/`
    async fn all_medals(&self) -> ApiResult<Vec<Medal>>;
}

#[async_trait]
pub trait AuthApiPort: Send + Sync {
    /// `POST /api/auth/login/`
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;
    /// `POST /api/auth/logout/`
    async fn logout(&self) -> ApiResult<()>;
    /// `POST /api/users/change-password/`
    async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<()>;
}

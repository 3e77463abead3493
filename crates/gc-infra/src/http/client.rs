//! REST client for the coaching backend.
//!
//! One `reqwest::Client` shared by every API port. The stored token is read
//! on each request, so a login or logout takes effect immediately.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use gc_core::auth::{ChangePasswordRequest, LoginRequest, LoginResponse};
use gc_core::content::{
    GamificationDashboard, LearnDashboard, Medal, Program, Recommendation, RecommendationPatch,
};
use gc_core::habits::{
    CompletionCheck, DailyNote, HabitHistoryEntry, HabitLogRequest, MonthlyNotes, NotesSummary,
    TrackedHabit,
};
use gc_core::ports::{
    ApiError, ApiResult, AuthApiPort, ContentApiPort, HabitApiPort, KeyValueStorePort,
    ProfileApiPort, QuestionnaireApiPort,
};
use gc_core::profile::{DiagnosticTests, Profile, ProfilePatch};
use gc_core::questionnaire::{
    Question, Questionnaire, QuestionnaireId, SubmissionResult, SubmitAnswers,
};
use gc_core::session::keys;

pub struct HttpBackendClient {
    client: reqwest::Client,
    base_url: String,
    store: Arc<dyn KeyValueStorePort>,
}

impl HttpBackendClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        store: Arc<dyn KeyValueStorePort>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn token(&self) -> Option<String> {
        match self.store.get(keys::AUTH_TOKEN).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                warn!(error = %err, "failed to read auth token");
                None
            }
        }
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.token().await {
            Some(token) => builder.header(reqwest::header::AUTHORIZATION, format!("Token {token}")),
            None => builder,
        }
    }

    /// Send and map non-2xx responses onto [`ApiError`].
    async fn send(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "backend response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let builder = self.request(Method::GET, path).await;
        Self::decode(self.send(builder).await?).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(method, path).await.json(body);
        Self::decode(self.send(builder).await?).await
    }

    /// Like [`send_json`](Self::send_json) for endpoints whose body is ignored.
    async fn send_unit<B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        let mut builder = self.request(method, path).await;
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await?;
        Ok(())
    }
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_decode() {
        ApiError::Decode(error.to_string())
    } else if error.is_timeout() {
        ApiError::Network(format!("request timed out: {error}"))
    } else {
        ApiError::Network(error.to_string())
    }
}

const NO_BODY: Option<&()> = None;

#[async_trait]
impl ProfileApiPort for HttpBackendClient {
    async fn get_profile(&self) -> ApiResult<Profile> {
        self.get_json("/api/profiles/me/").await
    }

    async fn patch_profile(&self, patch: &ProfilePatch) -> ApiResult<Profile> {
        self.send_json(Method::PATCH, "/api/profiles/me/", patch).await
    }

    async fn put_profile(&self, profile: &Profile) -> ApiResult<Profile> {
        self.send_json(Method::PUT, "/api/profiles/me/", profile).await
    }

    async fn update_tests(&self, tests: &DiagnosticTests) -> ApiResult<()> {
        self.send_unit(Method::PUT, "/api/profiles/tests/update/", Some(tests))
            .await
    }
}

#[async_trait]
impl QuestionnaireApiPort for HttpBackendClient {
    async fn get_questionnaire(&self, id: QuestionnaireId) -> ApiResult<Questionnaire> {
        self.get_json(&format!("/api/questionnaires/{}/", id.id())).await
    }

    async fn submit_questionnaire(
        &self,
        id: QuestionnaireId,
        answers: &SubmitAnswers,
    ) -> ApiResult<SubmissionResult> {
        let path = format!("/api/questionnaires/{}/submit/", id.id());
        self.send_json(Method::POST, &path, answers).await
    }

    async fn get_habit_questions(&self) -> ApiResult<Vec<Question>> {
        self.get_json("/api/questionnaires/habits/").await
    }

    async fn submit_habit_answers(&self, answers: &SubmitAnswers) -> ApiResult<()> {
        self.send_unit(Method::POST, "/api/questionnaires/habits/submit/", Some(answers))
            .await
    }
}

#[async_trait]
impl HabitApiPort for HttpBackendClient {
    async fn list_habits(&self) -> ApiResult<Vec<TrackedHabit>> {
        self.get_json("/api/habits/").await
    }

    async fn log_habit(&self, entry: &HabitLogRequest) -> ApiResult<()> {
        self.send_unit(Method::POST, "/api/habits/log/", Some(entry))
            .await
    }

    async fn habit_history(&self, tracker_id: u64) -> ApiResult<Vec<HabitHistoryEntry>> {
        self.get_json(&format!("/api/habits/{tracker_id}/history/"))
            .await
    }

    async fn check_completion(&self) -> ApiResult<CompletionCheck> {
        self.get_json("/api/habits/check-completion/").await
    }

    async fn save_daily_note(&self, note: &DailyNote) -> ApiResult<DailyNote> {
        self.send_json(Method::POST, "/api/habits/daily-notes/", note)
            .await
    }

    async fn monthly_notes(&self, year: i32, month: u32) -> ApiResult<MonthlyNotes> {
        let builder = self
            .request(Method::GET, "/api/habits/daily-notes/monthly/")
            .await
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        Self::decode(self.send(builder).await?).await
    }

    async fn notes_summary(&self) -> ApiResult<NotesSummary> {
        self.get_json("/api/habits/daily-notes/summary/").await
    }
}

#[async_trait]
impl ContentApiPort for HttpBackendClient {
    async fn my_program(&self) -> ApiResult<Program> {
        self.get_json("/api/programs/my-program/").await
    }

    async fn recommendations(&self) -> ApiResult<Vec<Recommendation>> {
        self.get_json("/api/recommendations/").await
    }

    async fn prioritized_recommendations(&self) -> ApiResult<Vec<Recommendation>> {
        self.get_json("/api/recommendations/prioritized/").await
    }

    async fn update_recommendation(
        &self,
        id: u64,
        patch: &RecommendationPatch,
    ) -> ApiResult<Recommendation> {
        self.send_json(Method::PATCH, &format!("/api/recommendations/{id}/"), patch)
            .await
    }

    async fn learn_dashboard(&self) -> ApiResult<LearnDashboard> {
        self.get_json("/api/learn/dashboard/").await
    }

    async fn mark_article_read(&self, article_id: u64) -> ApiResult<()> {
        self.send_unit(Method::POST, &format!("/api/learn/read/{article_id}/"), NO_BODY)
            .await
    }

    async fn gamification_dashboard(&self) -> ApiResult<GamificationDashboard> {
        self.get_json("/api/gamification/dashboard/").await
    }

    async fn all_medals(&self) -> ApiResult<Vec<Medal>> {
        self.get_json("/api/gamification/all-medals/").await
    }
}

#[async_trait]
impl AuthApiPort for HttpBackendClient {
    /// Sent without a token; a stale one would make the server reject the
    /// request before checking the credentials.
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let builder = self
            .client
            .post(self.url("/api/auth/login/"))
            .json(request);
        Self::decode(self.send(builder).await?).await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.send_unit(Method::POST, "/api/auth/logout/", NO_BODY)
            .await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<()> {
        self.send_unit(Method::POST, "/api/users/change-password/", Some(request))
            .await
    }
}

//! End-to-end onboarding over an in-memory backend: a user signs in, gets
//! part way through, "restarts" the app and resumes at the saved step.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use gc_app::usecases::{Login, OnboardingFlow};
use gc_app::{AppDeps, LocalStore, SessionStore};
use gc_core::auth::{ChangePasswordRequest, LoginRequest, LoginResponse};
use gc_core::content::{
    GamificationDashboard, LearnDashboard, Medal, Program, Recommendation, RecommendationPatch,
};
use gc_core::habits::{
    CompletionCheck, DailyNote, HabitHistoryEntry, HabitLogRequest, MonthlyNotes, NotesSummary,
    TrackedHabit,
};
use gc_core::onboarding::screen::ScreenState;
use gc_core::ports::{
    ApiError, ApiResult, AuthApiPort, ContentApiPort, HabitApiPort, KeyValueStorePort,
    ProfileApiPort, QuestionnaireApiPort,
};
use gc_core::profile::{
    ClinicalFactorsForm, DiagnosticTests, GeneralInfoForm, Profile, ProfilePatch,
};
use gc_core::questionnaire::{
    Answers, AnswerOption, Question, Questionnaire, QuestionnaireId, SubmissionResult,
    SubmitAnswers,
};
use gc_core::session::keys;
use gc_core::{OnboardingStep, RetryPolicy, Route};
use gc_infra::{InMemoryKeyValueStore, SystemClock, TokioSleeper};

fn not_found() -> ApiError {
    ApiError::Status {
        status: 404,
        body: "not found".into(),
    }
}

fn question(id: u64) -> Question {
    Question {
        id,
        text: format!("question {id}"),
        options: vec![
            AnswerOption {
                id: id * 10,
                text: "never".into(),
                value: 0,
            },
            AnswerOption {
                id: id * 10 + 1,
                text: "often".into(),
                value: 3,
            },
        ],
    }
}

fn answer_all(questions: &[Question]) -> Answers {
    questions.iter().map(|q| (q.id, q.id * 10)).collect()
}

/// Backend that keeps a profile in memory. Until the profile is created by
/// the first PATCH, reads answer 404. A clinical-factor write becomes
/// visible on the `clinical_lag`-th read after it was first sent.
#[derive(Default)]
struct FakeBackend {
    profile: Mutex<Option<Profile>>,
    pending_clinical: Mutex<Option<(ProfilePatch, u32)>>,
    clinical_lag: u32,
    submitted: Mutex<Vec<QuestionnaireId>>,
    habit_answers: Mutex<Option<SubmitAnswers>>,
}

impl FakeBackend {
    fn with_clinical_lag(clinical_lag: u32) -> Self {
        Self {
            clinical_lag,
            ..Default::default()
        }
    }

    fn apply(profile: &mut Profile, patch: &ProfilePatch) {
        macro_rules! merge {
            ($($field:ident),*) => {
                $(if let Some(value) = patch.$field.clone() {
                    profile.$field = Some(value);
                })*
            };
        }
        merge!(
            first_name,
            weight_kg,
            height_cm,
            has_hiatal_hernia,
            has_motility_disorder,
            has_delayed_emptying,
            has_dry_mouth,
            has_constipation,
            has_high_stress
        );
        if let Some(done) = patch.onboarding_complete {
            profile.onboarding_complete = done;
        }
    }

    fn profile(&self) -> Option<Profile> {
        self.profile.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileApiPort for FakeBackend {
    async fn get_profile(&self) -> ApiResult<Profile> {
        let mut pending = self.pending_clinical.lock().unwrap();
        if let Some((patch, remaining)) = pending.take() {
            if remaining == 0 {
                let mut profile = self.profile.lock().unwrap();
                Self::apply(profile.get_or_insert_with(Profile::default), &patch);
            } else {
                *pending = Some((patch, remaining - 1));
            }
        }
        self.profile().ok_or_else(not_found)
    }

    async fn patch_profile(&self, patch: &ProfilePatch) -> ApiResult<Profile> {
        if patch.has_hiatal_hernia.is_some() && self.clinical_lag > 0 {
            let mut pending = self.pending_clinical.lock().unwrap();
            if pending.is_none() {
                *pending = Some((patch.clone(), self.clinical_lag - 1));
            }
            drop(pending);
            return self.profile().ok_or_else(not_found);
        }
        let mut profile = self.profile.lock().unwrap();
        let profile = profile.get_or_insert_with(Profile::default);
        Self::apply(profile, patch);
        Ok(profile.clone())
    }

    async fn put_profile(&self, profile: &Profile) -> ApiResult<Profile> {
        *self.profile.lock().unwrap() = Some(profile.clone());
        Ok(profile.clone())
    }

    async fn update_tests(&self, tests: &DiagnosticTests) -> ApiResult<()> {
        let mut profile = self.profile.lock().unwrap();
        profile.get_or_insert_with(Profile::default).tests = tests.clone();
        Ok(())
    }
}

#[async_trait]
impl QuestionnaireApiPort for FakeBackend {
    async fn get_questionnaire(&self, id: QuestionnaireId) -> ApiResult<Questionnaire> {
        Ok(Questionnaire {
            id: id.id() as u64,
            name: format!("{id:?}"),
            questions: vec![question(1), question(2)],
        })
    }

    async fn submit_questionnaire(
        &self,
        id: QuestionnaireId,
        _answers: &SubmitAnswers,
    ) -> ApiResult<SubmissionResult> {
        self.submitted.lock().unwrap().push(id);
        Ok(SubmissionResult::default())
    }

    async fn get_habit_questions(&self) -> ApiResult<Vec<Question>> {
        Ok(vec![question(7)])
    }

    async fn submit_habit_answers(&self, answers: &SubmitAnswers) -> ApiResult<()> {
        *self.habit_answers.lock().unwrap() = Some(answers.clone());
        Ok(())
    }
}

#[async_trait]
impl HabitApiPort for FakeBackend {
    async fn list_habits(&self) -> ApiResult<Vec<TrackedHabit>> {
        Ok(Vec::new())
    }

    async fn log_habit(&self, _entry: &HabitLogRequest) -> ApiResult<()> {
        Ok(())
    }

    async fn habit_history(&self, _tracker_id: u64) -> ApiResult<Vec<HabitHistoryEntry>> {
        Ok(Vec::new())
    }

    async fn check_completion(&self) -> ApiResult<CompletionCheck> {
        Ok(CompletionCheck::default())
    }

    async fn save_daily_note(&self, note: &DailyNote) -> ApiResult<DailyNote> {
        Ok(note.clone())
    }

    async fn monthly_notes(&self, _year: i32, _month: u32) -> ApiResult<MonthlyNotes> {
        Ok(MonthlyNotes::default())
    }

    async fn notes_summary(&self) -> ApiResult<NotesSummary> {
        Ok(NotesSummary::default())
    }
}

#[async_trait]
impl ContentApiPort for FakeBackend {
    async fn my_program(&self) -> ApiResult<Program> {
        Err(not_found())
    }

    async fn recommendations(&self) -> ApiResult<Vec<Recommendation>> {
        Ok(Vec::new())
    }

    async fn prioritized_recommendations(&self) -> ApiResult<Vec<Recommendation>> {
        Ok(Vec::new())
    }

    async fn update_recommendation(
        &self,
        _id: u64,
        _patch: &RecommendationPatch,
    ) -> ApiResult<Recommendation> {
        Err(not_found())
    }

    async fn learn_dashboard(&self) -> ApiResult<LearnDashboard> {
        Err(not_found())
    }

    async fn mark_article_read(&self, _article_id: u64) -> ApiResult<()> {
        Ok(())
    }

    async fn gamification_dashboard(&self) -> ApiResult<GamificationDashboard> {
        Err(not_found())
    }

    async fn all_medals(&self) -> ApiResult<Vec<Medal>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl AuthApiPort for FakeBackend {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        Ok(LoginResponse {
            token: format!("token-{}", request.username),
            username: Some(request.username.clone()),
        })
    }

    async fn logout(&self) -> ApiResult<()> {
        Ok(())
    }

    async fn change_password(&self, _request: &ChangePasswordRequest) -> ApiResult<()> {
        Ok(())
    }
}

fn deps(backend: Arc<FakeBackend>, store: Arc<dyn KeyValueStorePort>) -> AppDeps {
    AppDeps {
        profile_api: backend.clone(),
        questionnaire_api: backend.clone(),
        habit_api: backend.clone(),
        content_api: backend.clone(),
        auth_api: backend,
        store,
        clock: Arc::new(SystemClock),
        sleeper: Arc::new(TokioSleeper),
        clinical_retry: RetryPolicy::clinical_factors(),
    }
}

async fn sign_in(backend: &Arc<FakeBackend>, store: &Arc<dyn KeyValueStorePort>, username: &str) {
    let sessions = SessionStore::new(LocalStore::new(store.clone()));
    Login::new(backend.clone(), sessions)
        .execute(username, "secret")
        .await
        .unwrap();
}

fn advanced_to(step: OnboardingStep) -> ScreenState {
    ScreenState::Advancing {
        to: Route::onboarding(step),
    }
}

#[tokio::test]
async fn onboarding_resumes_at_checkpoint_after_restart() {
    let backend = Arc::new(FakeBackend::default());
    let store: Arc<dyn KeyValueStorePort> = Arc::new(InMemoryKeyValueStore::new());
    sign_in(&backend, &store, "ana").await;

    let flow = OnboardingFlow::new(deps(backend.clone(), store.clone()));
    assert_eq!(
        flow.resume().execute().await,
        Route::onboarding(OnboardingStep::General)
    );

    // No profile yet: the general step starts from an empty form.
    let mut general = flow.general();
    general.enter().await;
    assert_eq!(general.data(), Some(&GeneralInfoForm::default()));
    let form = GeneralInfoForm {
        name: "Ana".into(),
        weight: "65".into(),
        height: "165".into(),
    };
    assert_eq!(general.submit(&form).await, advanced_to(OnboardingStep::GerdQ));
    assert_eq!(
        store.get("onboardingScreen_ana").await.unwrap().as_deref(),
        Some("OnboardingGerdQ")
    );
    assert_eq!(
        store.get(keys::DISPLAY_NAME).await.unwrap().as_deref(),
        Some("Ana")
    );

    // Restart: a fresh flow over the same store picks up where we left off.
    let restarted = OnboardingFlow::new(deps(backend.clone(), store.clone()));
    let route = restarted.resume().execute().await;
    assert_eq!(route, Route::onboarding(OnboardingStep::GerdQ));

    let mut gerd_q = restarted.gerd_q(false);
    gerd_q.enter().await;
    let answers = answer_all(&gerd_q.data().unwrap().questions);
    assert_eq!(gerd_q.submit(&answers).await, advanced_to(OnboardingStep::Rsi));

    let mut rsi = restarted.rsi(false);
    rsi.enter().await;
    let answers = answer_all(&rsi.data().unwrap().questions);
    assert_eq!(
        rsi.submit(&answers).await,
        advanced_to(OnboardingStep::ClinicalFactors)
    );
    assert_eq!(
        *backend.submitted.lock().unwrap(),
        vec![QuestionnaireId::GerdQ, QuestionnaireId::Rsi]
    );

    let mut clinical = restarted.clinical_factors();
    clinical.enter().await;
    let factors = ClinicalFactorsForm {
        has_hiatal_hernia: Some(true),
        has_motility_disorder: Some(false),
        has_delayed_emptying: Some(false),
        has_dry_mouth: Some(false),
        has_constipation: Some(true),
        has_high_stress: Some(true),
    };
    assert_eq!(
        clinical.submit(&factors).await,
        advanced_to(OnboardingStep::DiagnosticTests)
    );
    assert_eq!(clinical.warning(), None);

    let mut tests = restarted.diagnostic_tests();
    tests.enter().await;
    let done = DiagnosticTests {
        endoscopy_done: true,
        endoscopy_result: Some("LA grade A".into()),
        ..Default::default()
    };
    assert_eq!(tests.submit(&done).await, advanced_to(OnboardingStep::Habits));

    let mut habits = restarted.habits();
    habits.enter().await;
    let answers = answer_all(habits.data().unwrap());
    assert_eq!(
        habits.submit(&answers).await,
        ScreenState::Advancing { to: Route::Home }
    );
    assert!(backend.habit_answers.lock().unwrap().is_some());

    let profile = backend.profile().unwrap();
    assert!(profile.onboarding_complete);
    assert_eq!(profile.first_name.as_deref(), Some("Ana"));
    assert_eq!(profile.has_constipation, Some(true));
    assert!(profile.tests.endoscopy_done);
    assert_eq!(store.get("onboardingScreen_ana").await.unwrap(), None);
    assert_eq!(restarted.resume().execute().await, Route::Home);
}

#[tokio::test]
async fn checkpoints_are_kept_per_user() {
    let backend = Arc::new(FakeBackend::default());
    let store: Arc<dyn KeyValueStorePort> = Arc::new(InMemoryKeyValueStore::new());
    store
        .set("onboardingScreen_bea", "OnboardingRsi")
        .await
        .unwrap();

    sign_in(&backend, &store, "ana").await;
    let flow = OnboardingFlow::new(deps(backend.clone(), store.clone()));
    assert_eq!(
        flow.resume().execute().await,
        Route::onboarding(OnboardingStep::General)
    );

    sign_in(&backend, &store, "bea").await;
    assert_eq!(
        flow.resume().execute().await,
        Route::onboarding(OnboardingStep::Rsi)
    );
}

#[tokio::test(start_paused = true)]
async fn clinical_factors_wait_for_lagging_backend() {
    let backend = Arc::new(FakeBackend::with_clinical_lag(3));
    let store: Arc<dyn KeyValueStorePort> = Arc::new(InMemoryKeyValueStore::new());
    backend
        .put_profile(&Profile {
            first_name: Some("Ana".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    sign_in(&backend, &store, "ana").await;

    let flow = OnboardingFlow::new(deps(backend.clone(), store.clone()));
    let mut clinical = flow.clinical_factors();
    clinical.enter().await;

    let factors = ClinicalFactorsForm {
        has_hiatal_hernia: Some(false),
        has_motility_disorder: Some(true),
        has_delayed_emptying: Some(false),
        has_dry_mouth: Some(false),
        has_constipation: Some(false),
        has_high_stress: Some(false),
    };
    let start = tokio::time::Instant::now();
    let state = clinical.submit(&factors).await;

    assert_eq!(state, advanced_to(OnboardingStep::DiagnosticTests));
    assert_eq!(clinical.warning(), None);
    assert!(start.elapsed() >= Duration::from_millis(1000));
    assert_eq!(backend.profile().unwrap().has_motility_disorder, Some(true));
}

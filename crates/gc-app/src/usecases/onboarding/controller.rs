//! Onboarding screen controller.
//!
//! Drives [`ScreenStateMachine`] for one screen and executes the actions it
//! produces. Step-specific loading, validation and submission live behind
//! [`OnboardingStepHandler`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, info_span, warn, Instrument};

use gc_core::navigation::{Route, RouteGuard};
use gc_core::onboarding::{
    all_steps_complete, OnboardingStep, ScreenAction, ScreenContext, ScreenError, ScreenEvent,
    ScreenState, ScreenStateMachine,
};
use gc_core::ports::{ApiError, ApiResult, ProfileApiPort};
use gc_core::profile::ProfilePatch;
use gc_core::validation::ValidationErrors;
use gc_core::SessionContext;

use super::checkpoint::CheckpointManager;
use crate::session::SessionStore;
use crate::storage::LocalStore;

pub const UNAUTHORIZED_ALERT: &str = "Your session has expired. Please sign in again.";

/// Extra information a successful submission wants surfaced to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub warning: Option<String>,
}

impl StepReport {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            warning: Some(message.into()),
        }
    }
}

/// Step-specific behavior plugged into [`OnboardingScreen`].
#[async_trait]
pub trait OnboardingStepHandler: Send + Sync {
    /// Data fetched on entry (prefill, question list).
    type Data: Send + Sync;
    /// Raw user input.
    type Form: Send + Sync;
    /// Validated request body.
    type Payload: Send + Sync;

    fn step(&self) -> OnboardingStep;

    async fn load(&self) -> ApiResult<Self::Data>;

    fn validate(
        &self,
        data: &Self::Data,
        form: &Self::Form,
    ) -> Result<Self::Payload, ValidationErrors>;

    async fn submit(&self, payload: &Self::Payload) -> ApiResult<StepReport>;
}

pub struct OnboardingScreen<H: OnboardingStepHandler> {
    ctx: ScreenContext,
    handler: H,
    profile_api: Arc<dyn ProfileApiPort>,
    sessions: SessionStore,
    store: LocalStore,
    session: SessionContext,
    checkpoints: CheckpointManager,

    state: ScreenState,
    data: Option<H::Data>,
    payload: Option<H::Payload>,
    navigation: Option<Route>,
    alerts: Vec<String>,
    warning: Option<String>,
}

impl<H: OnboardingStepHandler> OnboardingScreen<H> {
    pub fn new(
        handler: H,
        renewal: bool,
        profile_api: Arc<dyn ProfileApiPort>,
        store: LocalStore,
    ) -> Self {
        let step = handler.step();
        let ctx = if renewal && step.is_renewable() {
            ScreenContext::renewal(step)
        } else {
            ScreenContext::new(step)
        };
        let session = SessionContext::anonymous();
        Self {
            ctx,
            handler,
            profile_api,
            sessions: SessionStore::new(store.clone()),
            checkpoints: CheckpointManager::new(store.clone(), &session),
            store,
            session,
            state: ScreenState::CheckingAuth,
            data: None,
            payload: None,
            navigation: None,
            alerts: Vec::new(),
            warning: None,
        }
    }

    pub fn context(&self) -> &ScreenContext {
        &self.ctx
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Data loaded on entry, once the screen reached `Ready`.
    pub fn data(&self) -> Option<&H::Data> {
        self.data.as_ref()
    }

    /// Where the screen asked to navigate, if anywhere.
    pub fn navigation(&self) -> Option<Route> {
        self.navigation
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Non-blocking warning from the last successful submission.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Run the route guard and, when allowed, load the screen.
    ///
    /// The session is read once here and reused for the rest of the
    /// screen's life.
    pub async fn enter(&mut self) -> ScreenState {
        self.session = self.sessions.load().await;
        self.checkpoints = CheckpointManager::new(self.store.clone(), &self.session);

        let onboarding_complete = if self.session.is_authenticated() {
            self.fetch_onboarding_complete().await
        } else {
            None
        };
        let decision = RouteGuard::evaluate(&self.ctx.route(), &self.session, onboarding_complete);
        self.dispatch(ScreenEvent::Guarded { decision }).await
    }

    /// Validate `form` locally and submit it when valid. A form rejected by
    /// the backend can be edited and submitted again.
    pub async fn submit(&mut self, form: &H::Form) -> ScreenState {
        let editable = matches!(
            self.state,
            ScreenState::Ready { .. }
                | ScreenState::Error {
                    error: ScreenError::SubmitFailed { .. }
                }
        );
        if !editable {
            debug!(state = ?self.state, "submit ignored while the form is not editable");
            return self.state.clone();
        }
        let Some(data) = self.data.as_ref() else {
            return self.state.clone();
        };
        match self.handler.validate(data, form) {
            Ok(payload) => {
                self.payload = Some(payload);
                self.dispatch(ScreenEvent::Submit).await
            }
            Err(errors) => {
                self.dispatch(ScreenEvent::ValidationFailed {
                    errors: errors.into_inner(),
                })
                .await
            }
        }
    }

    /// Manual retry after an inline error. After a failed completion only
    /// the completion reruns.
    pub async fn retry(&mut self) -> ScreenState {
        self.dispatch(ScreenEvent::Retry).await
    }

    async fn fetch_onboarding_complete(&self) -> Option<bool> {
        match self.profile_api.get_profile().await {
            Ok(profile) => Some(profile.onboarding_complete),
            Err(err) => {
                debug!(error = %err, "onboarding completion unknown");
                None
            }
        }
    }

    async fn dispatch(&mut self, event: ScreenEvent) -> ScreenState {
        let span = info_span!(
            "usecase.onboarding_screen.dispatch",
            step = %self.ctx.step,
            renewal = self.ctx.renewal,
            event = ?event
        );
        async {
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from = self.state.clone();
                let event_name = format!("{:?}", event);
                let (next, actions) = ScreenStateMachine::transition(&self.ctx, from.clone(), event);
                info!(from = ?from, to = ?next, event = %event_name, "onboarding screen transition");
                self.state = next;
                let follow_up_events = self.execute_actions(actions).await;
                pending_events.extend(follow_up_events);
            }

            self.state.clone()
        }
        .instrument(span)
        .await
    }

    /// Run `actions` in order. A failing action stops the batch and reports
    /// the failure as the follow-up event.
    async fn execute_actions(&mut self, actions: Vec<ScreenAction>) -> Vec<ScreenEvent> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "onboarding executing action");
            match action {
                ScreenAction::SaveCheckpoint { step } => {
                    self.checkpoints.save_progress(step).await;
                }
                ScreenAction::LoadData => match self.handler.load().await {
                    Ok(data) => {
                        self.data = Some(data);
                        follow_up_events.push(ScreenEvent::Loaded);
                    }
                    Err(err) => {
                        follow_up_events.push(Self::failure_event(err, true));
                        break;
                    }
                },
                ScreenAction::SubmitForm => {
                    let Some(payload) = self.payload.as_ref() else {
                        warn!("submit requested without a validated form");
                        follow_up_events.push(ScreenEvent::SubmitFailed {
                            message: "nothing to submit".to_string(),
                        });
                        break;
                    };
                    match self.handler.submit(payload).await {
                        Ok(report) => {
                            if let Some(warning) = &report.warning {
                                warn!(step = %self.ctx.step, warning = %warning, "step submitted with warning");
                            }
                            self.warning = report.warning;
                            follow_up_events.push(ScreenEvent::SubmitSucceeded);
                        }
                        Err(err) => {
                            follow_up_events.push(Self::failure_event(err, false));
                            break;
                        }
                    }
                }
                ScreenAction::CompleteOnboarding => {
                    if let Some(failure) = self.complete_onboarding().await {
                        follow_up_events.push(failure);
                        break;
                    }
                }
                ScreenAction::ClearCheckpoint => {
                    self.checkpoints.clear_progress().await;
                }
                ScreenAction::ShowUnauthorizedAlert => {
                    self.alerts.push(UNAUTHORIZED_ALERT.to_string());
                }
                ScreenAction::ClearSession => {
                    self.sessions.clear().await;
                }
                ScreenAction::Navigate { to } => {
                    info!(to = %to, "onboarding navigate");
                    self.navigation = Some(to);
                }
            }
        }
        follow_up_events
    }

    /// Steps are walked in order, so reaching this screen means every step
    /// up to and including it was submitted.
    async fn complete_onboarding(&self) -> Option<ScreenEvent> {
        let completed = &OnboardingStep::ALL[..=self.ctx.step.index()];
        if !all_steps_complete(completed) {
            warn!(step = %self.ctx.step, "refusing to complete onboarding early");
            return Some(ScreenEvent::CompletionFailed {
                message: format!("onboarding incomplete at {}", self.ctx.step),
            });
        }
        match self
            .profile_api
            .patch_profile(&ProfilePatch::onboarding_complete())
            .await
        {
            Ok(_) => {
                info!("onboarding marked complete");
                None
            }
            Err(ApiError::Unauthorized) => Some(ScreenEvent::SubmitUnauthorized),
            Err(err) => {
                warn!(error = %err, "marking onboarding complete failed");
                Some(ScreenEvent::CompletionFailed {
                    message: err.to_string(),
                })
            }
        }
    }

    fn failure_event(err: ApiError, loading: bool) -> ScreenEvent {
        match err {
            ApiError::Unauthorized => ScreenEvent::SubmitUnauthorized,
            other if loading => ScreenEvent::LoadFailed {
                message: other.to_string(),
            },
            other => ScreenEvent::SubmitFailed {
                message: other.to_string(),
            },
        }
    }
}

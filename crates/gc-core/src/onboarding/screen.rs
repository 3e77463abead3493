//! Onboarding screen state machine.
//!
//! Defines a pure state transition function shared by every onboarding
//! screen. The orchestrator in `gc-app` executes the produced actions and
//! feeds their results back as events.

use serde::{Deserialize, Serialize};

use crate::navigation::{GuardDecision, Route};
use crate::onboarding::OnboardingStep;
use crate::validation::FieldError;

/// Static facts about the screen being driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenContext {
    pub step: OnboardingStep,
    /// Cycle renewal: a completed user re-taking the questionnaires.
    pub renewal: bool,
}

impl ScreenContext {
    pub fn new(step: OnboardingStep) -> Self {
        Self {
            step,
            renewal: false,
        }
    }

    pub fn renewal(step: OnboardingStep) -> Self {
        Self {
            step,
            renewal: true,
        }
    }

    pub fn route(&self) -> Route {
        Route::Onboarding {
            step: self.step,
            renewal: self.renewal,
        }
    }

    /// Checkpoints are only maintained during first-time onboarding.
    fn tracks_checkpoint(&self) -> bool {
        !self.renewal
    }
}

/// Screen-level failure shown inline with a manual retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenError {
    LoadFailed { message: String },
    SubmitFailed { message: String },
    /// The last step was accepted but marking onboarding complete failed.
    CompletionFailed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenState {
    CheckingAuth,
    Loading,
    /// Form is interactive; `errors` holds field-scoped validation messages.
    Ready { errors: Vec<FieldError> },
    Submitting,
    /// Submission acknowledged, checkpoint and navigation in progress.
    Advancing { to: Route },
    Error { error: ScreenError },
    RedirectLogin,
    RedirectHome,
}

impl ScreenState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScreenState::Advancing { .. } | ScreenState::RedirectLogin | ScreenState::RedirectHome
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenEvent {
    /// Route guard evaluated on entry.
    Guarded { decision: GuardDecision },
    Loaded,
    LoadFailed { message: String },
    /// Local validation passed, user pressed submit.
    Submit,
    ValidationFailed { errors: Vec<FieldError> },
    SubmitSucceeded,
    SubmitUnauthorized,
    SubmitFailed { message: String },
    CompletionFailed { message: String },
    /// Manual retry after an inline error.
    Retry,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenAction {
    SaveCheckpoint { step: OnboardingStep },
    LoadData,
    SubmitForm,
    /// Mark onboarding finished server-side.
    CompleteOnboarding,
    ClearCheckpoint,
    ShowUnauthorizedAlert,
    ClearSession,
    Navigate { to: Route },
}

/// Pure onboarding screen state machine.
pub struct ScreenStateMachine;

impl ScreenStateMachine {
    pub fn transition(
        ctx: &ScreenContext,
        state: ScreenState,
        event: ScreenEvent,
    ) -> (ScreenState, Vec<ScreenAction>) {
        match (state, event) {
            (ScreenState::CheckingAuth, ScreenEvent::Guarded { decision }) => match decision {
                GuardDecision::Allow => {
                    let mut actions = Vec::new();
                    if ctx.tracks_checkpoint() {
                        actions.push(ScreenAction::SaveCheckpoint { step: ctx.step });
                    }
                    actions.push(ScreenAction::LoadData);
                    (ScreenState::Loading, actions)
                }
                GuardDecision::RedirectLogin => (
                    ScreenState::RedirectLogin,
                    vec![ScreenAction::Navigate { to: Route::Login }],
                ),
                GuardDecision::RedirectHome => (
                    ScreenState::RedirectHome,
                    vec![ScreenAction::Navigate { to: Route::Home }],
                ),
            },
            (ScreenState::Loading, ScreenEvent::Loaded) => {
                (ScreenState::Ready { errors: Vec::new() }, Vec::new())
            }
            (ScreenState::Loading, ScreenEvent::LoadFailed { message }) => (
                ScreenState::Error {
                    error: ScreenError::LoadFailed { message },
                },
                Vec::new(),
            ),
            (ScreenState::Ready { .. }, ScreenEvent::ValidationFailed { errors }) => {
                (ScreenState::Ready { errors }, Vec::new())
            }
            (ScreenState::Ready { .. }, ScreenEvent::Submit) => {
                (ScreenState::Submitting, vec![ScreenAction::SubmitForm])
            }
            (ScreenState::Submitting, ScreenEvent::SubmitSucceeded) => Self::advance(ctx),
            (
                ScreenState::Submitting | ScreenState::Advancing { .. },
                ScreenEvent::SubmitUnauthorized,
            ) => (
                ScreenState::RedirectLogin,
                vec![
                    ScreenAction::ShowUnauthorizedAlert,
                    ScreenAction::ClearSession,
                    ScreenAction::Navigate { to: Route::Login },
                ],
            ),
            (
                ScreenState::Submitting | ScreenState::Advancing { .. },
                ScreenEvent::SubmitFailed { message },
            ) => (
                ScreenState::Error {
                    error: ScreenError::SubmitFailed { message },
                },
                Vec::new(),
            ),
            (ScreenState::Advancing { .. }, ScreenEvent::CompletionFailed { message }) => (
                ScreenState::Error {
                    error: ScreenError::CompletionFailed { message },
                },
                Vec::new(),
            ),
            (ScreenState::Loading, ScreenEvent::SubmitUnauthorized) => (
                ScreenState::RedirectLogin,
                vec![
                    ScreenAction::ShowUnauthorizedAlert,
                    ScreenAction::ClearSession,
                    ScreenAction::Navigate { to: Route::Login },
                ],
            ),
            (
                ScreenState::Error {
                    error: ScreenError::LoadFailed { .. },
                },
                ScreenEvent::Retry,
            ) => (ScreenState::Loading, vec![ScreenAction::LoadData]),
            (
                ScreenState::Error {
                    error: ScreenError::SubmitFailed { .. },
                },
                ScreenEvent::Retry,
            ) => (ScreenState::Submitting, vec![ScreenAction::SubmitForm]),
            // Editing the form after a rejected submit.
            (
                ScreenState::Error {
                    error: ScreenError::SubmitFailed { .. },
                },
                ScreenEvent::Submit,
            ) => (ScreenState::Submitting, vec![ScreenAction::SubmitForm]),
            (
                ScreenState::Error {
                    error: ScreenError::LoadFailed { .. } | ScreenError::SubmitFailed { .. },
                },
                ScreenEvent::ValidationFailed { errors },
            ) => (ScreenState::Ready { errors }, Vec::new()),
            // The step is already stored server-side; only completion reruns.
            (
                ScreenState::Error {
                    error: ScreenError::CompletionFailed { .. },
                },
                ScreenEvent::Retry,
            ) => Self::complete(),
            (state, _event) => (state, Vec::new()),
        }
    }

    fn advance(ctx: &ScreenContext) -> (ScreenState, Vec<ScreenAction>) {
        if ctx.renewal {
            let to = match ctx.step.next() {
                Some(next) if next.is_renewable() => Route::Onboarding {
                    step: next,
                    renewal: true,
                },
                _ => Route::Home,
            };
            return (
                ScreenState::Advancing { to },
                vec![ScreenAction::Navigate { to }],
            );
        }

        match ctx.step.next() {
            Some(next) => {
                let to = Route::Onboarding {
                    step: next,
                    renewal: false,
                };
                (
                    ScreenState::Advancing { to },
                    vec![
                        ScreenAction::SaveCheckpoint { step: next },
                        ScreenAction::Navigate { to },
                    ],
                )
            }
            None => Self::complete(),
        }
    }

    fn complete() -> (ScreenState, Vec<ScreenAction>) {
        (
            ScreenState::Advancing { to: Route::Home },
            vec![
                ScreenAction::CompleteOnboarding,
                ScreenAction::ClearCheckpoint,
                ScreenAction::Navigate { to: Route::Home },
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow(ctx: &ScreenContext) -> (ScreenState, Vec<ScreenAction>) {
        ScreenStateMachine::transition(
            ctx,
            ScreenState::CheckingAuth,
            ScreenEvent::Guarded {
                decision: GuardDecision::Allow,
            },
        )
    }

    #[test]
    fn entry_saves_own_checkpoint_then_loads() {
        let ctx = ScreenContext::new(OnboardingStep::Rsi);
        let (next, actions) = allow(&ctx);
        assert_eq!(next, ScreenState::Loading);
        assert_eq!(
            actions,
            vec![
                ScreenAction::SaveCheckpoint {
                    step: OnboardingStep::Rsi
                },
                ScreenAction::LoadData,
            ]
        );
    }

    #[test]
    fn missing_token_redirects_without_loading() {
        let ctx = ScreenContext::new(OnboardingStep::General);
        let (next, actions) = ScreenStateMachine::transition(
            &ctx,
            ScreenState::CheckingAuth,
            ScreenEvent::Guarded {
                decision: GuardDecision::RedirectLogin,
            },
        );
        assert_eq!(next, ScreenState::RedirectLogin);
        assert_eq!(actions, vec![ScreenAction::Navigate { to: Route::Login }]);
    }

    #[test]
    fn renewal_entry_does_not_touch_checkpoint() {
        let ctx = ScreenContext::renewal(OnboardingStep::GerdQ);
        let (_, actions) = allow(&ctx);
        assert_eq!(actions, vec![ScreenAction::LoadData]);
    }

    #[test]
    fn success_saves_next_checkpoint_before_navigating() {
        let ctx = ScreenContext::new(OnboardingStep::General);
        let (next, actions) =
            ScreenStateMachine::transition(&ctx, ScreenState::Submitting, ScreenEvent::SubmitSucceeded);
        let to = Route::Onboarding {
            step: OnboardingStep::GerdQ,
            renewal: false,
        };
        assert_eq!(next, ScreenState::Advancing { to });
        assert_eq!(
            actions,
            vec![
                ScreenAction::SaveCheckpoint {
                    step: OnboardingStep::GerdQ
                },
                ScreenAction::Navigate { to },
            ]
        );
    }

    #[test]
    fn last_step_completes_and_clears_checkpoint() {
        let ctx = ScreenContext::new(OnboardingStep::Habits);
        let (next, actions) =
            ScreenStateMachine::transition(&ctx, ScreenState::Submitting, ScreenEvent::SubmitSucceeded);
        assert_eq!(next, ScreenState::Advancing { to: Route::Home });
        assert_eq!(
            actions,
            vec![
                ScreenAction::CompleteOnboarding,
                ScreenAction::ClearCheckpoint,
                ScreenAction::Navigate { to: Route::Home },
            ]
        );
    }

    #[test]
    fn renewal_runs_gerdq_then_rsi_then_home() {
        let gerdq = ScreenContext::renewal(OnboardingStep::GerdQ);
        let (_, actions) =
            ScreenStateMachine::transition(&gerdq, ScreenState::Submitting, ScreenEvent::SubmitSucceeded);
        assert_eq!(
            actions,
            vec![ScreenAction::Navigate {
                to: Route::Onboarding {
                    step: OnboardingStep::Rsi,
                    renewal: true
                }
            }]
        );

        let rsi = ScreenContext::renewal(OnboardingStep::Rsi);
        let (next, actions) =
            ScreenStateMachine::transition(&rsi, ScreenState::Submitting, ScreenEvent::SubmitSucceeded);
        assert_eq!(next, ScreenState::Advancing { to: Route::Home });
        assert_eq!(actions, vec![ScreenAction::Navigate { to: Route::Home }]);
    }

    #[test]
    fn unauthorized_submit_alerts_and_redirects() {
        let ctx = ScreenContext::new(OnboardingStep::ClinicalFactors);
        let (next, actions) = ScreenStateMachine::transition(
            &ctx,
            ScreenState::Submitting,
            ScreenEvent::SubmitUnauthorized,
        );
        assert_eq!(next, ScreenState::RedirectLogin);
        assert_eq!(actions[0], ScreenAction::ShowUnauthorizedAlert);
        assert_eq!(actions.last(), Some(&ScreenAction::Navigate { to: Route::Login }));
    }

    #[test]
    fn failed_submit_is_retried_manually() {
        let ctx = ScreenContext::new(OnboardingStep::DiagnosticTests);
        let (state, actions) = ScreenStateMachine::transition(
            &ctx,
            ScreenState::Submitting,
            ScreenEvent::SubmitFailed {
                message: "500".into(),
            },
        );
        assert!(actions.is_empty());
        assert!(matches!(
            state,
            ScreenState::Error {
                error: ScreenError::SubmitFailed { .. }
            }
        ));

        let (state, actions) = ScreenStateMachine::transition(&ctx, state, ScreenEvent::Retry);
        assert_eq!(state, ScreenState::Submitting);
        assert_eq!(actions, vec![ScreenAction::SubmitForm]);
    }

    #[test]
    fn rejected_submit_accepts_an_edited_form() {
        let ctx = ScreenContext::new(OnboardingStep::General);
        let rejected = ScreenState::Error {
            error: ScreenError::SubmitFailed {
                message: "weight out of range".into(),
            },
        };

        let (state, actions) =
            ScreenStateMachine::transition(&ctx, rejected.clone(), ScreenEvent::Submit);
        assert_eq!(state, ScreenState::Submitting);
        assert_eq!(actions, vec![ScreenAction::SubmitForm]);

        let errors = vec![FieldError::new("weight", "required")];
        let (state, actions) = ScreenStateMachine::transition(
            &ctx,
            rejected,
            ScreenEvent::ValidationFailed {
                errors: errors.clone(),
            },
        );
        assert_eq!(state, ScreenState::Ready { errors });
        assert!(actions.is_empty());
    }

    #[test]
    fn failed_completion_retries_only_completion() {
        let ctx = ScreenContext::new(OnboardingStep::Habits);
        let (state, actions) = ScreenStateMachine::transition(
            &ctx,
            ScreenState::Advancing { to: Route::Home },
            ScreenEvent::CompletionFailed {
                message: "503".into(),
            },
        );
        assert!(actions.is_empty());
        assert!(matches!(
            state,
            ScreenState::Error {
                error: ScreenError::CompletionFailed { .. }
            }
        ));

        let (next, actions) =
            ScreenStateMachine::transition(&ctx, state.clone(), ScreenEvent::Retry);
        assert_eq!(next, ScreenState::Advancing { to: Route::Home });
        assert_eq!(
            actions,
            vec![
                ScreenAction::CompleteOnboarding,
                ScreenAction::ClearCheckpoint,
                ScreenAction::Navigate { to: Route::Home },
            ]
        );
        assert!(!actions.contains(&ScreenAction::SubmitForm));

        let (unchanged, actions) =
            ScreenStateMachine::transition(&ctx, state.clone(), ScreenEvent::Submit);
        assert_eq!(unchanged, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn validation_failure_keeps_form_interactive() {
        let ctx = ScreenContext::new(OnboardingStep::General);
        let errors = vec![FieldError::new("weight", "required")];
        let (state, actions) = ScreenStateMachine::transition(
            &ctx,
            ScreenState::Ready { errors: Vec::new() },
            ScreenEvent::ValidationFailed {
                errors: errors.clone(),
            },
        );
        assert_eq!(state, ScreenState::Ready { errors });
        assert!(actions.is_empty());
    }

    #[test]
    fn unexpected_events_are_ignored() {
        let ctx = ScreenContext::new(OnboardingStep::General);
        let (state, actions) =
            ScreenStateMachine::transition(&ctx, ScreenState::Loading, ScreenEvent::Submit);
        assert_eq!(state, ScreenState::Loading);
        assert!(actions.is_empty());
    }
}

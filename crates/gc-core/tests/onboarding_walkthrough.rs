use gc_core::navigation::{GuardDecision, Route, RouteGuard};
use gc_core::onboarding::{
    OnboardingStep, ScreenAction, ScreenContext, ScreenEvent, ScreenState, ScreenStateMachine,
};
use gc_core::SessionContext;

/// Drive one screen from entry to a successful submit, returning every
/// action in order.
fn run_screen(ctx: ScreenContext, session: &SessionContext) -> (ScreenState, Vec<ScreenAction>) {
    let mut actions = Vec::new();
    let decision = RouteGuard::evaluate(&ctx.route(), session, Some(false));

    let mut state = ScreenState::CheckingAuth;
    for event in [
        ScreenEvent::Guarded { decision },
        ScreenEvent::Loaded,
        ScreenEvent::Submit,
        ScreenEvent::SubmitSucceeded,
    ] {
        let (next, produced) = ScreenStateMachine::transition(&ctx, state, event);
        actions.extend(produced);
        state = next;
    }
    (state, actions)
}

#[test]
fn six_screens_walk_to_home() {
    let session = SessionContext::new(Some("token".into()), Some("ana".into()));
    let mut route = Route::onboarding(OnboardingStep::General);
    let mut visited = Vec::new();

    while let Route::Onboarding { step, .. } = route {
        visited.push(step);
        let (state, actions) = run_screen(ScreenContext::new(step), &session);
        let ScreenState::Advancing { to } = state else {
            panic!("{step} did not advance: {state:?}");
        };
        assert_eq!(actions.first(), Some(&ScreenAction::SaveCheckpoint { step }));
        route = to;
    }

    assert_eq!(route, Route::Home);
    assert_eq!(visited, OnboardingStep::ALL.to_vec());
}

#[test]
fn anonymous_session_never_loads() {
    for step in OnboardingStep::ALL {
        let ctx = ScreenContext::new(step);
        let decision = RouteGuard::evaluate(&ctx.route(), &SessionContext::anonymous(), None);
        assert_eq!(decision, GuardDecision::RedirectLogin);

        let (state, actions) =
            ScreenStateMachine::transition(&ctx, ScreenState::CheckingAuth, ScreenEvent::Guarded { decision });
        assert_eq!(state, ScreenState::RedirectLogin);
        assert!(!actions.contains(&ScreenAction::LoadData));
        assert!(!actions.iter().any(|a| matches!(a, ScreenAction::SaveCheckpoint { .. })));
    }
}

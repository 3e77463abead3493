//! Navigation routes and the route guard.
//!
//! The guard runs once per navigation event instead of being repeated by
//! every screen.

use serde::{Deserialize, Serialize};

use crate::onboarding::OnboardingStep;
use crate::session::SessionContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    Home,
    Onboarding { step: OnboardingStep, renewal: bool },
    Tracker,
    Stats,
    Learn,
    Profile,
}

impl Route {
    pub fn onboarding(step: OnboardingStep) -> Self {
        Route::Onboarding {
            step,
            renewal: false,
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Login => f.write_str("Login"),
            Route::Home => f.write_str("Home"),
            Route::Onboarding { step, renewal: false } => write!(f, "{step}"),
            Route::Onboarding { step, renewal: true } => write!(f, "{step} (renewal)"),
            Route::Tracker => f.write_str("Tracker"),
            Route::Stats => f.write_str("Stats"),
            Route::Learn => f.write_str("Learn"),
            Route::Profile => f.write_str("Profile"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardDecision {
    Allow,
    RedirectLogin,
    RedirectHome,
}

pub struct RouteGuard;

impl RouteGuard {
    /// Decide whether `route` may be shown.
    ///
    /// `onboarding_complete` is the server-side flag when known; `None` means
    /// it has not been fetched and the completed-user redirect is skipped.
    pub fn evaluate(
        route: &Route,
        session: &SessionContext,
        onboarding_complete: Option<bool>,
    ) -> GuardDecision {
        if route.requires_auth() && !session.is_authenticated() {
            return GuardDecision::RedirectLogin;
        }

        if let Route::Onboarding { step, renewal } = route {
            let renewing = *renewal && step.is_renewable();
            if onboarding_complete == Some(true) && !renewing {
                return GuardDecision::RedirectHome;
            }
        }

        GuardDecision::Allow
    }
}

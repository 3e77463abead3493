//! Business logic use cases
//!
//! Onboarding drives the first-run flow; the rest back the tab screens once
//! onboarding is complete.
//!
// ResumeOnboarding → Route
//         ↓
// OnboardingFlow::{general, gerd_q, rsi, clinical_factors, diagnostic_tests, habits}
//         ↓
// DailyHabitTracker / CollectHabitStats / content / profile

pub mod auth;
pub mod content;
pub mod habits;
pub mod onboarding;
pub mod profile;

pub use auth::{Login, LoginError, Logout};
pub use habits::DailyHabitTracker;
pub use onboarding::{OnboardingFlow, ResumeOnboarding};

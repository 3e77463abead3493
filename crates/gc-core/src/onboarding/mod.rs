//! Onboarding domain models
//!
//! The onboarding flow is a fixed sequence of six screens. Progress is
//! bookmarked locally so a relaunch resumes on the first unfinished screen.

pub mod screen;
pub mod step;

pub use screen::{ScreenAction, ScreenContext, ScreenError, ScreenEvent, ScreenState, ScreenStateMachine};
pub use step::{all_steps_complete, OnboardingStep};

//! # gc-core
//!
//! Core domain models and business logic for the GERD coach client.
//!
//! This crate contains pure logic without any infrastructure dependencies.

pub mod auth;
pub mod config;
pub mod content;
pub mod habits;
pub mod navigation;
pub mod onboarding;
pub mod ports;
pub mod profile;
pub mod questionnaire;
pub mod retry;
pub mod session;
pub mod validation;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use navigation::{GuardDecision, Route, RouteGuard};
pub use onboarding::OnboardingStep;
pub use retry::{Backoff, RetryPolicy};
pub use session::SessionContext;

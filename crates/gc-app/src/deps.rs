//! # Application Dependencies
//!
//! Dependency grouping for use-case construction.
//!
//! **Note**: This is NOT a Builder pattern. No build steps, no default
//! values, no hidden logic. Just parameter grouping.

use std::sync::Arc;

use gc_core::ports::*;
use gc_core::RetryPolicy;

/// Application dependency grouping (non-Builder, just parameter grouping)
///
/// All dependencies are required - no defaults, no optional fields.
#[derive(Clone)]
pub struct AppDeps {
    // Backend API
    pub profile_api: Arc<dyn ProfileApiPort>,
    pub questionnaire_api: Arc<dyn QuestionnaireApiPort>,
    pub habit_api: Arc<dyn HabitApiPort>,
    pub content_api: Arc<dyn ContentApiPort>,
    pub auth_api: Arc<dyn AuthApiPort>,

    // Local storage
    pub store: Arc<dyn KeyValueStorePort>,

    // System
    pub clock: Arc<dyn ClockPort>,
    pub sleeper: Arc<dyn SleeperPort>,

    // Policy
    pub clinical_retry: RetryPolicy,
}

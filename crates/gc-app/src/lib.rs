//! GERD coach application orchestration layer
//!
//! This crate contains the use cases that drive the onboarding flow, habit
//! tracking and profile management on top of the `gc-core` ports.

pub mod deps;
pub mod session;
pub mod storage;
pub mod usecases;

#[cfg(test)]
pub(crate) mod testing;

pub use deps::AppDeps;
pub use session::SessionStore;
pub use storage::LocalStore;

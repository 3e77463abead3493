//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and infrastructure
//! implementations. This follows Hexagonal Architecture principles, keeping
//! the core independent of HTTP and storage details.

pub mod api;
mod clock;
pub mod errors;
mod storage;

pub use api::{AuthApiPort, ContentApiPort, HabitApiPort, ProfileApiPort, QuestionnaireApiPort};
pub use clock::{ClockPort, SleeperPort};
pub use errors::{ApiError, ApiResult};
pub use storage::KeyValueStorePort;

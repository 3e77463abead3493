//! Infrastructure adapters: the REST backend client, local key-value
//! storage and wall-clock time.

pub mod http;
pub mod storage;
pub mod time;

pub use http::HttpBackendClient;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::{SystemClock, TokioSleeper};

mod file_kv;
mod memory;

pub use file_kv::{FileKeyValueStore, DEFAULT_STORE_FILE};
pub use memory::InMemoryKeyValueStore;

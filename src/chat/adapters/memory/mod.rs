//! In-memory adapters for the chat ports.

mod file_storage;
mod store;

pub use file_storage::{InMemoryFileStorage, StoredObject};
pub use store::InMemoryChatStore;

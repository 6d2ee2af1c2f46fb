pub mod storage;

pub use storage::{FileStore, KeyValueStore, LocalStorage, MemoryStore};

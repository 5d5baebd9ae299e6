//! Storage layer.
//!
//! - `atomic_toml`: ACID-style TOML file access (tmp + fsync + rename, file lock)
//! - `file_store`: the durable key-value store built on it

pub mod atomic_toml;
pub mod file_store;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use file_store::FileKeyValueStore;

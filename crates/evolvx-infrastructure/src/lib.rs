//! Local infrastructure for the Evolvx client: paths, configuration loading
//! and the file-backed durable key-value store.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use paths::{EvolvxPaths, PathError};
pub use storage::FileKeyValueStore;

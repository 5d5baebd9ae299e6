//! Session model and persistence seams.

pub mod authorization;
pub mod memory_store;
pub mod model;
pub mod storage;

pub use authorization::DefaultAuthorization;
pub use memory_store::MemoryKeyValueStore;
pub use model::{AuthOutcome, Credentials, SessionState, UserIdentity, bearer_value};
pub use storage::{AUTH_TOKEN_KEY, KeyValueStore, USER_KEY};

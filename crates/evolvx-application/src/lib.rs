//! Application layer for Evolvx.
//!
//! Coordinates the core model, durable storage and the API client: the
//! session lifecycle and the use cases screens are built on.

pub mod dashboard_usecase;
pub mod session_manager;

pub use dashboard_usecase::{DashboardUseCase, WorkoutHistory};
pub use session_manager::SessionManager;

//! Source of workout data for derived-state use cases.

use async_trait::async_trait;

use super::model::WorkoutPage;
use crate::api::ApiError;

/// Paged access to the signed-in user's workouts.
///
/// Implemented by the shared HTTP client; use cases depend on this trait so
/// they can be driven by fixtures in tests.
#[async_trait]
pub trait WorkoutFeed: Send + Sync {
    /// Fetches one page, newest first. Pages start at 1.
    async fn workouts_page(&self, page: u32, per_page: u32) -> Result<WorkoutPage, ApiError>;
}

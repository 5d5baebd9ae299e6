//! Dashboard use case: the workout history screen's data.

use std::sync::Arc;

use chrono::NaiveDate;
use evolvx_core::api::ApiError;
use evolvx_core::filter::filter_by_query;
use evolvx_core::workout::{WorkoutFeed, WorkoutSummary, current_streak};

use crate::session_manager::SessionManager;

/// Upper bound on pages fetched while counting a streak.
const MAX_STREAK_PAGES: u32 = 20;

/// One rendered page of the workout history.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutHistory {
    /// Workouts of the page that match the search query, in server order.
    pub workouts: Vec<WorkoutSummary>,
    pub page: u32,
    /// Total workouts on the server, before searching.
    pub total: u64,
    pub total_volume: f64,
}

/// Fetches workouts through the guarded session and derives dashboard data.
pub struct DashboardUseCase {
    feed: Arc<dyn WorkoutFeed>,
    session: Arc<SessionManager>,
    page_size: u32,
}

impl DashboardUseCase {
    pub fn new(feed: Arc<dyn WorkoutFeed>, session: Arc<SessionManager>, page_size: u32) -> Self {
        Self {
            feed,
            session,
            page_size: page_size.max(1),
        }
    }

    /// One page of history, narrowed by `query` on the client.
    pub async fn history(&self, page: u32, query: &str) -> Result<WorkoutHistory, ApiError> {
        let page = page.max(1);
        let fetched = self
            .session
            .guard(self.feed.workouts_page(page, self.page_size))
            .await?;

        let workouts = filter_by_query(&fetched.workouts, query);
        let total_volume = workouts.iter().map(WorkoutSummary::volume).sum();

        Ok(WorkoutHistory {
            workouts,
            page: fetched.page,
            total: fetched.total,
            total_volume,
        })
    }

    /// Current streak as of `today`.
    ///
    /// The server orders history by creation time, so a backdated workout can
    /// sit on any page. Pages are read until the history is exhausted or
    /// `MAX_STREAK_PAGES` is reached.
    pub async fn streak(&self, today: NaiveDate) -> Result<u32, ApiError> {
        let mut workouts: Vec<WorkoutSummary> = Vec::new();

        for page in 1..=MAX_STREAK_PAGES {
            let fetched = self
                .session
                .guard(self.feed.workouts_page(page, self.page_size))
                .await?;
            let exhausted = fetched.workouts.is_empty()
                || workouts.len() as u64 + fetched.workouts.len() as u64 >= fetched.total;
            workouts.extend(fetched.workouts);

            if exhausted {
                return Ok(current_streak(&workouts, today));
            }
        }

        tracing::debug!(
            "[Dashboard] History longer than {} pages, streak is a lower bound",
            MAX_STREAK_PAGES
        );
        Ok(current_streak(&workouts, today))
    }
}

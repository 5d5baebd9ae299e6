//! Case-insensitive text search over lists shown on screens.

use std::borrow::Cow;

use crate::api::{Friend, LeaderboardEntry};
use crate::workout::{Exercise, WorkoutSummary};

/// An entity with designated searchable text fields.
pub trait Searchable {
    fn search_fields(&self) -> Vec<Cow<'_, str>>;

    /// True when any field contains `needle`. `needle` must already be
    /// lowercased.
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Keeps the items matching `query`, preserving input order.
///
/// The query is trimmed; an empty query returns the input unchanged.
pub fn filter_by_query<T>(items: &[T], query: &str) -> Vec<T>
where
    T: Searchable + Clone,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.matches_lowercase(&needle))
        .cloned()
        .collect()
}

impl Searchable for WorkoutSummary {
    /// Name, display date, ISO date and every exercise name.
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = Vec::with_capacity(3 + self.exercises.len());
        fields.push(Cow::Borrowed(self.workout_name.as_str()));
        fields.push(Cow::Owned(self.display_date()));
        fields.push(Cow::Owned(self.day().to_string()));
        fields.extend(self.exercises.iter().map(|e| Cow::Borrowed(e.name.as_str())));
        fields
    }
}

impl Searchable for Exercise {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.name.as_str()),
            Cow::Borrowed(self.muscle_group.as_str()),
        ]
    }
}

impl Searchable for Friend {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.username.as_str())]
    }
}

impl Searchable for LeaderboardEntry {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![Cow::Borrowed(self.username.as_str())]
    }
}

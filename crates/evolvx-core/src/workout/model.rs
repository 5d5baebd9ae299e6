//! Workout records as returned by the workouts and exercises endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::api::wire::{optional_timestamp, timestamp};

/// Display format of workout dates (e.g. `Oct 19, 2026`).
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

/// Read-only projection of a logged workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    pub workout_id: i64,
    pub workout_name: String,
    #[serde(with = "timestamp")]
    pub workout_date: NaiveDateTime,
    /// Minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "optional_timestamp")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub exercises: Vec<WorkoutExercise>,
}

impl WorkoutSummary {
    /// Calendar day of the workout, time of day stripped.
    pub fn day(&self) -> NaiveDate {
        self.workout_date.date()
    }

    pub fn display_date(&self) -> String {
        self.workout_date.format(DISPLAY_DATE_FORMAT).to_string()
    }

    /// Training volume: sum of sets × reps × weight; bodyweight sets count 0.
    pub fn volume(&self) -> f64 {
        self.exercises.iter().map(WorkoutExercise::volume).sum()
    }
}

/// One exercise entry inside a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub exercise_id: i64,
    pub name: String,
    #[serde(default)]
    pub muscle_group: Option<String>,
    pub sets: u32,
    pub reps: u32,
    /// Kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
}

impl WorkoutExercise {
    pub fn volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight.unwrap_or(0.0)
    }
}

/// Response of `GET /workouts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPage {
    pub workouts: Vec<WorkoutSummary>,
    pub total: u64,
    pub page: u32,
}

/// Body of `POST /workouts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub workout_name: String,
    #[serde(with = "timestamp")]
    pub workout_date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub exercises: Vec<NewWorkoutExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkoutExercise {
    pub exercise_id: i64,
    pub sets: u32,
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Body of `PUT /workouts/{id}`. Only present fields are changed; a present
/// `exercises` list replaces every exercise of the workout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_timestamp"
    )]
    pub workout_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<NewWorkoutExercise>>,
}

impl WorkoutUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Response of `POST /workouts` and `PUT /workouts/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutAck {
    pub workout_id: i64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Catalogue entry from `GET /exercises`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub exercise_id: i64,
    pub name: String,
    pub muscle_group: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_compound: bool,
}

//! Workouts: records, the creation wizard and derived statistics.

pub mod draft;
pub mod model;
pub mod repository;
pub mod streak;
pub mod templates;

pub use draft::{DraftExercise, WorkoutDraft};
pub use model::{
    Exercise, NewWorkout, NewWorkoutExercise, WorkoutAck, WorkoutExercise, WorkoutPage,
    WorkoutSummary, WorkoutUpdate,
};
pub use repository::WorkoutFeed;
pub use streak::current_streak;
pub use templates::{TEMPLATES, WorkoutTemplate, find_template};

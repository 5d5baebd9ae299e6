pub mod auth;
pub mod coaching;
pub mod community;
pub mod workouts;

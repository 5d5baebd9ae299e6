//! Built-in workout templates offered by the creation wizard.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkoutTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub muscle_groups: &'static [&'static str],
    pub exercises: &'static [&'static str],
}

pub const TEMPLATES: &[WorkoutTemplate] = &[
    WorkoutTemplate {
        id: "push",
        name: "Push Day",
        muscle_groups: &["chest", "shoulders", "arms"],
        exercises: &["Bench Press", "Overhead Press", "Incline Dumbbell Press", "Tricep Dips"],
    },
    WorkoutTemplate {
        id: "pull",
        name: "Pull Day",
        muscle_groups: &["back", "arms"],
        exercises: &["Deadlift", "Pull Up", "Barbell Row", "Bicep Curl"],
    },
    WorkoutTemplate {
        id: "legs",
        name: "Leg Day",
        muscle_groups: &["legs"],
        exercises: &["Squat", "Romanian Deadlift", "Leg Press", "Calf Raise"],
    },
    WorkoutTemplate {
        id: "full-body",
        name: "Full Body",
        muscle_groups: &["chest", "back", "legs", "shoulders"],
        exercises: &["Squat", "Bench Press", "Barbell Row", "Overhead Press"],
    },
];

/// Looks a template up by id, case-insensitively.
pub fn find_template(id: &str) -> Option<&'static WorkoutTemplate> {
    TEMPLATES.iter().find(|t| t.id.eq_ignore_ascii_case(id.trim()))
}

//! In-progress workout built by the creation wizard.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::model::{NewWorkout, NewWorkoutExercise};
use super::templates::{WorkoutTemplate, find_template};
use crate::error::{EvolvxError, Result};
use crate::progress::progress_score;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftExercise {
    pub exercise_id: i64,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDraft {
    pub name: String,
    /// Id of the chosen [`WorkoutTemplate`].
    pub template: Option<String>,
    pub exercises: Vec<DraftExercise>,
    pub duration: Option<u32>,
    pub notes: Option<String>,
}

impl WorkoutDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks a template; the name is prefilled when still blank.
    pub fn choose_template(&mut self, id: &str) -> Result<&'static WorkoutTemplate> {
        let template =
            find_template(id).ok_or_else(|| EvolvxError::not_found("workout template", id))?;
        self.template = Some(template.id.to_string());
        if self.name.trim().is_empty() {
            self.name = template.name.to_string();
        }
        Ok(template)
    }

    pub fn add_exercise(&mut self, exercise: DraftExercise) {
        self.exercises.push(exercise);
    }

    /// Wizard steps: name filled, template chosen, at least one exercise.
    pub fn steps(&self) -> [bool; 3] {
        [
            !self.name.trim().is_empty(),
            self.template.is_some(),
            !self.exercises.is_empty(),
        ]
    }

    pub fn progress(&self) -> f64 {
        progress_score(&self.steps())
    }

    /// Turns the draft into a `POST /workouts` body. Requires a name and at
    /// least one exercise; the template is optional.
    pub fn to_new_workout(&self, workout_date: NaiveDateTime) -> Result<NewWorkout> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EvolvxError::validation("workout name is required"));
        }
        if self.exercises.is_empty() {
            return Err(EvolvxError::validation("add at least one exercise"));
        }

        Ok(NewWorkout {
            workout_name: name.to_string(),
            workout_date,
            duration: self.duration,
            notes: self.notes.clone().filter(|n| !n.trim().is_empty()),
            exercises: self
                .exercises
                .iter()
                .map(|e| NewWorkoutExercise {
                    exercise_id: e.exercise_id,
                    sets: e.sets,
                    reps: e.reps,
                    weight: e.weight,
                })
                .collect(),
        })
    }
}

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use evolvx_core::filter::filter_by_query;
use evolvx_core::workout::{
    DraftExercise, Exercise, NewWorkoutExercise, TEMPLATES, WorkoutDraft, WorkoutSummary,
    WorkoutUpdate,
};

use crate::app::{App, describe};

pub async fn history(app: &App, page: u32, search: Option<&str>, json: bool) -> Result<()> {
    app.require_user().await?;
    let history = app
        .dashboard
        .history(page, search.unwrap_or(""))
        .await
        .map_err(describe)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history.workouts)?);
        return Ok(());
    }

    if history.workouts.is_empty() {
        println!("No workouts found.");
        return Ok(());
    }
    for workout in &history.workouts {
        print_workout(workout);
    }
    println!(
        "\nPage {} · {} shown · {} total · volume {:.0} kg",
        history.page,
        history.workouts.len(),
        history.total,
        history.total_volume
    );
    Ok(())
}

fn print_workout(workout: &WorkoutSummary) {
    let duration = workout
        .duration
        .map(|m| format!(" · {m} min"))
        .unwrap_or_default();
    println!(
        "#{:<5} {:<14} {}{}",
        workout.workout_id,
        workout.display_date(),
        workout.workout_name,
        duration
    );
    for exercise in &workout.exercises {
        let weight = exercise
            .weight
            .map(|w| format!(" @ {w} kg"))
            .unwrap_or_default();
        println!(
            "        {} {}x{}{}",
            exercise.name, exercise.sets, exercise.reps, weight
        );
    }
}

pub async fn streak(app: &App) -> Result<()> {
    app.require_user().await?;
    let today = Local::now().date_naive();
    let streak = app
        .dashboard
        .streak(today)
        .await
        .map_err(describe)?;

    match streak {
        0 => println!("No active streak. Log a workout today to start one."),
        1 => println!("🔥 1 day streak"),
        n => println!("🔥 {n} day streak"),
    }
    Ok(())
}

pub async fn exercises(
    app: &App,
    muscle_group: Option<&str>,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let catalogue = app.protected(app.client.exercises(muscle_group, None)).await?;
    let shown = filter_by_query(&catalogue, search.unwrap_or(""));

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }
    for exercise in &shown {
        let kind = if exercise.is_compound { "compound" } else { "isolation" };
        println!(
            "#{:<4} {:<28} {:<10} {}",
            exercise.exercise_id, exercise.name, exercise.muscle_group, kind
        );
    }
    if shown.is_empty() {
        println!("No exercises found.");
    }
    Ok(())
}

pub fn templates() {
    for template in TEMPLATES {
        println!("{:<10} {}", template.id, template.name);
        println!("           targets:   {}", template.muscle_groups.join(", "));
        println!("           exercises: {}", template.exercises.join(", "));
    }
}

/// An `--exercise` argument: `NAME:SETSxREPS[@WEIGHT]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSpec {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    pub weight: Option<f64>,
}

impl std::str::FromStr for ExerciseSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("invalid exercise '{s}' (expected NAME:SETSxREPS[@WEIGHT])");

        let (name, volume) = s.rsplit_once(':').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }

        let (scheme, weight) = match volume.split_once('@') {
            Some((scheme, weight)) => {
                let weight: f64 = weight.trim().parse().map_err(|_| invalid())?;
                (scheme, Some(weight))
            }
            None => (volume, None),
        };
        let (sets, reps) = scheme
            .to_ascii_lowercase()
            .split_once('x')
            .map(|(s, r)| (s.trim().parse::<u32>(), r.trim().parse::<u32>()))
            .ok_or_else(invalid)?;

        Ok(Self {
            name: name.to_string(),
            sets: sets.map_err(|_| invalid())?,
            reps: reps.map_err(|_| invalid())?,
            weight,
        })
    }
}

/// Template exercises get this scheme when no `--exercise` is given.
const DEFAULT_SETS: u32 = 3;
const DEFAULT_REPS: u32 = 10;

pub struct LogArgs {
    pub name: Option<String>,
    pub template: Option<String>,
    pub exercises: Vec<ExerciseSpec>,
    pub duration: Option<u32>,
    pub notes: Option<String>,
}

/// Builds a workout the way the creation wizard does and submits it.
pub async fn log(app: &App, args: LogArgs) -> Result<()> {
    let mut draft = WorkoutDraft::new();
    draft.name = args.name.unwrap_or_default();
    draft.duration = args.duration;
    draft.notes = args.notes;

    let mut specs = args.exercises;
    if let Some(id) = &args.template {
        let template = draft.choose_template(id)?;
        if specs.is_empty() {
            specs = template
                .exercises
                .iter()
                .map(|name| ExerciseSpec {
                    name: name.to_string(),
                    sets: DEFAULT_SETS,
                    reps: DEFAULT_REPS,
                    weight: None,
                })
                .collect();
        }
    }

    let catalogue = app.protected(app.client.exercises(None, None)).await?;
    for spec in specs {
        let exercise = resolve_exercise(&catalogue, &spec.name)?;
        draft.add_exercise(DraftExercise {
            exercise_id: exercise.exercise_id,
            name: exercise.name.clone(),
            sets: spec.sets,
            reps: spec.reps,
            weight: spec.weight,
        });
    }

    tracing::debug!("[Workouts] Draft progress {:.2}", draft.progress());
    let body = draft.to_new_workout(Local::now().naive_local())?;
    let created = app.protected(app.client.create_workout(&body)).await?;

    println!(
        "✅ Logged \"{}\" with {} exercise(s) (#{})",
        body.workout_name,
        body.exercises.len(),
        created.workout_id
    );
    Ok(())
}

fn resolve_exercise<'a>(catalogue: &'a [Exercise], name: &str) -> Result<&'a Exercise> {
    catalogue
        .iter()
        .find(|e| e.name.eq_ignore_ascii_case(name.trim()))
        .with_context(|| format!("Unknown exercise '{name}'. See `evolvx exercises`."))
}

pub struct EditArgs {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    /// Replaces every exercise of the workout when non-empty.
    pub exercises: Vec<ExerciseSpec>,
    pub duration: Option<u32>,
    pub notes: Option<String>,
}

pub async fn edit(app: &App, workout_id: i64, args: EditArgs) -> Result<()> {
    let current = app.protected(app.client.workout(workout_id)).await?;
    let catalogue = if args.exercises.is_empty() {
        Vec::new()
    } else {
        app.protected(app.client.exercises(None, None)).await?
    };

    let update = build_update(&current, args, &catalogue)?;
    if update.is_empty() {
        bail!("Nothing to change. Pass --name, --date, --duration, --notes or --exercise.");
    }

    let ack = app
        .protected(app.client.update_workout(workout_id, &update))
        .await?;
    println!(
        "✅ {} (#{})",
        ack.message.unwrap_or_else(|| "Workout updated".to_string()),
        ack.workout_id
    );
    Ok(())
}

/// Partial update for `current`. A new date keeps the workout's time of day.
fn build_update(
    current: &WorkoutSummary,
    args: EditArgs,
    catalogue: &[Exercise],
) -> Result<WorkoutUpdate> {
    let workout_name = match args.name {
        Some(name) if name.trim().is_empty() => bail!("Workout name cannot be empty"),
        other => other.map(|name| name.trim().to_string()),
    };

    let exercises = if args.exercises.is_empty() {
        None
    } else {
        let resolved = args
            .exercises
            .iter()
            .map(|spec| -> Result<NewWorkoutExercise> {
                let exercise = resolve_exercise(catalogue, &spec.name)?;
                Ok(NewWorkoutExercise {
                    exercise_id: exercise.exercise_id,
                    sets: spec.sets,
                    reps: spec.reps,
                    weight: spec.weight,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Some(resolved)
    };

    Ok(WorkoutUpdate {
        workout_name,
        workout_date: args
            .date
            .map(|day| day.and_time(current.workout_date.time())),
        duration: args.duration,
        notes: args.notes,
        exercises,
    })
}

pub async fn delete(app: &App, workout_id: i64) -> Result<()> {
    let workout = app.protected(app.client.workout(workout_id)).await?;
    let response = app.protected(app.client.delete_workout(workout_id)).await?;
    println!(
        "{} (\"{}\", {})",
        response.message.unwrap_or_else(|| "Workout deleted".to_string()),
        workout.workout_name,
        workout.display_date()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_spec_with_weight() {
        let spec: ExerciseSpec = "Bench Press:3x8@70.5".parse().unwrap();
        assert_eq!(
            spec,
            ExerciseSpec {
                name: "Bench Press".into(),
                sets: 3,
                reps: 8,
                weight: Some(70.5),
            }
        );
    }

    #[test]
    fn test_exercise_spec_bodyweight() {
        let spec: ExerciseSpec = "Pull Up:4X6".parse().unwrap();
        assert_eq!(spec.sets, 4);
        assert_eq!(spec.reps, 6);
        assert_eq!(spec.weight, None);
    }

    #[test]
    fn test_exercise_spec_rejects_garbage() {
        assert!("Squat".parse::<ExerciseSpec>().is_err());
        assert!(":3x5".parse::<ExerciseSpec>().is_err());
        assert!("Squat:3by5".parse::<ExerciseSpec>().is_err());
        assert!("Squat:3x5@heavy".parse::<ExerciseSpec>().is_err());
    }

    fn catalogue() -> Vec<Exercise> {
        vec![Exercise {
            exercise_id: 7,
            name: "Deadlift".into(),
            muscle_group: "back".into(),
            description: None,
            is_compound: true,
        }]
    }

    fn logged_workout() -> WorkoutSummary {
        WorkoutSummary {
            workout_id: 3,
            workout_name: "Pull Day".into(),
            workout_date: NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(6, 45, 0)
                .unwrap(),
            duration: Some(50),
            notes: None,
            created_at: None,
            exercises: Vec::new(),
        }
    }

    fn no_changes() -> EditArgs {
        EditArgs {
            name: None,
            date: None,
            exercises: Vec::new(),
            duration: None,
            notes: None,
        }
    }

    #[test]
    fn test_edit_moves_date_and_replaces_exercises() {
        let args = EditArgs {
            date: NaiveDate::from_ymd_opt(2026, 10, 17),
            exercises: vec!["deadlift:5x3@140".parse().unwrap()],
            ..no_changes()
        };

        let update = build_update(&logged_workout(), args, &catalogue()).unwrap();

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({
                "workout_date": "2026-10-17T06:45:00",
                "exercises": [{"exercise_id": 7, "sets": 5, "reps": 3, "weight": 140.0}]
            })
        );
    }

    #[test]
    fn test_edit_without_flags_is_empty() {
        let update = build_update(&logged_workout(), no_changes(), &[]).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn test_edit_rejects_blank_name_and_unknown_exercise() {
        let blank = EditArgs {
            name: Some("  ".into()),
            ..no_changes()
        };
        assert!(build_update(&logged_workout(), blank, &catalogue()).is_err());

        let unknown = EditArgs {
            exercises: vec!["Snatch:3x2".parse().unwrap()],
            ..no_changes()
        };
        assert!(build_update(&logged_workout(), unknown, &catalogue()).is_err());
    }
}

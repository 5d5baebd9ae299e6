use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use evolvx_core::api::{AvatarUpdate, FriendStatusFilter, OVERALL, ProgressPeriod};
use evolvx_infrastructure::{ConfigService, EvolvxPaths};

mod app;
mod commands;
mod logging;

use app::App;
use commands::auth::ProfileArgs;
use commands::workouts::{EditArgs, ExerciseSpec, LogArgs};

#[derive(Parser)]
#[command(name = "evolvx")]
#[command(about = "Evolvx - track workouts, streaks and rankings from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Keep the session in memory only; nothing is read from or written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Print results as JSON where supported
    #[arg(long, global = true)]
    json: bool,

    /// Show info-level logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and log in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date_of_birth: NaiveDate,
        #[arg(long)]
        gender: Option<String>,
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user and profile
    Whoami,
    /// Show the profile, changing any given fields first
    Profile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// Height in cm
        #[arg(long)]
        height: Option<f64>,
        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        password: Option<String>,
    },
    /// List workout history
    Workouts {
        /// Filter by name, date or exercise
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
    /// Log a new workout
    Log {
        #[arg(long)]
        name: Option<String>,
        /// Template id (see `evolvx templates`)
        #[arg(long)]
        template: Option<String>,
        /// NAME:SETSxREPS[@WEIGHT], repeatable
        #[arg(long = "exercise")]
        exercises: Vec<ExerciseSpec>,
        /// Minutes
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Edit a logged workout
    Edit {
        workout_id: i64,
        #[arg(long)]
        name: Option<String>,
        /// YYYY-MM-DD; the time of day is kept
        #[arg(long)]
        date: Option<NaiveDate>,
        /// NAME:SETSxREPS[@WEIGHT], repeatable; replaces all exercises
        #[arg(long = "exercise")]
        exercises: Vec<ExerciseSpec>,
        /// Minutes
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a workout
    Delete { workout_id: i64 },
    /// List built-in workout templates
    Templates,
    /// Show the current workout streak
    Streak,
    /// Browse the exercise catalogue
    Exercises {
        #[arg(long)]
        muscle_group: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show a leaderboard
    Leaderboard {
        #[arg(long, default_value = OVERALL)]
        muscle_group: String,
        /// Only you and your friends
        #[arg(long)]
        friends: bool,
        #[arg(long)]
        min_age: Option<u32>,
        #[arg(long)]
        max_age: Option<u32>,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show per-muscle-group rankings
    Rankings {
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Manage friends
    Friends {
        #[command(subcommand)]
        action: Option<FriendsAction>,
        /// accepted, pending or all
        #[arg(long)]
        status: Option<FriendStatusFilter>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Manage shared workouts
    Shared {
        #[command(subcommand)]
        action: Option<SharedAction>,
    },
    /// Show training progress
    Progress {
        /// week, month or year
        #[arg(long, default_value = "month")]
        period: ProgressPeriod,
    },
    /// Show coaching recommendations
    Recommend,
    /// Show or change an avatar
    Avatar {
        #[arg(long)]
        user_id: Option<i64>,
        #[arg(long)]
        body_type: Option<String>,
        #[arg(long)]
        hair_style: Option<String>,
        #[arg(long)]
        hair_color: Option<String>,
        #[arg(long)]
        skin_tone: Option<String>,
        #[arg(long)]
        outfit: Option<String>,
        /// Replaces the accessory list, repeatable
        #[arg(long = "accessory")]
        accessories: Vec<String>,
    },
}

#[derive(Subcommand)]
enum FriendsAction {
    /// Send a friend request
    Add { user_id: i64 },
    /// Accept a pending request
    Accept { friendship_id: i64 },
    /// Reject a pending request
    Reject { friendship_id: i64 },
}

#[derive(Subcommand)]
enum SharedAction {
    /// Host a new shared workout
    Host { workout_name: String },
    /// Join a shared workout
    Join { shared_workout_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = EvolvxPaths::resolve()?;
    let config = ConfigService::with_path(paths.config_file()).get_config()?;

    let logs_dir = paths.logs_dir();
    let _log_guard = logging::init_tracing(
        &config.logging,
        (!cli.ephemeral).then_some(logs_dir.as_path()),
        cli.verbose,
    );
    tracing::info!("[Bootstrap] Home: {}", paths.home().display());

    let app = App::start(&paths, config, cli.ephemeral).await?;
    let json = cli.json;

    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&app, &email, &password).await?
        }
        Commands::Register {
            username,
            email,
            password,
            date_of_birth,
            gender,
            height,
            weight,
        } => {
            commands::auth::register(
                &app,
                username,
                email,
                password,
                date_of_birth,
                gender,
                height,
                weight,
            )
            .await?
        }
        Commands::Logout => commands::auth::logout(&app).await?,
        Commands::Whoami => commands::auth::whoami(&app).await?,
        Commands::Profile {
            username,
            gender,
            height,
            weight,
            password,
        } => {
            let args = ProfileArgs {
                username,
                gender,
                height,
                weight,
                password,
            };
            commands::auth::profile(&app, args).await?
        }
        Commands::Workouts { search, page } => {
            commands::workouts::history(&app, page, search.as_deref(), json).await?
        }
        Commands::Log {
            name,
            template,
            exercises,
            duration,
            notes,
        } => {
            let args = LogArgs {
                name,
                template,
                exercises,
                duration,
                notes,
            };
            commands::workouts::log(&app, args).await?
        }
        Commands::Edit {
            workout_id,
            name,
            date,
            exercises,
            duration,
            notes,
        } => {
            let args = EditArgs {
                name,
                date,
                exercises,
                duration,
                notes,
            };
            commands::workouts::edit(&app, workout_id, args).await?
        }
        Commands::Delete { workout_id } => commands::workouts::delete(&app, workout_id).await?,
        Commands::Templates => commands::workouts::templates(),
        Commands::Streak => commands::workouts::streak(&app).await?,
        Commands::Exercises {
            muscle_group,
            search,
        } => {
            commands::workouts::exercises(&app, muscle_group.as_deref(), search.as_deref(), json)
                .await?
        }
        Commands::Leaderboard {
            muscle_group,
            friends,
            min_age,
            max_age,
            page,
            search,
        } => {
            let args = commands::community::LeaderboardArgs {
                muscle_group,
                friends,
                min_age,
                max_age,
                page,
                search,
            };
            commands::community::leaderboard(&app, args, json).await?
        }
        Commands::Rankings { user_id } => commands::coaching::rankings(&app, user_id, json).await?,
        Commands::Friends {
            action,
            status,
            search,
        } => match action {
            None => commands::community::friends(&app, status, search.as_deref(), json).await?,
            Some(FriendsAction::Add { user_id }) => {
                commands::community::add_friend(&app, user_id).await?
            }
            Some(FriendsAction::Accept { friendship_id }) => {
                commands::community::answer_friend(&app, friendship_id, true).await?
            }
            Some(FriendsAction::Reject { friendship_id }) => {
                commands::community::answer_friend(&app, friendship_id, false).await?
            }
        },
        Commands::Shared { action } => match action {
            None => commands::community::shared(&app, json).await?,
            Some(SharedAction::Host { workout_name }) => {
                commands::community::host_shared(&app, workout_name).await?
            }
            Some(SharedAction::Join { shared_workout_id }) => {
                commands::community::join_shared(&app, shared_workout_id).await?
            }
        },
        Commands::Progress { period } => commands::coaching::progress(&app, period, json).await?,
        Commands::Recommend => commands::coaching::recommend(&app, json).await?,
        Commands::Avatar {
            user_id,
            body_type,
            hair_style,
            hair_color,
            skin_tone,
            outfit,
            accessories,
        } => {
            let update = AvatarUpdate {
                body_type,
                hair_style,
                hair_color,
                skin_tone,
                outfit,
                accessories: (!accessories.is_empty()).then_some(accessories),
            };
            commands::coaching::avatar(&app, user_id, update, json).await?
        }
    }

    Ok(())
}

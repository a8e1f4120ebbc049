//! Command definitions and handlers.
//!
//! Argument structs carry the clap-specific surface (flags, help
//! text, value parsing) and convert to plain engine calls, keeping
//! the core crate free of CLI framework concerns.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use ironlog_core::{
    ActiveWorkout, QueueEntries, SessionStatus, Sessions, SetStatus, SetUpdate, WorkoutEngine,
};
use jiff::civil::Date;

use crate::renderer::TerminalRenderer;

/// Create a new workout plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Name of the plan
    pub name: String,
}

/// Add an exercise entry to a plan
#[derive(Args)]
pub struct AddExerciseArgs {
    /// ID of the plan to add the exercise to
    pub plan_id: i64,
    /// Name of the exercise (created on first use)
    pub name: String,
    /// Number of sets to perform
    #[arg(short, long, default_value_t = 3)]
    pub sets: i64,
    /// Target repetitions per set
    #[arg(short, long, default_value_t = 8)]
    pub reps: i64,
    /// Rest period after each set, in seconds
    #[arg(long, default_value_t = 90)]
    pub rest: i64,
}

/// Show the exercise entries of a plan
#[derive(Args)]
pub struct ShowPlanArgs {
    /// ID of the plan to display
    pub id: i64,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new workout plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// Add an exercise entry to a plan
    #[command(alias = "a")]
    AddExercise(AddExerciseArgs),
    /// Show the exercise entries of a plan
    #[command(alias = "s")]
    Show(ShowPlanArgs),
}

/// Schedule a session from a plan
#[derive(Args)]
pub struct ScheduleArgs {
    /// ID of the plan to schedule from
    pub plan_id: i64,
    /// Date to schedule the session for (YYYY-MM-DD)
    pub date: Date,
    /// Optional notes for the session
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// List sessions
#[derive(Args)]
pub struct ListSessionsArgs {
    /// Only show sessions with this status
    #[arg(long, value_enum)]
    pub status: Option<SessionStatusArg>,
}

/// A command that addresses one session by id
#[derive(Args)]
pub struct SessionIdArgs {
    /// Unique identifier of the session
    pub id: i64,
}

#[derive(Subcommand)]
pub enum SessionCommands {
    /// Schedule a session from a plan
    #[command(alias = "sch")]
    Schedule(ScheduleArgs),
    /// List sessions
    #[command(aliases = ["l", "ls"])]
    List(ListSessionsArgs),
    /// Show a session with its sets
    #[command(alias = "s")]
    Show(SessionIdArgs),
    /// Start a scheduled session
    Start(SessionIdArgs),
    /// Complete the active session (all sets must be resolved)
    Complete(SessionIdArgs),
    /// Abandon the active session
    Abandon(SessionIdArgs),
    /// Delete a session that has not been started
    #[command(aliases = ["d", "rm"])]
    Delete(SessionIdArgs),
    /// Show set updates queued offline for a session
    #[command(alias = "q")]
    Queue(SessionIdArgs),
}

/// Update a set in the active session
#[derive(Args)]
pub struct SetArgs {
    /// Unique identifier of the set to update
    pub id: i64,
    /// Repetitions actually performed
    #[arg(short, long)]
    pub reps: Option<i64>,
    /// Weight used, in kilograms
    #[arg(short, long)]
    pub weight: Option<f64>,
    /// New status for the set
    #[arg(short, long, value_enum)]
    pub status: Option<SetStatusArg>,
    /// Notes for the set
    #[arg(short, long)]
    pub notes: Option<String>,
}

impl From<SetArgs> for SetUpdate {
    fn from(val: SetArgs) -> Self {
        SetUpdate {
            actual_reps: val.reps,
            weight_kg: val.weight,
            status: val.status.map(SetStatus::from),
            notes: val.notes,
        }
    }
}

/// Command-line argument representation of session status values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SessionStatusArg {
    Scheduled,
    InProgress,
    Completed,
    Abandoned,
}

impl From<SessionStatusArg> for SessionStatus {
    fn from(val: SessionStatusArg) -> Self {
        match val {
            SessionStatusArg::Scheduled => SessionStatus::Scheduled,
            SessionStatusArg::InProgress => SessionStatus::InProgress,
            SessionStatusArg::Completed => SessionStatus::Completed,
            SessionStatusArg::Abandoned => SessionStatus::Abandoned,
        }
    }
}

/// Command-line argument representation of set status values
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SetStatusArg {
    Pending,
    Completed,
    Skipped,
}

impl From<SetStatusArg> for SetStatus {
    fn from(val: SetStatusArg) -> Self {
        match val {
            SetStatusArg::Pending => SetStatus::Pending,
            SetStatusArg::Completed => SetStatus::Completed,
            SetStatusArg::Skipped => SetStatus::Skipped,
        }
    }
}

/// Command handlers binding the engine to terminal output.
pub struct Cli {
    engine: WorkoutEngine,
    renderer: TerminalRenderer,
    user_id: i64,
}

impl Cli {
    pub fn new(engine: WorkoutEngine, renderer: TerminalRenderer, user_id: i64) -> Self {
        Self {
            engine,
            renderer,
            user_id,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => {
                let plan = self.engine.create_plan(self.user_id, args.name).await?;
                self.renderer
                    .render(&format!("Created plan '{}' with ID: {}\n", plan.name, plan.id))
            }
            PlanCommands::AddExercise(args) => {
                let entry = self
                    .engine
                    .add_plan_exercise(
                        self.user_id,
                        args.plan_id,
                        args.name,
                        args.sets,
                        args.reps,
                        args.rest,
                    )
                    .await?;
                self.renderer.render(&format!(
                    "Added '{}' to plan {}: {}x{}, {}s rest\n",
                    entry.exercise_name,
                    entry.workout_plan_id,
                    entry.target_sets,
                    entry.target_reps,
                    entry.rest_seconds
                ))
            }
            PlanCommands::Show(args) => {
                let entries = self
                    .engine
                    .list_plan_exercises(self.user_id, args.id)
                    .await?;
                let mut output = format!("# Plan {}\n\n", args.id);
                if entries.is_empty() {
                    output.push_str("No exercises in this plan.\n");
                } else {
                    for entry in &entries {
                        output.push_str(&format!(
                            "- {}. {}: {}x{}, {}s rest\n",
                            entry.order_index + 1,
                            entry.exercise_name,
                            entry.target_sets,
                            entry.target_reps,
                            entry.rest_seconds
                        ));
                    }
                }
                self.renderer.render(&output)
            }
        }
    }

    pub async fn handle_session_command(&self, command: SessionCommands) -> Result<()> {
        match command {
            SessionCommands::Schedule(args) => {
                let session = self
                    .engine
                    .schedule_session(self.user_id, args.plan_id, args.date, args.notes)
                    .await?;
                self.renderer.render(&format!(
                    "Scheduled session {} for {}\n",
                    session.id, session.scheduled_for
                ))
            }
            SessionCommands::List(args) => {
                self.list_sessions(args.status.map(SessionStatus::from))
                    .await
            }
            SessionCommands::Show(args) => {
                let detail = self.engine.get_session(self.user_id, args.id).await?;
                self.renderer.render(&detail.to_string())
            }
            SessionCommands::Start(args) => {
                let detail = self.engine.start_session(self.user_id, args.id).await?;
                self.renderer.render(&detail.to_string())
            }
            SessionCommands::Complete(args) => {
                let session = self.engine.complete_session(self.user_id, args.id).await?;
                self.renderer.render(&session.to_string())
            }
            SessionCommands::Abandon(args) => {
                let session = self.engine.abandon_session(self.user_id, args.id).await?;
                self.renderer.render(&session.to_string())
            }
            SessionCommands::Delete(args) => {
                self.engine.delete_session(self.user_id, args.id).await?;
                self.renderer
                    .render(&format!("Deleted session with ID: {}\n", args.id))
            }
            SessionCommands::Queue(args) => {
                // Read-only view over the persisted client state; no
                // engine call involved.
                let entries = ActiveWorkout::load(args.id)?
                    .map(|state| state.offline_queue().entries().to_vec())
                    .unwrap_or_default();
                self.renderer.render(&QueueEntries(entries).to_string())
            }
        }
    }

    pub async fn handle_set_command(&self, args: SetArgs) -> Result<()> {
        let set_id = args.id;
        let set = self
            .engine
            .patch_set(self.user_id, set_id, args.into())
            .await?;
        self.renderer.render(&set.to_string())
    }

    pub async fn list_sessions(&self, status: Option<SessionStatus>) -> Result<()> {
        let sessions = self.engine.list_sessions(self.user_id, status).await?;
        self.renderer.render(&Sessions(sessions).to_string())
    }
}

//! Core library for the Ironlog workout execution engine.
//!
//! This crate provides the business logic for running workout
//! sessions: the session and set lifecycle state machines, the
//! SQLite-backed store, the client-side active-workout state (current
//! set, rest timer, offline queue), and the sync coordinator that
//! settles optimistic updates against the engine.
//!
//! # Quick Start
//!
//! ```rust
//! use ironlog_core::{SetUpdate, WorkoutEngineBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = WorkoutEngineBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! // Seed a plan and schedule a session from it.
//! let plan = engine.create_plan(1, "Leg Day".to_string()).await?;
//! engine
//!     .add_plan_exercise(1, plan.id, "Squat".to_string(), 3, 5, 120)
//!     .await?;
//! let session = engine
//!     .schedule_session(1, plan.id, jiff::civil::date(2025, 6, 1), None)
//!     .await?;
//!
//! // Execute it.
//! let detail = engine.start_session(1, session.id).await?;
//! for set in &detail.sets {
//!     engine.patch_set(1, set.id, SetUpdate::completed(5, Some(100.0))).await?;
//! }
//! let finished = engine.complete_session(1, session.id).await?;
//! println!("{finished}");
//! # Ok(())
//! # }
//! ```

pub mod active;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod sync;

// Re-export commonly used types
pub use active::{
    ActiveWorkout, ActiveWorkoutSnapshot, OfflineQueue, PatchSnapshot, QueuedUpdate, RestTimer,
    DEFAULT_REST_SECONDS,
};
pub use db::Database;
pub use display::{LocalDateTime, QueueEntries, Sessions};
pub use engine::{WorkoutEngine, WorkoutEngineBuilder};
pub use error::{EngineError, Result};
pub use models::{
    PlanExercise, SessionDetail, SessionSet, SessionStatus, SetStatus, SetUpdate, WorkoutPlan,
    WorkoutSession,
};
pub use sync::{AlwaysOnline, Connectivity, PatchOutcome, SyncCoordinator, SyncReport};

//! Data models for workout sessions and their sets.
//!
//! This module contains the core domain types of the execution engine:
//! the session and set records, their status state machines, the plan
//! collaborator types that set instantiation reads from, and the
//! partial-update request type. Display implementations live in
//! [`crate::display`] to keep data structures separate from
//! presentation.

pub mod plan;
pub mod requests;
pub mod session;
pub mod set;
pub mod status;


pub use plan::{PlanExercise, WorkoutPlan};
pub use requests::{SetUpdate, MAX_WEIGHT_KG};
pub use session::{SessionDetail, WorkoutSession};
pub use set::SessionSet;
pub use status::{SessionStatus, SetStatus};

//! Plan-side models the engine reads when instantiating sets.
//!
//! Plan authoring itself lives outside the engine; these types are the
//! collaborator surface `start_session` consumes.

use serde::{Deserialize, Serialize};

/// A workout plan header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
}

/// One exercise entry within a plan: how many sets to perform, the
/// rep target copied into each instantiated set, and the rest period
/// the client timer uses between sets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanExercise {
    pub id: i64,
    pub workout_plan_id: i64,
    pub exercise_id: i64,
    /// Display name of the exercise, joined in on read
    pub exercise_name: String,
    /// Position within the plan (0-indexed)
    pub order_index: i64,
    pub target_sets: i64,
    pub target_reps: i64,
    pub rest_seconds: i64,
}

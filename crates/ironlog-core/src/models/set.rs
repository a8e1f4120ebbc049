//! Session set model definition.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::SetStatus;

/// One planned repetition-block of an exercise within a session.
///
/// All sets for a session are created atomically when the session
/// starts and are never created or destroyed afterward; only
/// `status`, `actual_reps`, `weight_kg`, `completed_at` and `notes`
/// mutate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSet {
    /// Unique identifier for the set
    pub id: i64,

    /// Parent workout session
    pub workout_session_id: i64,

    /// Plan exercise this set was instantiated from
    pub plan_exercise_id: i64,

    /// 1-indexed position within its exercise
    pub set_number: i64,

    /// Current execution status
    pub status: SetStatus,

    /// Planned repetitions, copied from the plan at session start
    pub target_reps: i64,

    /// Repetitions actually performed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_reps: Option<i64>,

    /// Weight used in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,

    /// Set if and only if status is `completed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Exercise display name, joined in on read
    pub exercise_name: String,

    /// Rest period after this set, joined in from the plan exercise;
    /// feeds the client rest timer
    pub rest_seconds: i64,

    /// Timestamp when the set row was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the set row was last updated (UTC)
    pub updated_at: Timestamp,
}

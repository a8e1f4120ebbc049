//! Workout session model definitions.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{SessionSet, SessionStatus};

/// Represents one scheduled or executed instance of following a
/// workout plan on a specific date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSession {
    /// Unique identifier for the session
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Plan this session was scheduled from
    pub workout_plan_id: i64,

    /// Current lifecycle status
    pub status: SessionStatus,

    /// Date the session is scheduled for
    pub scheduled_for: Date,

    /// Set exactly when the session enters `in_progress`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<Timestamp>,

    /// Set exactly when the session reaches a terminal status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Timestamp when the session row was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the session row was last updated (UTC)
    pub updated_at: Timestamp,
}

/// A session together with its ordered sets, each decorated with its
/// exercise name. This is what the execution screen consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionDetail {
    /// The session record itself
    #[serde(flatten)]
    pub session: WorkoutSession,

    /// Name of the plan the session belongs to
    pub plan_name: String,

    /// All sets, ordered by plan exercise order then set number
    pub sets: Vec<SessionSet>,
}

impl SessionDetail {
    /// First pending set in display order, if any. This is the set the
    /// user should be filling in next.
    pub fn first_pending_set(&self) -> Option<&SessionSet> {
        self.sets
            .iter()
            .find(|s| s.status == super::SetStatus::Pending)
    }

    /// Number of sets still pending.
    pub fn pending_count(&self) -> usize {
        self.sets
            .iter()
            .filter(|s| s.status == super::SetStatus::Pending)
            .count()
    }
}

//! Status enumerations for sessions and sets.
//!
//! Both lifecycles are closed enums so that transition legality is an
//! exhaustive match rather than a runtime string comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of workout session statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session has been scheduled but not started
    #[default]
    Scheduled,

    /// Session is currently being executed
    InProgress,

    /// Session finished with every set resolved
    Completed,

    /// Session was given up mid-workout
    Abandoned,
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(SessionStatus::Scheduled),
            "in_progress" | "inprogress" => Ok(SessionStatus::InProgress),
            "completed" => Ok(SessionStatus::Completed),
            "abandoned" => Ok(SessionStatus::Abandoned),
            _ => Err(format!("Invalid session status: {s}")),
        }
    }
}

impl SessionStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Abandoned => "abandoned",
        }
    }

    /// Whether no further lifecycle transition is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Abandoned)
    }

    /// Whether the session lifecycle permits the given transition.
    ///
    /// Edges: scheduled -> in_progress, in_progress -> completed,
    /// in_progress -> abandoned. No edge returns to a prior state and
    /// no edge connects the two terminal states.
    pub fn can_transition_to(&self, next: SessionStatus) -> bool {
        matches!(
            (self, next),
            (SessionStatus::Scheduled, SessionStatus::InProgress)
                | (SessionStatus::InProgress, SessionStatus::Completed)
                | (SessionStatus::InProgress, SessionStatus::Abandoned)
        )
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "○ Scheduled",
            SessionStatus::InProgress => "➤ In Progress",
            SessionStatus::Completed => "✓ Completed",
            SessionStatus::Abandoned => "✗ Abandoned",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-safe enumeration of session set statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SetStatus {
    /// Set has not been performed yet
    #[default]
    Pending,

    /// Set was performed and recorded
    Completed,

    /// Set was deliberately skipped
    Skipped,
}

impl FromStr for SetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SetStatus::Pending),
            "completed" => Ok(SetStatus::Completed),
            "skipped" => Ok(SetStatus::Skipped),
            _ => Err(format!("Invalid set status: {s}")),
        }
    }
}

impl SetStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SetStatus::Pending => "pending",
            SetStatus::Completed => "completed",
            SetStatus::Skipped => "skipped",
        }
    }

    /// Whether the set state machine permits the given transition.
    ///
    /// Legal: pending -> completed, pending -> skipped, and self
    /// transitions (the latter allow updating other fields on a
    /// resolved set, and make replayed updates idempotent).
    pub fn can_transition_to(&self, next: SetStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (SetStatus::Pending, SetStatus::Completed) | (SetStatus::Pending, SetStatus::Skipped)
        )
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            SetStatus::Pending => "○ Pending",
            SetStatus::Completed => "✓ Completed",
            SetStatus::Skipped => "⊘ Skipped",
        }
    }
}

impl fmt::Display for SetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

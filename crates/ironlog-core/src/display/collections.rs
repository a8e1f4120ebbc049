//! Collection wrapper types for displaying groups of domain objects.
//!
//! Newtype wrappers give collections Display implementations with
//! consistent empty-collection handling.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::active::QueuedUpdate;
use crate::models::WorkoutSession;

/// Newtype wrapper for displaying a list of sessions.
pub struct Sessions(pub Vec<WorkoutSession>);

impl Sessions {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkoutSession> {
        self.0.iter()
    }
}

impl IntoIterator for Sessions {
    type Item = WorkoutSession;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Sessions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No sessions found.")
        } else {
            for session in &self.0 {
                write!(f, "{session}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the offline queue contents.
pub struct QueueEntries(pub Vec<QueuedUpdate>);

impl QueueEntries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for QueueEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "Offline queue is empty.")
        } else {
            writeln!(f, "{} queued update(s):", self.0.len())?;
            writeln!(f)?;
            for entry in &self.0 {
                write!(f, "- Set {}", entry.set_id)?;
                if let Some(status) = entry.update.status {
                    write!(f, ": {status}")?;
                }
                writeln!(f, " (queued {})", LocalDateTime(&entry.queued_at))?;
            }
            Ok(())
        }
    }
}

//! Persistence for active-workout state across process restarts.
//!
//! Only the parts the server cannot reconstruct are written to disk:
//! the timer and the offline queue. The session body is deliberately
//! excluded; it is re-fetched on resume so a stale local copy never
//! shadows server state.

use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use super::{ActiveWorkout, OfflineQueue, RestTimer};
use crate::error::{EngineError, Result};

/// On-disk form of [`ActiveWorkout`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveWorkoutSnapshot {
    pub session_id: i64,
    pub current_set_id: Option<i64>,
    pub timer: Option<RestTimer>,
    pub offline_queue: OfflineQueue,
}

impl ActiveWorkout {
    /// Captures the restorable parts of this state.
    pub fn snapshot(&self) -> ActiveWorkoutSnapshot {
        ActiveWorkoutSnapshot {
            session_id: self.session_id(),
            current_set_id: self.current_set_id(),
            timer: self.timer().cloned(),
            offline_queue: self.offline_queue().clone(),
        }
    }

    /// Rebuilds state from a snapshot. The session body starts empty;
    /// callers fetch it and install it with [`ActiveWorkout::set_session`],
    /// which also recomputes the current-set pointer from live data.
    pub fn from_snapshot(snapshot: ActiveWorkoutSnapshot) -> Self {
        let mut state = Self::new(snapshot.session_id);
        state.timer = snapshot.timer;
        state.offline_queue = snapshot.offline_queue;
        state
    }

    /// Writes the snapshot to the state file for its session.
    pub fn save(&self) -> Result<()> {
        let path = state_file_path(self.session_id())?;
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        fs::write(&path, json).map_err(|e| EngineError::FileSystem { path, source: e })
    }

    /// Loads persisted state for a session, or `None` when no state
    /// file exists.
    pub fn load(session_id: i64) -> Result<Option<Self>> {
        let path = state_file_path(session_id)?;
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(EngineError::FileSystem { path, source: e }),
        };
        let snapshot: ActiveWorkoutSnapshot = serde_json::from_str(&json)?;
        Ok(Some(Self::from_snapshot(snapshot)))
    }

    /// Removes the state file for a session, if present. Called when
    /// the session leaves `in_progress`.
    pub fn discard(session_id: i64) -> Result<()> {
        let path = state_file_path(session_id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EngineError::FileSystem { path, source: e }),
        }
    }
}

/// Per-session state file under the XDG state directory.
fn state_file_path(session_id: i64) -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix("ironlog")
        .place_state_file(format!("active-workout-{session_id}.json"))
        .map_err(|e| EngineError::XdgDirectory(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SetUpdate;

    #[test]
    fn snapshot_round_trips_timer_and_queue() {
        let mut state = ActiveWorkout::new(7);
        state.start_timer(3, 60);
        state.tick_timer();
        state.enqueue_offline(3, SetUpdate::completed(8, Some(40.0)));

        let snapshot = state.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: ActiveWorkoutSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);

        let revived = ActiveWorkout::from_snapshot(restored);
        assert_eq!(revived.session_id(), 7);
        assert_eq!(revived.timer().unwrap().remaining_seconds, 59);
        assert_eq!(revived.offline_queue().len(), 1);
        // The session body is never persisted.
        assert!(revived.session().is_none());
    }
}

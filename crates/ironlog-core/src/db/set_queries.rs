//! Session set queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use super::session_queries::{parse_status, parse_timestamp};
use crate::{
    error::{DatabaseResultExt, EngineError, Result},
    models::{SessionSet, SessionStatus, SetStatus, SetUpdate},
};

const SELECT_SET_WITH_SESSION_SQL: &str = "SELECT ss.id, ss.workout_session_id, ss.plan_exercise_id, ss.set_number, ss.status, ss.target_reps, ss.actual_reps, ss.weight_kg, ss.completed_at, ss.notes, e.name, pe.rest_seconds, ss.created_at, ss.updated_at, ws.status FROM session_sets ss JOIN workout_sessions ws ON ws.id = ss.workout_session_id JOIN plan_exercises pe ON pe.id = ss.plan_exercise_id JOIN exercises e ON e.id = pe.exercise_id WHERE ss.id = ?1 AND ws.user_id = ?2";
const SELECT_SET_SQL: &str = "SELECT ss.id, ss.workout_session_id, ss.plan_exercise_id, ss.set_number, ss.status, ss.target_reps, ss.actual_reps, ss.weight_kg, ss.completed_at, ss.notes, e.name, pe.rest_seconds, ss.created_at, ss.updated_at FROM session_sets ss JOIN plan_exercises pe ON pe.id = ss.plan_exercise_id JOIN exercises e ON e.id = pe.exercise_id WHERE ss.id = ?1";
const SELECT_SETS_BY_SESSION_SQL: &str = "SELECT ss.id, ss.workout_session_id, ss.plan_exercise_id, ss.set_number, ss.status, ss.target_reps, ss.actual_reps, ss.weight_kg, ss.completed_at, ss.notes, e.name, pe.rest_seconds, ss.created_at, ss.updated_at FROM session_sets ss JOIN plan_exercises pe ON pe.id = ss.plan_exercise_id JOIN exercises e ON e.id = pe.exercise_id WHERE ss.workout_session_id = ?1 ORDER BY pe.order_index, ss.set_number";
const UPDATE_SET_SQL: &str = "UPDATE session_sets SET actual_reps = ?1, weight_kg = ?2, status = ?3, completed_at = ?4, notes = ?5, updated_at = ?6 WHERE id = ?7";

/// Constructs a SessionSet from a row in the canonical column order.
fn build_set_from_row(row: &rusqlite::Row) -> rusqlite::Result<SessionSet> {
    let status: String = row.get(4)?;

    Ok(SessionSet {
        id: row.get(0)?,
        workout_session_id: row.get(1)?,
        plan_exercise_id: row.get(2)?,
        set_number: row.get(3)?,
        status: parse_status(4, &status)?,
        target_reps: row.get(5)?,
        actual_reps: row.get(6)?,
        weight_kg: row.get(7)?,
        completed_at: row
            .get::<_, Option<String>>(8)?
            .map(|s| parse_timestamp(8, s))
            .transpose()?,
        notes: row.get(9)?,
        exercise_name: row.get(10)?,
        rest_seconds: row.get(11)?,
        created_at: parse_timestamp(12, row.get(12)?)?,
        updated_at: parse_timestamp(13, row.get(13)?)?,
    })
}

impl super::Database {
    /// Retrieves a set together with its parent session's status,
    /// scoped to the owning user. Ownership mismatch reads as absent.
    pub fn get_set_with_session(
        &self,
        user_id: i64,
        set_id: i64,
    ) -> Result<(SessionSet, SessionStatus)> {
        self.connection
            .query_row(SELECT_SET_WITH_SESSION_SQL, params![set_id, user_id], |row| {
                let set = build_set_from_row(row)?;
                let session_status: String = row.get(14)?;
                let session_status = parse_status::<SessionStatus>(14, &session_status)?;
                Ok((set, session_status))
            })
            .optional()
            .db_context("Failed to query session set")?
            .ok_or(EngineError::SetNotFound { id: set_id })
    }

    /// Retrieves all sets for a session in display order.
    pub fn get_session_sets(&self, session_id: i64) -> Result<Vec<SessionSet>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_SETS_BY_SESSION_SQL)
            .db_context("Failed to prepare query")?;

        let sets = stmt
            .query_map(params![session_id], build_set_from_row)
            .db_context("Failed to query session sets")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch session sets")?;

        Ok(sets)
    }

    /// Merges an update into a set and returns the stored result.
    ///
    /// Transition legality and the completed-requires-reps rule are
    /// the engine's responsibility; this write only maintains the
    /// `completed_at` iff completed invariant, stamping the timestamp
    /// in the same statement as the status it belongs to.
    pub fn update_set(&mut self, set_id: i64, update: &SetUpdate) -> Result<SessionSet> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(SELECT_SET_SQL, params![set_id], build_set_from_row)
            .optional()
            .db_context("Failed to query current set")?
            .ok_or(EngineError::SetNotFound { id: set_id })?;

        let now = Timestamp::now();
        let new_status = update.status.unwrap_or(current.status);
        let new_reps = update.actual_reps.or(current.actual_reps);
        let new_weight = update.weight_kg.or(current.weight_kg);
        let new_notes = update.notes.clone().or(current.notes);
        let new_completed_at = match new_status {
            // Keep the original stamp on a completed -> completed no-op.
            SetStatus::Completed => Some(current.completed_at.unwrap_or(now)),
            SetStatus::Pending | SetStatus::Skipped => None,
        };

        tx.execute(
            UPDATE_SET_SQL,
            params![
                new_reps,
                new_weight,
                new_status.as_str(),
                new_completed_at.map(|t| t.to_string()),
                new_notes,
                now.to_string(),
                set_id
            ],
        )
        .db_context("Failed to update session set")?;

        let updated = tx
            .query_row(SELECT_SET_SQL, params![set_id], build_set_from_row)
            .db_context("Failed to query updated set")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }
}

//! Workout session lifecycle queries.
//!
//! Status transitions are guarded twice: the application check inside
//! the transaction produces the typed error, and the UPDATE statements
//! carry the expected current status in their WHERE clause so a racing
//! writer cannot slip a second transition through. The one-in-progress
//! invariant additionally rests on the partial unique index, which
//! turns a lost race on `start` into a constraint violation mapped to
//! the conflict error.

use jiff::civil::Date;
use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, EngineError, Result},
    models::{SessionDetail, SessionStatus, WorkoutSession},
};

const SELECT_SESSION_STATUS_SQL: &str =
    "SELECT status, workout_plan_id FROM workout_sessions WHERE id = ?1 AND user_id = ?2";
const CHECK_IN_PROGRESS_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM workout_sessions WHERE user_id = ?1 AND status = 'in_progress')";
const START_SESSION_SQL: &str = "UPDATE workout_sessions SET status = 'in_progress', started_at = ?2, updated_at = ?2 WHERE id = ?1 AND status = 'scheduled'";
const FINISH_SESSION_SQL: &str = "UPDATE workout_sessions SET status = ?3, completed_at = ?2, updated_at = ?2 WHERE id = ?1 AND status = 'in_progress'";
const INSERT_SESSION_SQL: &str = "INSERT INTO workout_sessions (user_id, workout_plan_id, status, scheduled_for, notes, created_at, updated_at) VALUES (?1, ?2, 'scheduled', ?3, ?4, ?5, ?5)";
const DELETE_SESSION_SQL: &str = "DELETE FROM workout_sessions WHERE id = ?1 AND user_id = ?2";
const SELECT_SESSION_SQL: &str = "SELECT id, user_id, workout_plan_id, status, scheduled_for, started_at, completed_at, notes, created_at, updated_at FROM workout_sessions WHERE id = ?1 AND user_id = ?2";
const SELECT_SESSIONS_SQL: &str = "SELECT id, user_id, workout_plan_id, status, scheduled_for, started_at, completed_at, notes, created_at, updated_at FROM workout_sessions WHERE user_id = ?1 ORDER BY scheduled_for DESC, id DESC";
const SELECT_SESSIONS_BY_STATUS_SQL: &str = "SELECT id, user_id, workout_plan_id, status, scheduled_for, started_at, completed_at, notes, created_at, updated_at FROM workout_sessions WHERE user_id = ?1 AND status = ?2 ORDER BY scheduled_for DESC, id DESC";
const SELECT_DETAIL_SQL: &str = "SELECT s.id, s.user_id, s.workout_plan_id, s.status, s.scheduled_for, s.started_at, s.completed_at, s.notes, s.created_at, s.updated_at, p.name FROM workout_sessions s JOIN workout_plans p ON p.id = s.workout_plan_id WHERE s.id = ?1 AND s.user_id = ?2";
const COUNT_PENDING_SETS_SQL: &str =
    "SELECT COUNT(*) FROM session_sets WHERE workout_session_id = ?1 AND status = 'pending'";
const SELECT_PLAN_SET_TEMPLATE_SQL: &str = "SELECT id, target_sets, target_reps FROM plan_exercises WHERE workout_plan_id = ?1 ORDER BY order_index";
const INSERT_SESSION_SET_SQL: &str = "INSERT INTO session_sets (workout_session_id, plan_exercise_id, set_number, status, target_reps, created_at, updated_at) VALUES (?1, ?2, ?3, 'pending', ?4, ?5, ?5)";

/// True when the error is a SQLite constraint violation, e.g. the
/// partial unique index rejecting a second in-progress session.
fn is_constraint_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

pub(crate) fn parse_timestamp(idx: usize, value: String) -> rusqlite::Result<Timestamp> {
    value
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn parse_status<S: std::str::FromStr>(idx: usize, value: &str) -> rusqlite::Result<S> {
    value.parse::<S>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("Invalid status: {value}").into(),
        )
    })
}

/// Constructs a WorkoutSession from a row in the canonical column order.
fn build_session_from_row(row: &rusqlite::Row) -> rusqlite::Result<WorkoutSession> {
    let status: String = row.get(3)?;
    let scheduled_for: String = row.get(4)?;

    Ok(WorkoutSession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        workout_plan_id: row.get(2)?,
        status: parse_status(3, &status)?,
        scheduled_for: scheduled_for.parse::<Date>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
        })?,
        started_at: row
            .get::<_, Option<String>>(5)?
            .map(|s| parse_timestamp(5, s))
            .transpose()?,
        completed_at: row
            .get::<_, Option<String>>(6)?
            .map(|s| parse_timestamp(6, s))
            .transpose()?,
        notes: row.get(7)?,
        created_at: parse_timestamp(8, row.get(8)?)?,
        updated_at: parse_timestamp(9, row.get(9)?)?,
    })
}

impl super::Database {
    /// Creates a session in `scheduled` status for a plan the user owns.
    pub fn create_session(
        &mut self,
        user_id: i64,
        plan_id: i64,
        scheduled_for: Date,
        notes: Option<&str>,
    ) -> Result<WorkoutSession> {
        if !self.plan_owned_by(plan_id, user_id)? {
            return Err(EngineError::PlanNotFound { id: plan_id });
        }

        let now_str = Timestamp::now().to_string();
        self.connection
            .execute(
                INSERT_SESSION_SQL,
                params![
                    user_id,
                    plan_id,
                    scheduled_for.to_string(),
                    notes,
                    &now_str
                ],
            )
            .db_context("Failed to insert workout session")?;

        let id = self.connection.last_insert_rowid();
        self.get_session(user_id, id)
    }

    /// Retrieves a session scoped to its owner.
    pub fn get_session(&self, user_id: i64, session_id: i64) -> Result<WorkoutSession> {
        self.connection
            .query_row(
                SELECT_SESSION_SQL,
                params![session_id, user_id],
                build_session_from_row,
            )
            .optional()
            .db_context("Failed to query session")?
            .ok_or(EngineError::SessionNotFound { id: session_id })
    }

    /// Retrieves a session with its ordered, exercise-decorated sets.
    pub fn get_session_detail(&self, user_id: i64, session_id: i64) -> Result<SessionDetail> {
        let (session, plan_name) = self
            .connection
            .query_row(SELECT_DETAIL_SQL, params![session_id, user_id], |row| {
                Ok((build_session_from_row(row)?, row.get::<_, String>(10)?))
            })
            .optional()
            .db_context("Failed to query session detail")?
            .ok_or(EngineError::SessionNotFound { id: session_id })?;

        let sets = self.get_session_sets(session_id)?;

        Ok(SessionDetail {
            session,
            plan_name,
            sets,
        })
    }

    /// Lists the user's sessions, optionally filtered by status, newest
    /// scheduled date first.
    pub fn list_sessions(
        &self,
        user_id: i64,
        status: Option<SessionStatus>,
    ) -> Result<Vec<WorkoutSession>> {
        let collect = |mut stmt: rusqlite::Statement<'_>,
                       params: &[&dyn rusqlite::ToSql]|
         -> Result<Vec<WorkoutSession>> {
            let sessions = stmt
                .query_map(params, build_session_from_row)
                .db_context("Failed to query sessions")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch sessions")?;
            Ok(sessions)
        };

        match status {
            Some(status) => {
                let stmt = self
                    .connection
                    .prepare(SELECT_SESSIONS_BY_STATUS_SQL)
                    .db_context("Failed to prepare query")?;
                collect(stmt, &[&user_id, &status.as_str()])
            }
            None => {
                let stmt = self
                    .connection
                    .prepare(SELECT_SESSIONS_SQL)
                    .db_context("Failed to prepare query")?;
                collect(stmt, &[&user_id])
            }
        }
    }

    /// Starts a scheduled session: flips it to `in_progress`, stamps
    /// `started_at`, and atomically instantiates one pending set per
    /// plan exercise and target set, preserving plan order.
    pub fn start_session(&mut self, user_id: i64, session_id: i64) -> Result<SessionDetail> {
        // Immediate: take the write lock up front so a racing start on
        // another connection waits here and then reads this outcome.
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let (status_str, plan_id): (String, i64) = tx
            .query_row(
                SELECT_SESSION_STATUS_SQL,
                params![session_id, user_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .db_context("Failed to query session status")?
            .ok_or(EngineError::SessionNotFound { id: session_id })?;

        let status = status_str
            .parse::<SessionStatus>()
            .map_err(|reason| EngineError::validation("status", reason))?;
        if status != SessionStatus::Scheduled {
            return Err(EngineError::InvalidState {
                action: "start",
                required: SessionStatus::Scheduled,
                actual: status,
            });
        }

        let already_active: bool = tx
            .query_row(CHECK_IN_PROGRESS_SQL, params![user_id], |row| row.get(0))
            .db_context("Failed to check for in-progress session")?;
        if already_active {
            return Err(EngineError::SessionInProgress);
        }

        let now_str = Timestamp::now().to_string();
        let updated = tx
            .execute(START_SESSION_SQL, params![session_id, &now_str])
            .map_err(|e| {
                // The pre-check and this update can race with another
                // start; the partial unique index settles it.
                if is_constraint_violation(&e) {
                    EngineError::SessionInProgress
                } else {
                    EngineError::database("Failed to start session", e)
                }
            })?;
        if updated == 0 {
            return Err(EngineError::SessionInProgress);
        }

        // Instantiate sets from the plan template, in plan order.
        let templates: Vec<(i64, i64, i64)> = {
            let mut stmt = tx
                .prepare(SELECT_PLAN_SET_TEMPLATE_SQL)
                .db_context("Failed to prepare plan template query")?;
            let rows = stmt
                .query_map(params![plan_id], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })
                .db_context("Failed to query plan template")?
                .collect::<std::result::Result<Vec<_>, _>>()
                .db_context("Failed to fetch plan template")?;
            rows
        };

        for (plan_exercise_id, target_sets, target_reps) in templates {
            for set_number in 1..=target_sets {
                tx.execute(
                    INSERT_SESSION_SET_SQL,
                    params![
                        session_id,
                        plan_exercise_id,
                        set_number,
                        target_reps,
                        &now_str
                    ],
                )
                .db_context("Failed to insert session set")?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_session_detail(user_id, session_id)
    }

    /// Completes an in-progress session. Fails while any set is still
    /// pending, reporting the exact count.
    pub fn complete_session(&mut self, user_id: i64, session_id: i64) -> Result<WorkoutSession> {
        self.finish_session(user_id, session_id, SessionStatus::Completed, "complete")
    }

    /// Abandons an in-progress session. No set-completeness requirement.
    pub fn abandon_session(&mut self, user_id: i64, session_id: i64) -> Result<WorkoutSession> {
        self.finish_session(user_id, session_id, SessionStatus::Abandoned, "abandon")
    }

    fn finish_session(
        &mut self,
        user_id: i64,
        session_id: i64,
        target: SessionStatus,
        action: &'static str,
    ) -> Result<WorkoutSession> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let status_str: String = tx
            .query_row(
                SELECT_SESSION_STATUS_SQL,
                params![session_id, user_id],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to query session status")?
            .ok_or(EngineError::SessionNotFound { id: session_id })?;

        let status = status_str
            .parse::<SessionStatus>()
            .map_err(|reason| EngineError::validation("status", reason))?;
        if status != SessionStatus::InProgress {
            return Err(EngineError::InvalidState {
                action,
                required: SessionStatus::InProgress,
                actual: status,
            });
        }

        if target == SessionStatus::Completed {
            // The "all sets resolved" check is a pure aggregate over
            // the session, order-independent.
            let pending: i64 = tx
                .query_row(COUNT_PENDING_SETS_SQL, params![session_id], |row| {
                    row.get(0)
                })
                .db_context("Failed to count pending sets")?;
            if pending > 0 {
                return Err(EngineError::PendingSets { pending });
            }
        }

        // Status and completed_at are one statement: the timestamp is
        // never visible without the status it accompanies.
        let now_str = Timestamp::now().to_string();
        tx.execute(
            FINISH_SESSION_SQL,
            params![session_id, &now_str, target.as_str()],
        )
        .db_context("Failed to update session status")?;

        let session = tx
            .query_row(
                SELECT_SESSION_SQL,
                params![session_id, user_id],
                build_session_from_row,
            )
            .db_context("Failed to query updated session")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(session)
    }

    /// Deletes a session that has not been started. Started sessions
    /// carry history and are rejected.
    pub fn delete_session(&mut self, user_id: i64, session_id: i64) -> Result<()> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let status_str: String = tx
            .query_row(
                SELECT_SESSION_STATUS_SQL,
                params![session_id, user_id],
                |row| row.get(0),
            )
            .optional()
            .db_context("Failed to query session status")?
            .ok_or(EngineError::SessionNotFound { id: session_id })?;

        let status = status_str
            .parse::<SessionStatus>()
            .map_err(|reason| EngineError::validation("status", reason))?;
        if status != SessionStatus::Scheduled {
            return Err(EngineError::NotDeletable { id: session_id });
        }

        tx.execute(DELETE_SESSION_SQL, params![session_id, user_id])
            .db_context("Failed to delete session")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}

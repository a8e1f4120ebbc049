//! Session lifecycle operations for the WorkoutEngine.

use jiff::civil::Date;
use log::{debug, info};

use super::WorkoutEngine;
use crate::{
    error::{EngineError, Result},
    models::{PlanExercise, SessionDetail, SessionStatus, WorkoutPlan, WorkoutSession},
};

impl WorkoutEngine {
    /// Starts a scheduled session owned by the user.
    ///
    /// On success the session is `in_progress` with `started_at`
    /// stamped, and one pending set exists per plan exercise and
    /// target set. Fails with `SessionInProgress` when the user
    /// already has an active session, even if two starts race: the
    /// store's uniqueness guarantee rejects the loser.
    pub async fn start_session(&self, user_id: i64, session_id: i64) -> Result<SessionDetail> {
        let detail = self
            .with_db(move |db| db.start_session(user_id, session_id))
            .await?;
        info!(
            "Started session {} with {} sets",
            detail.session.id,
            detail.sets.len()
        );
        Ok(detail)
    }

    /// Completes an in-progress session once every set is resolved.
    pub async fn complete_session(&self, user_id: i64, session_id: i64) -> Result<WorkoutSession> {
        let session = self
            .with_db(move |db| db.complete_session(user_id, session_id))
            .await?;
        info!("Completed session {}", session.id);
        Ok(session)
    }

    /// Abandons an in-progress session, resolving nothing.
    pub async fn abandon_session(&self, user_id: i64, session_id: i64) -> Result<WorkoutSession> {
        let session = self
            .with_db(move |db| db.abandon_session(user_id, session_id))
            .await?;
        info!("Abandoned session {}", session.id);
        Ok(session)
    }

    /// Deletes a session that is still in `scheduled` status.
    pub async fn delete_session(&self, user_id: i64, session_id: i64) -> Result<()> {
        self.with_db(move |db| db.delete_session(user_id, session_id))
            .await
    }

    /// Retrieves a session with its ordered, exercise-decorated sets.
    pub async fn get_session(&self, user_id: i64, session_id: i64) -> Result<SessionDetail> {
        self.with_db(move |db| db.get_session_detail(user_id, session_id))
            .await
    }

    /// Lists the user's sessions, optionally filtered by status.
    pub async fn list_sessions(
        &self,
        user_id: i64,
        status: Option<SessionStatus>,
    ) -> Result<Vec<WorkoutSession>> {
        self.with_db(move |db| db.list_sessions(user_id, status))
            .await
    }

    /// Schedules a new session from a plan for a given date. The
    /// session is created in `scheduled` status; its sets do not exist
    /// until `start_session`.
    pub async fn schedule_session(
        &self,
        user_id: i64,
        plan_id: i64,
        scheduled_for: Date,
        notes: Option<String>,
    ) -> Result<WorkoutSession> {
        let session = self
            .with_db(move |db| db.create_session(user_id, plan_id, scheduled_for, notes.as_deref()))
            .await?;
        debug!("Scheduled session {} for {}", session.id, scheduled_for);
        Ok(session)
    }

    /// Creates a workout plan. Plan authoring beyond this seeding
    /// surface lives outside the engine.
    pub async fn create_plan(&self, user_id: i64, name: String) -> Result<WorkoutPlan> {
        self.with_db(move |db| db.create_plan(user_id, &name)).await
    }

    /// Appends an exercise entry to a plan.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_plan_exercise(
        &self,
        user_id: i64,
        plan_id: i64,
        exercise_name: String,
        target_sets: i64,
        target_reps: i64,
        rest_seconds: i64,
    ) -> Result<PlanExercise> {
        self.with_db(move |db| {
            db.add_plan_exercise(
                user_id,
                plan_id,
                &exercise_name,
                target_sets,
                target_reps,
                rest_seconds,
            )
        })
        .await
    }

    /// Retrieves the ordered exercise entries of a plan the user owns.
    pub async fn list_plan_exercises(
        &self,
        user_id: i64,
        plan_id: i64,
    ) -> Result<Vec<PlanExercise>> {
        self.with_db(move |db| {
            if !db.plan_owned_by(plan_id, user_id)? {
                return Err(EngineError::PlanNotFound { id: plan_id });
            }
            db.get_plan_exercises(plan_id)
        })
        .await
    }
}

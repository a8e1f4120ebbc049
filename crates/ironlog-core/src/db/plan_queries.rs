//! Plan and exercise queries the engine depends on.
//!
//! Plan authoring is not part of the execution engine; these
//! operations exist so sessions have planned sets to instantiate from
//! and so the CLI and tests can seed fixtures.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use crate::{
    error::{DatabaseResultExt, EngineError, Result},
    models::{PlanExercise, WorkoutPlan},
};

const CHECK_PLAN_OWNED_SQL: &str =
    "SELECT EXISTS(SELECT 1 FROM workout_plans WHERE id = ?1 AND user_id = ?2)";
const INSERT_PLAN_SQL: &str =
    "INSERT INTO workout_plans (user_id, name, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_EXERCISE_BY_NAME_SQL: &str = "SELECT id FROM exercises WHERE name = ?1";
const INSERT_EXERCISE_SQL: &str = "INSERT INTO exercises (name, created_at) VALUES (?1, ?2)";
const NEXT_ORDER_INDEX_SQL: &str =
    "SELECT COALESCE(MAX(order_index), -1) + 1 FROM plan_exercises WHERE workout_plan_id = ?1";
const INSERT_PLAN_EXERCISE_SQL: &str = "INSERT INTO plan_exercises (workout_plan_id, exercise_id, order_index, target_sets, target_reps, rest_seconds) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_PLAN_EXERCISES_SQL: &str = "SELECT pe.id, pe.workout_plan_id, pe.exercise_id, e.name, pe.order_index, pe.target_sets, pe.target_reps, pe.rest_seconds FROM plan_exercises pe JOIN exercises e ON e.id = pe.exercise_id WHERE pe.workout_plan_id = ?1 ORDER BY pe.order_index";

impl super::Database {
    /// Returns whether the plan exists and belongs to the user.
    pub(crate) fn plan_owned_by(&self, plan_id: i64, user_id: i64) -> Result<bool> {
        self.connection
            .query_row(CHECK_PLAN_OWNED_SQL, params![plan_id, user_id], |row| {
                row.get(0)
            })
            .db_context("Failed to check plan ownership")
    }

    /// Creates a workout plan for the user.
    pub fn create_plan(&mut self, user_id: i64, name: &str) -> Result<WorkoutPlan> {
        let now_str = Timestamp::now().to_string();
        self.connection
            .execute(INSERT_PLAN_SQL, params![user_id, name, &now_str, &now_str])
            .db_context("Failed to insert workout plan")?;

        Ok(WorkoutPlan {
            id: self.connection.last_insert_rowid(),
            user_id,
            name: name.into(),
        })
    }

    /// Appends an exercise entry to a plan, creating the exercise by
    /// name if it does not exist yet.
    pub fn add_plan_exercise(
        &mut self,
        user_id: i64,
        plan_id: i64,
        exercise_name: &str,
        target_sets: i64,
        target_reps: i64,
        rest_seconds: i64,
    ) -> Result<PlanExercise> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let owned: bool = tx
            .query_row(CHECK_PLAN_OWNED_SQL, params![plan_id, user_id], |row| {
                row.get(0)
            })
            .db_context("Failed to check plan ownership")?;
        if !owned {
            return Err(EngineError::PlanNotFound { id: plan_id });
        }

        let exercise_id: i64 = match tx
            .query_row(SELECT_EXERCISE_BY_NAME_SQL, params![exercise_name], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to look up exercise")?
        {
            Some(id) => id,
            None => {
                tx.execute(
                    INSERT_EXERCISE_SQL,
                    params![exercise_name, Timestamp::now().to_string()],
                )
                .db_context("Failed to insert exercise")?;
                tx.last_insert_rowid()
            }
        };

        let order_index: i64 = tx
            .query_row(NEXT_ORDER_INDEX_SQL, params![plan_id], |row| row.get(0))
            .db_context("Failed to get next order index")?;

        tx.execute(
            INSERT_PLAN_EXERCISE_SQL,
            params![
                plan_id,
                exercise_id,
                order_index,
                target_sets,
                target_reps,
                rest_seconds
            ],
        )
        .db_context("Failed to insert plan exercise")?;

        let id = tx.last_insert_rowid();
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(PlanExercise {
            id,
            workout_plan_id: plan_id,
            exercise_id,
            exercise_name: exercise_name.into(),
            order_index,
            target_sets,
            target_reps,
            rest_seconds,
        })
    }

    /// Retrieves the ordered exercise entries of a plan.
    pub fn get_plan_exercises(&self, plan_id: i64) -> Result<Vec<PlanExercise>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_EXERCISES_SQL)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map(params![plan_id], |row| {
                Ok(PlanExercise {
                    id: row.get(0)?,
                    workout_plan_id: row.get(1)?,
                    exercise_id: row.get(2)?,
                    exercise_name: row.get(3)?,
                    order_index: row.get(4)?,
                    target_sets: row.get(5)?,
                    target_reps: row.get(6)?,
                    rest_seconds: row.get(7)?,
                })
            })
            .db_context("Failed to query plan exercises")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plan exercises")?;

        Ok(entries)
    }
}

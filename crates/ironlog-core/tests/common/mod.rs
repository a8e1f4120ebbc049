use ironlog_core::{WorkoutEngine, WorkoutEngineBuilder};
use tempfile::TempDir;

/// Helper function to create a test engine
pub async fn create_test_engine() -> (TempDir, WorkoutEngine) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let engine = WorkoutEngineBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create engine");
    (temp_dir, engine)
}

/// Seeds a plan with one exercise (3 sets of 5) and schedules a
/// session from it. Returns the session id.
pub async fn seed_scheduled_session(engine: &WorkoutEngine, user_id: i64) -> i64 {
    let plan = engine
        .create_plan(user_id, "Strength A".to_string())
        .await
        .expect("Failed to create plan");
    engine
        .add_plan_exercise(user_id, plan.id, "Deadlift".to_string(), 3, 5, 180)
        .await
        .expect("Failed to add exercise");
    let session = engine
        .schedule_session(user_id, plan.id, jiff::civil::date(2025, 6, 1), None)
        .await
        .expect("Failed to schedule session");
    session.id
}

//! Store-level tests exercising Database directly, without the async
//! engine facade.

use ironlog_core::{Database, EngineError, SessionStatus, SetStatus, SetUpdate};
use jiff::civil::date;
use tempfile::TempDir;

fn create_test_database() -> (TempDir, Database) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db = Database::new(temp_dir.path().join("test.db")).expect("Failed to create database");
    (temp_dir, db)
}

/// Seeds a plan with one exercise and a scheduled session, returning
/// the session id.
fn seed_session(db: &mut Database, user_id: i64) -> i64 {
    let plan = db
        .create_plan(user_id, "Test Plan")
        .expect("Failed to create plan");
    db.add_plan_exercise(user_id, plan.id, "Squat", 2, 5, 120)
        .expect("Failed to add exercise");
    db.create_session(user_id, plan.id, date(2025, 6, 1), None)
        .expect("Failed to create session")
        .id
}

#[test]
fn test_schema_applies_on_open_and_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");

    let mut db = Database::new(&db_path).expect("Failed to create database");
    let session_id = seed_session(&mut db, 1);
    drop(db);

    // Reopening must not clobber existing data.
    let db = Database::new(&db_path).expect("Failed to reopen database");
    let session = db
        .get_session(1, session_id)
        .expect("Session must survive reopen");
    assert_eq!(session.status, SessionStatus::Scheduled);
}

#[test]
fn test_exercises_are_deduplicated_by_name() {
    let (_temp_dir, mut db) = create_test_database();

    let plan_a = db.create_plan(1, "Plan A").expect("Failed to create plan");
    let plan_b = db.create_plan(1, "Plan B").expect("Failed to create plan");

    let first = db
        .add_plan_exercise(1, plan_a.id, "Squat", 3, 5, 120)
        .expect("Failed to add exercise");
    let second = db
        .add_plan_exercise(1, plan_b.id, "Squat", 5, 3, 180)
        .expect("Failed to add exercise");

    assert_eq!(first.exercise_id, second.exercise_id);
}

#[test]
fn test_plan_exercises_keep_insertion_order() {
    let (_temp_dir, mut db) = create_test_database();

    let plan = db.create_plan(1, "Ordered").expect("Failed to create plan");
    for name in ["Squat", "Bench Press", "Row"] {
        db.add_plan_exercise(1, plan.id, name, 1, 5, 90)
            .expect("Failed to add exercise");
    }

    let entries = db
        .get_plan_exercises(plan.id)
        .expect("Failed to get plan exercises");
    let names: Vec<_> = entries.iter().map(|e| e.exercise_name.as_str()).collect();
    assert_eq!(names, ["Squat", "Bench Press", "Row"]);
    assert_eq!(
        entries.iter().map(|e| e.order_index).collect::<Vec<_>>(),
        [0, 1, 2]
    );
}

#[test]
fn test_schedule_against_foreign_plan_fails() {
    let (_temp_dir, mut db) = create_test_database();

    let plan = db.create_plan(1, "Mine").expect("Failed to create plan");
    let err = db
        .create_session(2, plan.id, date(2025, 6, 1), None)
        .expect_err("Scheduling another user's plan must fail");
    assert!(matches!(err, EngineError::PlanNotFound { .. }));
}

#[test]
fn test_one_in_progress_session_per_user() {
    let (_temp_dir, mut db) = create_test_database();
    let first = seed_session(&mut db, 1);
    let second = seed_session(&mut db, 1);

    db.start_session(1, first).expect("Failed to start session");
    let err = db
        .start_session(1, second)
        .expect_err("Second concurrent session must be rejected");
    assert!(matches!(err, EngineError::SessionInProgress));

    // The invariant is per user.
    let other = seed_session(&mut db, 2);
    db.start_session(2, other)
        .expect("Other user's session must start");
}

#[test]
fn test_update_set_merges_absent_fields() {
    let (_temp_dir, mut db) = create_test_database();
    let session_id = seed_session(&mut db, 1);
    let detail = db
        .start_session(1, session_id)
        .expect("Failed to start session");
    let set_id = detail.sets[0].id;

    db.update_set(
        set_id,
        &SetUpdate {
            actual_reps: Some(5),
            weight_kg: Some(100.0),
            notes: Some("belt on".to_string()),
            ..SetUpdate::default()
        },
    )
    .expect("Failed to update set");

    // A later status-only update keeps the previously stored fields.
    let updated = db
        .update_set(
            set_id,
            &SetUpdate {
                status: Some(SetStatus::Completed),
                ..SetUpdate::default()
            },
        )
        .expect("Failed to update set");

    assert_eq!(updated.status, SetStatus::Completed);
    assert_eq!(updated.actual_reps, Some(5));
    assert_eq!(updated.weight_kg, Some(100.0));
    assert_eq!(updated.notes, Some("belt on".to_string()));
    assert!(updated.completed_at.is_some());
}

#[test]
fn test_update_set_clears_stamp_for_unresolved_status() {
    let (_temp_dir, mut db) = create_test_database();
    let session_id = seed_session(&mut db, 1);
    let detail = db
        .start_session(1, session_id)
        .expect("Failed to start session");
    let set_id = detail.sets[0].id;

    let skipped = db
        .update_set(set_id, &SetUpdate::skipped())
        .expect("Failed to update set");
    assert_eq!(skipped.status, SetStatus::Skipped);
    assert!(skipped.completed_at.is_none());
}

#[test]
fn test_set_lookup_is_ownership_scoped() {
    let (_temp_dir, mut db) = create_test_database();
    let session_id = seed_session(&mut db, 1);
    let detail = db
        .start_session(1, session_id)
        .expect("Failed to start session");
    let set_id = detail.sets[0].id;

    let (set, session_status) = db
        .get_set_with_session(1, set_id)
        .expect("Owner must see the set");
    assert_eq!(set.id, set_id);
    assert_eq!(session_status, SessionStatus::InProgress);

    let err = db
        .get_set_with_session(2, set_id)
        .expect_err("Another user must not see the set");
    assert!(matches!(err, EngineError::SetNotFound { .. }));
}

#[test]
fn test_sets_are_decorated_with_exercise_data() {
    let (_temp_dir, mut db) = create_test_database();
    let session_id = seed_session(&mut db, 1);
    let detail = db
        .start_session(1, session_id)
        .expect("Failed to start session");

    assert_eq!(detail.sets.len(), 2);
    for set in &detail.sets {
        assert_eq!(set.exercise_name, "Squat");
        assert_eq!(set.rest_seconds, 120);
        assert_eq!(set.target_reps, 5);
    }
}

//! End-to-end engine tests covering the full session workflow.

mod common;

use common::{create_test_engine, seed_scheduled_session};
use ironlog_core::{EngineError, SessionStatus, Sessions, SetStatus, SetUpdate};

#[tokio::test]
async fn test_complete_workout_workflow() {
    let (_temp_dir, engine) = create_test_engine().await;
    let session_id = seed_scheduled_session(&engine, 1).await;

    // Start: session flips to in_progress and sets materialize.
    let detail = engine
        .start_session(1, session_id)
        .await
        .expect("Failed to start session");
    assert_eq!(detail.session.status, SessionStatus::InProgress);
    assert_eq!(detail.sets.len(), 3);
    assert_eq!(detail.pending_count(), 3);

    // Work through the sets in order, the way the execution screen
    // drives it: complete, complete, skip the last one.
    let first = detail.first_pending_set().expect("A pending set").id;
    engine
        .patch_set(1, first, SetUpdate::completed(5, Some(140.0)))
        .await
        .expect("Failed to complete set");

    let detail = engine
        .get_session(1, session_id)
        .await
        .expect("Failed to fetch session");
    let second = detail.first_pending_set().expect("A pending set").id;
    assert_ne!(second, first);
    engine
        .patch_set(1, second, SetUpdate::completed(4, Some(140.0)))
        .await
        .expect("Failed to complete set");

    let detail = engine
        .get_session(1, session_id)
        .await
        .expect("Failed to fetch session");
    let third = detail.first_pending_set().expect("A pending set").id;
    engine
        .patch_set(1, third, SetUpdate::skipped())
        .await
        .expect("Failed to skip set");

    // Complete: terminal status with a timestamp.
    let session = engine
        .complete_session(1, session_id)
        .await
        .expect("Failed to complete session");
    assert_eq!(session.status, SessionStatus::Completed);
    assert!(session.completed_at.is_some());

    // The finished session reads back with resolved sets only.
    let detail = engine
        .get_session(1, session_id)
        .await
        .expect("Failed to fetch session");
    assert_eq!(detail.pending_count(), 0);
    assert!(detail.first_pending_set().is_none());
    let statuses: Vec<_> = detail.sets.iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        [SetStatus::Completed, SetStatus::Completed, SetStatus::Skipped]
    );
}

#[tokio::test]
async fn test_abandon_workflow() {
    let (_temp_dir, engine) = create_test_engine().await;
    let session_id = seed_scheduled_session(&engine, 1).await;

    engine
        .start_session(1, session_id)
        .await
        .expect("Failed to start session");
    let session = engine
        .abandon_session(1, session_id)
        .await
        .expect("Failed to abandon session");
    assert_eq!(session.status, SessionStatus::Abandoned);

    // The user can immediately start another session.
    let next = seed_scheduled_session(&engine, 1).await;
    engine
        .start_session(1, next)
        .await
        .expect("Starting after abandon must succeed");
}

#[tokio::test]
async fn test_racing_starts_yield_one_conflict() {
    let (_temp_dir, engine) = create_test_engine().await;

    // Two genuinely concurrent starts for the same user: exactly one
    // wins, and the loser sees the conflict error rather than a
    // low-level database failure from lock contention.
    for round in 0..10 {
        let first = seed_scheduled_session(&engine, 1).await;
        let second = seed_scheduled_session(&engine, 1).await;

        let (a, b) = tokio::join!(
            engine.start_session(1, first),
            engine.start_session(1, second)
        );

        let (winner, loser) = match (a, b) {
            (Ok(detail), Err(e)) | (Err(e), Ok(detail)) => (detail, e),
            (Ok(_), Ok(_)) => panic!("round {round}: both starts succeeded"),
            (Err(a), Err(b)) => panic!("round {round}: both starts failed: {a}; {b}"),
        };
        assert!(
            matches!(loser, EngineError::SessionInProgress),
            "round {round}: loser got: {loser}"
        );

        engine
            .abandon_session(1, winner.session.id)
            .await
            .expect("Failed to abandon session");
    }
}

#[tokio::test]
async fn test_scheduled_sessions_have_no_sets() {
    let (_temp_dir, engine) = create_test_engine().await;
    let session_id = seed_scheduled_session(&engine, 1).await;

    let detail = engine
        .get_session(1, session_id)
        .await
        .expect("Failed to fetch session");
    assert_eq!(detail.session.status, SessionStatus::Scheduled);
    assert!(detail.sets.is_empty());
}

#[tokio::test]
async fn test_set_mutation_blocked_before_start() {
    let (_temp_dir, engine) = create_test_engine().await;
    let session_id = seed_scheduled_session(&engine, 1).await;
    engine
        .start_session(1, session_id)
        .await
        .expect("Failed to start session");
    let detail = engine
        .get_session(1, session_id)
        .await
        .expect("Failed to fetch session");
    let set_id = detail.sets[0].id;

    engine
        .abandon_session(1, session_id)
        .await
        .expect("Failed to abandon session");

    let err = engine
        .patch_set(1, set_id, SetUpdate::completed(5, None))
        .await
        .expect_err("Patching an abandoned session's set must fail");
    assert!(matches!(
        err,
        EngineError::SessionNotActive {
            status: SessionStatus::Abandoned,
        }
    ));
}

#[tokio::test]
async fn test_session_list_display() {
    let (_temp_dir, engine) = create_test_engine().await;
    let first = seed_scheduled_session(&engine, 1).await;
    seed_scheduled_session(&engine, 1).await;
    engine
        .start_session(1, first)
        .await
        .expect("Failed to start session");

    let sessions = engine
        .list_sessions(1, None)
        .await
        .expect("Failed to list sessions");
    let output = format!("{}", Sessions(sessions));
    assert!(output.contains("➤ In Progress"));
    assert!(output.contains("○ Scheduled"));

    let empty = engine
        .list_sessions(3, None)
        .await
        .expect("Failed to list sessions");
    assert_eq!(format!("{}", Sessions(empty)), "No sessions found.\n");
}

#[tokio::test]
async fn test_session_detail_display() {
    let (_temp_dir, engine) = create_test_engine().await;
    let session_id = seed_scheduled_session(&engine, 1).await;
    let detail = engine
        .start_session(1, session_id)
        .await
        .expect("Failed to start session");
    engine
        .patch_set(1, detail.sets[0].id, SetUpdate::completed(5, Some(142.5)))
        .await
        .expect("Failed to complete set");

    let detail = engine
        .get_session(1, session_id)
        .await
        .expect("Failed to fetch session");
    let output = format!("{detail}");
    assert!(output.contains("# Strength A: Session"));
    assert!(output.contains("## Deadlift"));
    assert!(output.contains("did 5 @ 142.5 kg"));
    assert!(output.contains("2 of 3 sets pending."));
}

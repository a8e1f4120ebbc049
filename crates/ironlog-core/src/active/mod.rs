//! In-memory state for the session currently being performed.
//!
//! [`ActiveWorkout`] tracks what the user is doing right now against
//! one in-progress session, independent of network latency: the
//! current-set pointer, the rest countdown, and the queue of updates
//! that have not reached the server yet. It is an explicitly scoped
//! container owned by the execution screen, not a process-wide
//! singleton: created when a session is opened and cleared when the
//! session leaves `in_progress`.
//!
//! Optimistic updates follow a snapshot-before / apply / confirm-or-
//! rollback pattern: [`ActiveWorkout::apply_optimistic`] returns a
//! [`PatchSnapshot`] scoped to that single mutation, and
//! [`ActiveWorkout::rollback`] restores it if the round-trip fails
//! without being queued offline.

use jiff::Timestamp;

use crate::models::{SessionDetail, SessionSet, SetStatus, SetUpdate};

pub mod queue;
pub mod store;
pub mod timer;

pub use queue::{OfflineQueue, QueuedUpdate};
pub use store::ActiveWorkoutSnapshot;
pub use timer::{RestTimer, DEFAULT_REST_SECONDS};

/// Pre-mutation snapshot of a single set, for rolling back one failed
/// optimistic update.
#[derive(Debug, Clone)]
pub struct PatchSnapshot {
    previous: SessionSet,
}

/// Client-side state for one active workout session.
#[derive(Debug, Clone, Default)]
pub struct ActiveWorkout {
    session_id: i64,
    session: Option<SessionDetail>,
    current_set_id: Option<i64>,
    timer: Option<RestTimer>,
    offline_queue: OfflineQueue,
}

impl ActiveWorkout {
    /// Creates empty state for a session about to be executed.
    pub fn new(session_id: i64) -> Self {
        Self {
            session_id,
            ..Self::default()
        }
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    /// The cached session snapshot, if one has been fetched.
    pub fn session(&self) -> Option<&SessionDetail> {
        self.session.as_ref()
    }

    /// The set the user is actively filling in: first pending set in
    /// display order.
    pub fn current_set_id(&self) -> Option<i64> {
        self.current_set_id
    }

    pub fn timer(&self) -> Option<&RestTimer> {
        self.timer.as_ref()
    }

    pub fn offline_queue(&self) -> &OfflineQueue {
        &self.offline_queue
    }

    /// Replaces the cached session snapshot after a server round-trip
    /// and recomputes the current-set pointer.
    pub fn set_session(&mut self, session: SessionDetail) {
        self.session_id = session.session.id;
        self.current_set_id = session.first_pending_set().map(|s| s.id);
        self.session = Some(session);
    }

    /// Resets everything. Called when the session leaves
    /// `in_progress` or the user abandons from the client.
    pub fn clear(&mut self) {
        self.session = None;
        self.current_set_id = None;
        self.timer = None;
        self.offline_queue.clear();
    }

    // ---- rest timer ------------------------------------------------

    /// Begins a rest countdown for the set whose completion triggered
    /// it. Only one timer is active at a time; any prior countdown is
    /// replaced.
    pub fn start_timer(&mut self, set_id: i64, duration_seconds: u32) {
        self.timer = Some(RestTimer::new(set_id, duration_seconds));
    }

    /// Advances the countdown by one second while running. Reaching
    /// zero clears the timer entirely; its absence after it existed is
    /// the completion signal the UI consumes, so no tick should be
    /// scheduled once the timer is gone.
    pub fn tick_timer(&mut self) {
        let Some(timer) = self.timer.as_mut() else {
            return;
        };
        if !timer.is_running {
            return;
        }
        let remaining = timer.remaining_seconds.saturating_sub(1);
        if remaining == 0 {
            self.timer = None;
        } else {
            timer.remaining_seconds = remaining;
        }
    }

    pub fn pause_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.is_running = false;
        }
    }

    pub fn resume_timer(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.is_running = true;
        }
    }

    /// Adjusts the remaining rest without touching the original
    /// duration; clamped at zero.
    pub fn adjust_timer(&mut self, delta_seconds: i64) {
        if let Some(timer) = self.timer.as_mut() {
            timer.adjust(delta_seconds);
        }
    }

    pub fn skip_timer(&mut self) {
        self.timer = None;
    }

    // ---- offline queue ---------------------------------------------

    /// Queues an update that failed to reach the server. Upserts by
    /// set id so only the most recent pending update per set survives.
    pub fn enqueue_offline(&mut self, set_id: i64, update: SetUpdate) {
        self.offline_queue.upsert(set_id, update);
    }

    /// Drops the queued update for a set after a successful replay.
    pub fn dequeue_offline(&mut self, set_id: i64) -> bool {
        self.offline_queue.remove(set_id)
    }

    // ---- optimistic updates ----------------------------------------

    /// Applies an update to the cached snapshot before the server
    /// confirms it, mirroring the merge the store will perform
    /// (including the client-side `completed_at` stamp). Returns a
    /// snapshot of the set's prior state, or `None` when the set is
    /// not in the cached session.
    pub fn apply_optimistic(&mut self, set_id: i64, update: &SetUpdate) -> Option<PatchSnapshot> {
        let session = self.session.as_mut()?;
        let set = session.sets.iter_mut().find(|s| s.id == set_id)?;
        let previous = set.clone();

        if let Some(reps) = update.actual_reps {
            set.actual_reps = Some(reps);
        }
        if let Some(weight) = update.weight_kg {
            set.weight_kg = Some(weight);
        }
        if let Some(notes) = &update.notes {
            set.notes = Some(notes.clone());
        }
        if let Some(status) = update.status {
            set.status = status;
            set.completed_at = match status {
                SetStatus::Completed => set.completed_at.or_else(|| Some(Timestamp::now())),
                SetStatus::Pending | SetStatus::Skipped => None,
            };
        }

        self.current_set_id = session.first_pending_set().map(|s| s.id);
        Some(PatchSnapshot { previous })
    }

    /// Installs a server-confirmed set into the cached session,
    /// replacing whatever the optimistic merge produced.
    pub fn apply_confirmed(&mut self, set: SessionSet) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(slot) = session.sets.iter_mut().find(|s| s.id == set.id) {
            *slot = set;
        }
        self.current_set_id = session.first_pending_set().map(|s| s.id);
    }

    /// Restores the set captured by a failed optimistic update.
    pub fn rollback(&mut self, snapshot: PatchSnapshot) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(set) = session
            .sets
            .iter_mut()
            .find(|s| s.id == snapshot.previous.id)
        {
            *set = snapshot.previous;
        }
        self.current_set_id = session.first_pending_set().map(|s| s.id);
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{SessionStatus, WorkoutSession};

    fn sample_detail() -> SessionDetail {
        let set = |id: i64, set_number: i64| SessionSet {
            id,
            workout_session_id: 42,
            plan_exercise_id: 1,
            set_number,
            status: SetStatus::Pending,
            target_reps: 10,
            actual_reps: None,
            weight_kg: None,
            completed_at: None,
            notes: None,
            exercise_name: "Squat".to_string(),
            rest_seconds: 90,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };

        SessionDetail {
            session: WorkoutSession {
                id: 42,
                user_id: 1,
                workout_plan_id: 1,
                status: SessionStatus::InProgress,
                scheduled_for: jiff::civil::date(2025, 6, 1),
                started_at: Some(Timestamp::now()),
                completed_at: None,
                notes: None,
                created_at: Timestamp::now(),
                updated_at: Timestamp::now(),
            },
            plan_name: "Leg Day".to_string(),
            sets: vec![set(1, 1), set(2, 2), set(3, 3)],
        }
    }

    #[test]
    fn set_session_points_at_first_pending_set() {
        let mut state = ActiveWorkout::new(42);
        state.set_session(sample_detail());
        assert_eq!(state.current_set_id(), Some(1));
    }

    #[test]
    fn optimistic_complete_advances_pointer_and_stamps() {
        let mut state = ActiveWorkout::new(42);
        state.set_session(sample_detail());

        let snapshot = state
            .apply_optimistic(1, &SetUpdate::completed(10, Some(100.0)))
            .expect("set 1 is cached");

        let set = &state.session().unwrap().sets[0];
        assert_eq!(set.status, SetStatus::Completed);
        assert!(set.completed_at.is_some());
        assert_eq!(state.current_set_id(), Some(2));

        // Rolling back restores the set and the pointer.
        state.rollback(snapshot);
        let set = &state.session().unwrap().sets[0];
        assert_eq!(set.status, SetStatus::Pending);
        assert!(set.completed_at.is_none());
        assert_eq!(state.current_set_id(), Some(1));
    }

    #[test]
    fn starting_a_timer_replaces_the_previous_one() {
        let mut state = ActiveWorkout::new(42);
        state.start_timer(1, 90);
        state.start_timer(2, 60);

        let timer = state.timer().expect("timer running");
        assert_eq!(timer.triggered_by_set_id, 2);
        assert_eq!(timer.remaining_seconds, 60);
    }

    #[test]
    fn tick_counts_down_and_clears_at_zero() {
        let mut state = ActiveWorkout::new(42);
        state.start_timer(1, 2);

        state.tick_timer();
        assert_eq!(state.timer().unwrap().remaining_seconds, 1);

        // Reaching zero removes the timer; no lingering finished state.
        state.tick_timer();
        assert!(state.timer().is_none());

        // Ticking with no timer is a no-op.
        state.tick_timer();
        assert!(state.timer().is_none());
    }

    #[test]
    fn tick_at_zero_clears_the_timer() {
        let mut state = ActiveWorkout::new(42);
        state.start_timer(1, 30);
        state.adjust_timer(-9999);
        assert_eq!(state.timer().unwrap().remaining_seconds, 0);

        state.tick_timer();
        assert!(state.timer().is_none());
    }

    #[test]
    fn pause_freezes_the_countdown() {
        let mut state = ActiveWorkout::new(42);
        state.start_timer(1, 10);
        state.pause_timer();
        state.tick_timer();
        assert_eq!(state.timer().unwrap().remaining_seconds, 10);

        state.resume_timer();
        state.tick_timer();
        assert_eq!(state.timer().unwrap().remaining_seconds, 9);
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = ActiveWorkout::new(42);
        state.set_session(sample_detail());
        state.start_timer(1, 90);
        state.enqueue_offline(1, SetUpdate::skipped());

        state.clear();

        assert!(state.session().is_none());
        assert!(state.current_set_id().is_none());
        assert!(state.timer().is_none());
        assert!(state.offline_queue().is_empty());
    }
}

//! Sync coordination between local active-workout state and the
//! engine.
//!
//! Every set update flows through [`SyncCoordinator::patch_set`]:
//! apply optimistically, then either confirm against the engine, queue
//! for later when offline, or roll back when the engine rejects the
//! update outright. Queued updates are replayed by [`SyncCoordinator::flush`],
//! driven from two places: a debounced reaction to connectivity
//! returning, and a periodic safety-net tick ([`SYNC_INTERVAL`]) that
//! catches missed connectivity events.

use std::future::Future;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::sleep;

use crate::{
    active::ActiveWorkout,
    error::Result,
    models::{SessionSet, SetUpdate},
};

/// How often the periodic safety-net flush should run.
pub const SYNC_INTERVAL: Duration = Duration::from_secs(30);

/// Delay between a connectivity-restored event and the flush it
/// triggers, so a flapping connection coalesces into one replay.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// Reports whether the device can currently reach the engine's
/// backing store.
///
/// Consulted both before a send (to skip a doomed request) and after
/// a failed one (the connection may have dropped mid-request).
pub trait Connectivity {
    fn is_online(&self) -> bool;
}

/// Connectivity stub for embedded use where the engine is local.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

impl Connectivity for AlwaysOnline {
    fn is_online(&self) -> bool {
        true
    }
}

/// How a patch was resolved.
#[derive(Debug)]
pub enum PatchOutcome {
    /// The engine accepted the update; the confirmed set is installed
    /// in the cached session.
    Confirmed(SessionSet),
    /// Offline; the optimistic state stands and the update waits in
    /// the queue.
    Queued,
}

/// Tally of one flush pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub synced: usize,
    pub failed: usize,
}

/// Orchestrates optimistic set updates and offline replay for one
/// active workout.
#[derive(Debug, Clone)]
pub struct SyncCoordinator<C> {
    connectivity: C,
    debounce: Duration,
}

impl<C: Connectivity> SyncCoordinator<C> {
    pub fn new(connectivity: C) -> Self {
        Self {
            connectivity,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Overrides the debounce delay; tests use a zero duration.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn is_online(&self) -> bool {
        self.connectivity.is_online()
    }

    /// True when a flush would do useful work.
    pub fn should_flush(&self, state: &ActiveWorkout) -> bool {
        !state.offline_queue().is_empty() && self.connectivity.is_online()
    }

    /// Applies a set update optimistically and settles it against the
    /// engine.
    ///
    /// Offline (before or during the send): the optimistic state
    /// stands and the update is queued, upserting over any older
    /// queued update for the same set. Accepted: the confirmed row
    /// replaces the optimistic one and any stale queue entry is
    /// dropped. Rejected while online: the optimistic change is
    /// rolled back and the error is returned, because a rejection is
    /// a rule violation the user must see, not a delivery problem to
    /// retry.
    pub async fn patch_set<F, Fut>(
        &self,
        state: &mut ActiveWorkout,
        set_id: i64,
        update: SetUpdate,
        mut send: F,
    ) -> Result<PatchOutcome>
    where
        F: FnMut(i64, SetUpdate) -> Fut,
        Fut: Future<Output = Result<SessionSet>>,
    {
        let snapshot = state.apply_optimistic(set_id, &update);

        if !self.connectivity.is_online() {
            debug!("Offline; queueing update for set {set_id}");
            state.enqueue_offline(set_id, update);
            return Ok(PatchOutcome::Queued);
        }

        match send(set_id, update.clone()).await {
            Ok(confirmed) => {
                state.dequeue_offline(set_id);
                state.apply_confirmed(confirmed.clone());
                Ok(PatchOutcome::Confirmed(confirmed))
            }
            Err(e) if !self.connectivity.is_online() => {
                debug!("Send for set {set_id} failed offline ({e}); queueing");
                state.enqueue_offline(set_id, update);
                Ok(PatchOutcome::Queued)
            }
            Err(e) => {
                warn!("Update for set {set_id} rejected: {e}");
                if let Some(snapshot) = snapshot {
                    state.rollback(snapshot);
                }
                Err(e)
            }
        }
    }

    /// Reacts to connectivity being restored: waits out the debounce
    /// window, then flushes whatever is still queued.
    pub async fn handle_online<F, Fut>(&self, state: &mut ActiveWorkout, send: F) -> SyncReport
    where
        F: FnMut(i64, SetUpdate) -> Fut,
        Fut: Future<Output = Result<SessionSet>>,
    {
        sleep(self.debounce).await;
        self.flush(state, send).await
    }

    /// Replays every queued update in insertion order. Accepted
    /// updates leave the queue and refresh the cached session; failed
    /// ones stay queued for the next pass.
    pub async fn flush<F, Fut>(&self, state: &mut ActiveWorkout, mut send: F) -> SyncReport
    where
        F: FnMut(i64, SetUpdate) -> Fut,
        Fut: Future<Output = Result<SessionSet>>,
    {
        let pending: Vec<_> = state.offline_queue().entries().to_vec();
        if pending.is_empty() {
            return SyncReport::default();
        }

        let mut report = SyncReport::default();
        for entry in pending {
            match send(entry.set_id, entry.update.clone()).await {
                Ok(confirmed) => {
                    state.dequeue_offline(entry.set_id);
                    state.apply_confirmed(confirmed);
                    report.synced += 1;
                }
                Err(e) => {
                    warn!("Replay for set {} failed: {e}", entry.set_id);
                    report.failed += 1;
                }
            }
        }

        info!(
            "Flushed offline queue: {} synced, {} failed",
            report.synced, report.failed
        );
        report
    }
}

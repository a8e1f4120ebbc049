//! Offline queue of set updates awaiting replay.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::SetUpdate;

/// One not-yet-confirmed set update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueuedUpdate {
    pub set_id: i64,
    pub update: SetUpdate,
    pub queued_at: Timestamp,
}

/// Ordered queue of updates that failed to reach the server.
///
/// Keyed by set id: enqueueing replaces any existing entry for the
/// same set, so at most one update per set is ever held and replays
/// for a single set can never run out of order relative to each other.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OfflineQueue {
    items: Vec<QueuedUpdate>,
}

impl OfflineQueue {
    /// Inserts an update for a set, replacing any queued predecessor
    /// and stamping a fresh timestamp.
    pub fn upsert(&mut self, set_id: i64, update: SetUpdate) {
        self.items.retain(|item| item.set_id != set_id);
        self.items.push(QueuedUpdate {
            set_id,
            update,
            queued_at: Timestamp::now(),
        });
    }

    /// Removes the entry for a set after a successful replay. Returns
    /// whether an entry was present.
    pub fn remove(&mut self, set_id: i64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.set_id != set_id);
        self.items.len() != before
    }

    /// The queued update for a set, if any.
    pub fn get(&self, set_id: i64) -> Option<&QueuedUpdate> {
        self.items.iter().find(|item| item.set_id == set_id)
    }

    /// All queued entries in insertion order.
    pub fn entries(&self) -> &[QueuedUpdate] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SetStatus;

    #[test]
    fn upsert_keeps_latest_update_per_set() {
        let mut queue = OfflineQueue::default();

        queue.upsert(5, SetUpdate::completed(8, None));
        queue.upsert(5, SetUpdate::completed(10, Some(60.0)));

        assert_eq!(queue.len(), 1);
        let entry = queue.get(5).expect("entry for set 5");
        assert_eq!(entry.update.actual_reps, Some(10));
        assert_eq!(entry.update.weight_kg, Some(60.0));
    }

    #[test]
    fn upsert_preserves_entries_for_other_sets() {
        let mut queue = OfflineQueue::default();

        queue.upsert(1, SetUpdate::skipped());
        queue.upsert(2, SetUpdate::completed(12, None));
        queue.upsert(1, SetUpdate::completed(5, None));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get(2).unwrap().update.status, Some(SetStatus::Completed));
        assert_eq!(queue.get(1).unwrap().update.actual_reps, Some(5));
    }

    #[test]
    fn remove_reports_presence() {
        let mut queue = OfflineQueue::default();
        queue.upsert(7, SetUpdate::skipped());

        assert!(queue.remove(7));
        assert!(!queue.remove(7));
        assert!(queue.is_empty());
    }
}

//! Set operations for the WorkoutEngine.

use log::debug;

use super::WorkoutEngine;
use crate::{
    error::{EngineError, Result},
    models::{SessionSet, SessionStatus, SetUpdate},
};

impl WorkoutEngine {
    /// Applies a partial update to a session set.
    ///
    /// Guards, in order: the set must exist and its parent session be
    /// owned by the caller; the parent session must be `in_progress`
    /// (sets are immutable outside active execution); a provided
    /// status must be a legal transition; a set being completed must
    /// have actual reps in the update or already stored. When the
    /// status becomes `completed` the store stamps `completed_at`
    /// together with the status write.
    ///
    /// Self-transitions are accepted as no-ops, which makes replaying
    /// a queued update against an already-resolved set succeed.
    pub async fn patch_set(
        &self,
        user_id: i64,
        set_id: i64,
        update: SetUpdate,
    ) -> Result<SessionSet> {
        update.validate_fields()?;

        let updated = self
            .with_db(move |db| {
                let (current, session_status) = db.get_set_with_session(user_id, set_id)?;

                if session_status != SessionStatus::InProgress {
                    return Err(EngineError::SessionNotActive {
                        status: session_status,
                    });
                }

                update.validate_against(&current)?;

                db.update_set(set_id, &update)
            })
            .await?;

        debug!("Patched set {} to status '{}'", updated.id, updated.status);
        Ok(updated)
    }
}

//! Request types for mutating models.

use serde::{Deserialize, Serialize};

use super::{SessionSet, SetStatus};
use crate::error::{EngineError, Result};

/// Maximum storable weight, matching the store's DECIMAL(6,2) limit.
pub const MAX_WEIGHT_KG: f64 = 9999.99;

/// Partial update for a session set. All fields optional; absent
/// fields keep their stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_reps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SetUpdate {
    /// Shorthand for the common "set performed" update.
    pub fn completed(actual_reps: i64, weight_kg: Option<f64>) -> Self {
        Self {
            actual_reps: Some(actual_reps),
            weight_kg,
            status: Some(SetStatus::Completed),
            notes: None,
        }
    }

    /// Shorthand for marking a set skipped.
    pub fn skipped() -> Self {
        Self {
            status: Some(SetStatus::Skipped),
            ..Self::default()
        }
    }

    /// True when the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.actual_reps.is_none()
            && self.weight_kg.is_none()
            && self.status.is_none()
            && self.notes.is_none()
    }

    /// Field-level validation independent of the target set.
    pub fn validate_fields(&self) -> Result<()> {
        if self.is_empty() {
            return Err(EngineError::validation(
                "update",
                "At least one field must be provided",
            ));
        }
        if let Some(reps) = self.actual_reps {
            if reps < 0 {
                return Err(EngineError::validation(
                    "actual_reps",
                    "Actual reps must be greater than or equal to 0",
                ));
            }
        }
        if let Some(weight) = self.weight_kg {
            if !(0.0..=MAX_WEIGHT_KG).contains(&weight) {
                return Err(EngineError::validation(
                    "weight_kg",
                    format!("Weight must be between 0 and {MAX_WEIGHT_KG} kg"),
                ));
            }
        }
        Ok(())
    }

    /// Business-rule validation against the set being updated: the
    /// status transition must be legal, and a set being marked
    /// completed must have actual reps either in this update or
    /// already stored.
    pub fn validate_against(&self, current: &SessionSet) -> Result<()> {
        if let Some(next) = self.status {
            if !current.status.can_transition_to(next) {
                return Err(EngineError::validation(
                    "status",
                    format!(
                        "Cannot transition from '{}' to '{}'. Only 'pending -> completed' \
                         or 'pending -> skipped' transitions are allowed",
                        current.status, next
                    ),
                ));
            }
            if next == SetStatus::Completed
                && self.actual_reps.is_none()
                && current.actual_reps.is_none()
            {
                return Err(EngineError::validation(
                    "actual_reps",
                    "Actual reps are required when status is 'completed'",
                ));
            }
        }
        Ok(())
    }
}

//! Display implementations for domain models.
//!
//! Sessions render as a markdown document: a header with metadata,
//! then the sets grouped by exercise with status icons. Individual
//! sets render as compact single lines suitable for progress views.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{SessionDetail, SessionSet, SetStatus, WorkoutSession};

impl fmt::Display for WorkoutSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Session {} ({})",
            self.id,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- Scheduled for: {}", self.scheduled_for)?;
        if let Some(started) = &self.started_at {
            writeln!(f, "- Started: {}", LocalDateTime(started))?;
        }
        if let Some(completed) = &self.completed_at {
            writeln!(f, "- Finished: {}", LocalDateTime(completed))?;
        }
        if let Some(notes) = &self.notes {
            writeln!(f, "- Notes: {notes}")?;
        }
        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for SessionDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# {}: Session {} ({})",
            self.plan_name,
            self.session.id,
            self.session.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- Scheduled for: {}", self.session.scheduled_for)?;
        if let Some(started) = &self.session.started_at {
            writeln!(f, "- Started: {}", LocalDateTime(started))?;
        }
        if let Some(completed) = &self.session.completed_at {
            writeln!(f, "- Finished: {}", LocalDateTime(completed))?;
        }
        if let Some(notes) = &self.session.notes {
            writeln!(f, "- Notes: {notes}")?;
        }

        if self.sets.is_empty() {
            writeln!(f, "\nNo sets in this session.")?;
            return Ok(());
        }

        // Sets arrive ordered by exercise then set number; group by
        // exercise name for readable output.
        let mut current_exercise: Option<&str> = None;
        for set in &self.sets {
            if current_exercise != Some(set.exercise_name.as_str()) {
                writeln!(f, "\n## {}", set.exercise_name)?;
                writeln!(f)?;
                current_exercise = Some(set.exercise_name.as_str());
            }
            write!(f, "{set}")?;
        }

        let pending = self.pending_count();
        writeln!(f)?;
        if pending == 0 {
            writeln!(f, "All sets resolved.")?;
        } else {
            writeln!(f, "{pending} of {} sets pending.", self.sets.len())?;
        }

        Ok(())
    }
}

impl fmt::Display for SessionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- Set {}: {} (target {} reps)",
            self.set_number,
            self.status.with_icon(),
            self.target_reps
        )?;
        if self.status == SetStatus::Completed {
            if let Some(reps) = self.actual_reps {
                write!(f, ", did {reps}")?;
            }
            if let Some(weight) = self.weight_kg {
                write!(f, " @ {weight} kg")?;
            }
        }
        if let Some(notes) = &self.notes {
            write!(f, " ({notes})")?;
        }
        writeln!(f)
    }
}

//! Immutable per-frame view of a run.

use std::time::Duration;

use super::registry::Step;
use super::status::StepStatus;

/// What the renderer sees on one tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RunSnapshot {
    /// Steps by value, in plan order.
    pub steps: Vec<Step>,
    /// Free-text line shown under the step list.
    pub status_line: Option<String>,
    /// Wall-clock time since the run started.
    pub elapsed: Duration,
    /// Index into the spinner frames.
    pub spinner_frame: usize,
}

impl RunSnapshot {
    /// Progress figures for the step list.
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.steps.iter().filter(|s| s.status.is_complete()).count(),
            total: self.steps.len(),
        }
    }

    /// Whether some step is currently active.
    pub fn has_active(&self) -> bool {
        self.steps.iter().any(|s| s.status == StepStatus::Active)
    }
}

/// Done-or-skipped count over the total number of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Whole percentage, rounded down. An empty run is at 0%.
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        100 * self.completed / self.total
    }

    /// Filled segments of a bar `width` wide, rounded down.
    pub fn filled(&self, width: usize) -> usize {
        if self.total == 0 {
            return 0;
        }
        (width * self.completed / self.total).min(width)
    }
}

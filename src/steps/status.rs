//! Step lifecycle states.

/// Status of a step in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepStatus {
    /// Step is waiting to run.
    #[default]
    Pending,

    /// Step is currently executing.
    Active,

    /// Step completed successfully.
    Done,

    /// Step was skipped (nothing to do, optional asset missing, dry run).
    Skipped,

    /// Step failed.
    Failed,
}

impl StepStatus {
    /// Check if this is a terminal state (no more changes expected).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StepStatus::Done | StepStatus::Skipped | StepStatus::Failed
        )
    }

    /// Whether this status counts towards progress.
    pub fn is_complete(&self) -> bool {
        matches!(self, StepStatus::Done | StepStatus::Skipped)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    ///
    /// `Active -> Pending` is the demotion applied when another step is
    /// activated; `Active -> Active` refreshes the detail.
    pub fn can_transition_to(&self, next: StepStatus) -> bool {
        use StepStatus::*;
        match (self, next) {
            (Pending, Active | Skipped | Failed) => true,
            (Active, Active | Done | Skipped | Failed | Pending) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StepStatus::Pending => "pending",
            StepStatus::Active => "active",
            StepStatus::Done => "done",
            StepStatus::Skipped => "skipped",
            StepStatus::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!StepStatus::Pending.is_terminal());
        assert!(!StepStatus::Active.is_terminal());
        assert!(StepStatus::Done.is_terminal());
        assert!(StepStatus::Skipped.is_terminal());
        assert!(StepStatus::Failed.is_terminal());
    }

    #[test]
    fn complete_states_count_towards_progress() {
        assert!(StepStatus::Done.is_complete());
        assert!(StepStatus::Skipped.is_complete());
        assert!(!StepStatus::Failed.is_complete());
        assert!(!StepStatus::Active.is_complete());
    }

    #[test]
    fn pending_can_skip_or_fail_directly() {
        assert!(StepStatus::Pending.can_transition_to(StepStatus::Skipped));
        assert!(StepStatus::Pending.can_transition_to(StepStatus::Failed));
        assert!(StepStatus::Pending.can_transition_to(StepStatus::Active));
        assert!(!StepStatus::Pending.can_transition_to(StepStatus::Done));
    }

    #[test]
    fn terminal_states_never_transition() {
        for from in [StepStatus::Done, StepStatus::Skipped, StepStatus::Failed] {
            for to in [
                StepStatus::Pending,
                StepStatus::Active,
                StepStatus::Done,
                StepStatus::Skipped,
                StepStatus::Failed,
            ] {
                assert!(!from.can_transition_to(to), "{} -> {}", from, to);
            }
        }
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(StepStatus::Skipped.to_string(), "skipped");
        assert_eq!(StepStatus::Active.to_string(), "active");
    }
}

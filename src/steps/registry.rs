//! Ordered step list and its state machine.

use tracing::debug;

use super::status::StepStatus;

/// Identity and label of a step, as declared in a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDef {
    pub id: String,
    pub label: String,
}

impl StepDef {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A step and its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Stable identifier, unique within a run.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Current lifecycle status.
    pub status: StepStatus,
    /// Short annotation shown beside the label.
    pub detail: Option<String>,
}

/// Ordered steps of a run.
///
/// The list never grows or shrinks after construction. At most one step is
/// [`StepStatus::Active`]. Every operation tolerates unknown ids and illegal
/// transitions by leaving state untouched and returning `false`.
#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    steps: Vec<Step>,
    active: Option<usize>,
}

impl StepRegistry {
    /// Build a registry with every step pending.
    ///
    /// Ids are expected to be unique; lookups resolve to the first match.
    pub fn new<I>(defs: I) -> Self
    where
        I: IntoIterator<Item = StepDef>,
    {
        let steps = defs
            .into_iter()
            .map(|def| Step {
                id: def.id,
                label: def.label,
                status: StepStatus::Pending,
                detail: None,
            })
            .collect();

        Self {
            steps,
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, id: &str) -> Option<&Step> {
        self.index_of(id).map(|i| &self.steps[i])
    }

    /// Id of the step currently active, if any.
    pub fn active_id(&self) -> Option<&str> {
        self.active.map(|i| self.steps[i].id.as_str())
    }

    /// Copy of the steps for rendering.
    pub fn snapshot(&self) -> Vec<Step> {
        self.steps.clone()
    }

    /// Mark a step active, demoting any other active step back to pending.
    pub fn set_active(&mut self, id: &str, detail: Option<&str>) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!("Ignoring activation of unknown step '{}'", id);
            return false;
        };
        if !self.steps[index].status.can_transition_to(StepStatus::Active) {
            debug!(
                "Ignoring activation of step '{}' in state {}",
                id, self.steps[index].status
            );
            return false;
        }

        if let Some(previous) = self.active.filter(|&i| i != index) {
            self.steps[previous].status = StepStatus::Pending;
        }

        self.apply(index, StepStatus::Active, detail);
        self.active = Some(index);
        true
    }

    /// Mark a step done.
    pub fn complete(&mut self, id: &str, detail: Option<&str>) -> bool {
        self.finish(id, StepStatus::Done, detail)
    }

    /// Mark a step skipped.
    pub fn skip(&mut self, id: &str, detail: Option<&str>) -> bool {
        self.finish(id, StepStatus::Skipped, detail)
    }

    /// Mark a step failed.
    pub fn fail(&mut self, id: &str, detail: Option<&str>) -> bool {
        self.finish(id, StepStatus::Failed, detail)
    }

    /// Fail whichever step is active. Returns the id that was failed.
    pub fn fail_active(&mut self, detail: Option<&str>) -> Option<String> {
        let index = self.active?;
        let id = self.steps[index].id.clone();
        self.fail(&id, detail).then_some(id)
    }

    /// Number of steps that are done or skipped.
    pub fn completed_count(&self) -> usize {
        self.steps.iter().filter(|s| s.status.is_complete()).count()
    }

    fn finish(&mut self, id: &str, status: StepStatus, detail: Option<&str>) -> bool {
        let Some(index) = self.index_of(id) else {
            debug!("Ignoring {} of unknown step '{}'", status, id);
            return false;
        };
        if !self.steps[index].status.can_transition_to(status) {
            debug!(
                "Ignoring {} of step '{}' in state {}",
                status, id, self.steps[index].status
            );
            return false;
        }

        self.apply(index, status, detail);
        if self.active == Some(index) {
            self.active = None;
        }
        true
    }

    fn apply(&mut self, index: usize, status: StepStatus, detail: Option<&str>) {
        let step = &mut self.steps[index];
        step.status = status;
        if let Some(detail) = detail.filter(|d| !d.is_empty()) {
            step.detail = Some(detail.to_string());
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> StepRegistry {
        StepRegistry::new([
            StepDef::new("check", "Check environment"),
            StepDef::new("admin", "Ensure admin privileges"),
            StepDef::new("extract", "Extract archives"),
        ])
    }

    fn active_count(reg: &StepRegistry) -> usize {
        reg.steps()
            .iter()
            .filter(|s| s.status == StepStatus::Active)
            .count()
    }

    fn status(reg: &StepRegistry, id: &str) -> StepStatus {
        reg.get(id).unwrap().status
    }

    #[test]
    fn new_steps_are_pending() {
        let reg = registry();
        assert_eq!(reg.len(), 3);
        assert!(reg.steps().iter().all(|s| s.status == StepStatus::Pending));
        assert!(reg.active_id().is_none());
    }

    #[test]
    fn activate_then_complete() {
        let mut reg = registry();
        assert!(reg.set_active("check", Some("Windows")));
        assert_eq!(reg.active_id(), Some("check"));
        assert_eq!(reg.get("check").unwrap().detail.as_deref(), Some("Windows"));

        assert!(reg.complete("check", Some("OK")));
        assert_eq!(status(&reg, "check"), StepStatus::Done);
        assert_eq!(reg.get("check").unwrap().detail.as_deref(), Some("OK"));
        assert!(reg.active_id().is_none());
    }

    #[test]
    fn activating_another_step_demotes_previous() {
        let mut reg = registry();
        reg.set_active("check", None);
        reg.set_active("admin", None);

        assert_eq!(status(&reg, "check"), StepStatus::Pending);
        assert_eq!(status(&reg, "admin"), StepStatus::Active);
        assert_eq!(reg.active_id(), Some("admin"));
        assert_eq!(active_count(&reg), 1);
    }

    #[test]
    fn at_most_one_active_after_every_transition() {
        let mut reg = registry();
        let ops: [(&str, &str); 8] = [
            ("activate", "check"),
            ("activate", "admin"),
            ("activate", "extract"),
            ("complete", "extract"),
            ("activate", "check"),
            ("skip", "check"),
            ("activate", "admin"),
            ("fail", "admin"),
        ];
        for (op, id) in ops {
            match op {
                "activate" => reg.set_active(id, None),
                "complete" => reg.complete(id, None),
                "skip" => reg.skip(id, None),
                _ => reg.fail(id, Some("Error")),
            };
            assert!(active_count(&reg) <= 1, "after {} {}", op, id);
            assert_eq!(
                reg.active_id().is_some(),
                active_count(&reg) == 1,
                "bookkeeping out of sync after {} {}",
                op,
                id
            );
        }
    }

    #[test]
    fn unknown_ids_are_noops() {
        let mut reg = registry();
        reg.set_active("check", None);
        let before: Vec<_> = reg.snapshot();

        assert!(!reg.set_active("nope", None));
        assert!(!reg.complete("nope", Some("x")));
        assert!(!reg.skip("nope", Some("x")));
        assert!(!reg.fail("nope", Some("x")));

        assert_eq!(reg.snapshot(), before);
        assert_eq!(reg.active_id(), Some("check"));
    }

    #[test]
    fn skip_and_fail_clear_active() {
        let mut reg = registry();
        reg.set_active("check", None);
        reg.skip("check", Some("Dry run"));
        assert!(reg.active_id().is_none());

        reg.set_active("admin", None);
        reg.fail("admin", Some("Declined"));
        assert!(reg.active_id().is_none());
        assert_eq!(status(&reg, "admin"), StepStatus::Failed);
    }

    #[test]
    fn finishing_non_active_step_keeps_active() {
        let mut reg = registry();
        reg.set_active("admin", None);
        assert!(reg.skip("extract", Some("No archives")));
        assert_eq!(reg.active_id(), Some("admin"));
    }

    #[test]
    fn pending_step_can_be_skipped_or_failed() {
        let mut reg = registry();
        assert!(reg.skip("check", None));
        assert!(reg.fail("admin", Some("precondition")));
        assert_eq!(status(&reg, "check"), StepStatus::Skipped);
        assert_eq!(status(&reg, "admin"), StepStatus::Failed);
    }

    #[test]
    fn pending_step_cannot_complete_without_activation() {
        let mut reg = registry();
        assert!(!reg.complete("check", None));
        assert_eq!(status(&reg, "check"), StepStatus::Pending);
    }

    #[test]
    fn terminal_states_are_final() {
        let mut reg = registry();
        reg.set_active("check", None);
        reg.complete("check", Some("OK"));

        assert!(!reg.set_active("check", None));
        assert!(!reg.fail("check", Some("late")));
        assert!(!reg.skip("check", None));
        assert_eq!(status(&reg, "check"), StepStatus::Done);
        assert_eq!(reg.get("check").unwrap().detail.as_deref(), Some("OK"));
    }

    #[test]
    fn fail_active_without_active_is_noop() {
        let mut reg = registry();
        assert!(reg.fail_active(Some("Error")).is_none());
        assert!(reg.steps().iter().all(|s| s.status == StepStatus::Pending));
    }

    #[test]
    fn fail_active_returns_failed_id() {
        let mut reg = registry();
        reg.set_active("extract", None);
        assert_eq!(reg.fail_active(Some("Error")).as_deref(), Some("extract"));
        assert_eq!(status(&reg, "extract"), StepStatus::Failed);
        assert_eq!(reg.get("extract").unwrap().detail.as_deref(), Some("Error"));
    }

    #[test]
    fn absent_detail_keeps_previous_detail() {
        let mut reg = registry();
        reg.set_active("check", Some("Windows"));
        reg.complete("check", None);
        assert_eq!(reg.get("check").unwrap().detail.as_deref(), Some("Windows"));
    }

    #[test]
    fn completed_count_includes_skipped() {
        let mut reg = registry();
        reg.set_active("check", None);
        reg.complete("check", None);
        reg.skip("admin", None);
        reg.fail("extract", None);
        assert_eq!(reg.completed_count(), 2);
    }
}

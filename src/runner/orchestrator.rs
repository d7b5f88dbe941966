//! Sequential execution of a plan.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::actions::{Action, ActionResult};
use crate::runtime::RuntimeContext;
use crate::steps::{Step, StepDef, StepRegistry};
use crate::ui::{catch_action_panic, Acknowledger, Renderer};

/// One step of a plan and the action behind it.
pub struct PlannedStep {
    pub def: StepDef,
    pub action: Box<dyn Action>,
}

impl PlannedStep {
    pub fn new(id: impl Into<String>, label: impl Into<String>, action: impl Action + 'static) -> Self {
        Self {
            def: StepDef::new(id, label),
            action: Box::new(action),
        }
    }
}

/// An ordered list of steps plus the words used to describe the run.
pub struct Plan {
    /// Title drawn above the step list.
    pub title: String,
    /// Noun for closing messages, e.g. `Installation`.
    pub activity: String,
    /// Shown under the step list before the first step runs.
    pub note: Option<String>,
    pub steps: Vec<PlannedStep>,
}

impl Plan {
    pub fn new(title: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            activity: activity.into(),
            note: None,
            steps: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Append a step.
    pub fn step(mut self, id: &str, label: &str, action: impl Action + 'static) -> Self {
        self.steps.push(PlannedStep::new(id, label, action));
        self
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step ids in order.
    pub fn ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.def.id.as_str()).collect()
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every step completed or was skipped.
    Succeeded,
    /// A step failed and the rest were not attempted.
    Failed { step: String, message: String },
    /// A step handed the work to another process.
    Delegated { step: String, reason: String },
}

/// Result of running a plan.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Final state of every step.
    pub steps: Vec<Step>,
    pub duration: Duration,
}

impl RunReport {
    pub fn success(&self) -> bool {
        !matches!(self.outcome, RunOutcome::Failed { .. })
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }

    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }
}

/// What the orchestrator makes of one action invocation.
enum StepOutcome {
    Continue,
    Abort(String),
    Delegate(String),
}

/// Drives a [`Plan`] through the registry, the renderer and the
/// acknowledgment pause.
pub struct Orchestrator<'a> {
    ctx: &'a RuntimeContext,
    renderer: Renderer,
    acknowledger: Box<dyn Acknowledger>,
    log_file: Option<PathBuf>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        ctx: &'a RuntimeContext,
        renderer: Renderer,
        acknowledger: Box<dyn Acknowledger>,
    ) -> Self {
        Self {
            ctx,
            renderer,
            acknowledger,
            log_file: Some(ctx.log_file().to_path_buf()),
        }
    }

    /// The log file named in the failure message, or `None` when no log
    /// file was opened for this run.
    pub fn with_log_file(mut self, log_file: Option<PathBuf>) -> Self {
        self.log_file = log_file;
        self
    }

    /// Run every step in order, stopping at the first failure.
    ///
    /// Action errors and panics end the run like a failed step. The
    /// renderer is always finished and the cursor restored before this
    /// returns.
    pub fn run(mut self, plan: Plan) -> RunReport {
        let start = Instant::now();
        let Plan {
            activity,
            note,
            steps,
            ..
        } = plan;

        let mut registry = StepRegistry::new(steps.iter().map(|s| s.def.clone()));
        self.renderer.start(registry.snapshot());
        if let Some(note) = &note {
            self.renderer.note(note);
        }

        let mut outcome = RunOutcome::Succeeded;
        for planned in &steps {
            let id = planned.def.id.as_str();
            let label = planned.def.label.as_str();

            let detail = planned.action.detail(self.ctx);
            registry.set_active(id, detail.as_deref());
            self.renderer.update(registry.snapshot());

            let result = self.invoke(planned.action.as_ref(), label);
            let step = apply(&mut registry, id, result);
            self.renderer.update(registry.snapshot());

            match step {
                StepOutcome::Continue => {}
                StepOutcome::Abort(message) => {
                    outcome = RunOutcome::Failed {
                        step: id.to_string(),
                        message,
                    };
                    break;
                }
                StepOutcome::Delegate(reason) => {
                    outcome = RunOutcome::Delegated {
                        step: id.to_string(),
                        reason,
                    };
                    break;
                }
            }
        }

        tracing::debug!(
            "{} of {} steps done or skipped",
            registry.completed_count(),
            registry.len()
        );
        self.close(&activity, &outcome);

        RunReport {
            outcome,
            steps: registry.snapshot(),
            duration: start.elapsed(),
        }
    }

    /// Call the action, turning errors and panics into `Failed`.
    fn invoke(&self, action: &dyn Action, label: &str) -> ActionResult {
        let ctx = self.ctx;
        match catch_action_panic(|| action.run(ctx)) {
            Ok(Ok(result)) => result,
            Ok(Err(err)) => {
                tracing::error!("{} failed: {:#}", label, err);
                ActionResult::Failed(err.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!("{} panicked: {}", label, message);
                ActionResult::Failed(message)
            }
        }
    }

    /// Finish the display and wait for the user where appropriate.
    fn close(&mut self, activity: &str, outcome: &RunOutcome) {
        // A disabled renderer leaves the prompt to the acknowledger.
        let inline_prompt = match self.acknowledger.prompt() {
            Some(p) if self.renderer.is_enabled() => Some(p.to_string()),
            _ => None,
        };
        let with_prompt = |message: String| match &inline_prompt {
            Some(p) => format!("{} {}", message, p),
            None => message,
        };

        match outcome {
            RunOutcome::Succeeded => {
                tracing::info!("===== {} Complete =====", activity);
                let message = with_prompt(format!("{} complete.", activity));
                self.renderer.finish(true, Some(&message));
            }
            RunOutcome::Failed { step, message } => {
                tracing::error!("===== {} Failed at step '{}' =====", activity, step);
                let message = with_prompt(failure_message(message, self.log_file.as_deref()));
                self.renderer.finish(false, Some(&message));
            }
            RunOutcome::Delegated { reason, .. } => {
                self.renderer.finish(true, Some(reason));
                return;
            }
        }

        let show_prompt = !self.renderer.is_enabled();
        if let Err(err) = self.acknowledger.wait(show_prompt) {
            tracing::debug!("Acknowledgment skipped: {}", err);
        }
    }
}

/// Record an action's result in the registry. The renderer logs the
/// resulting transition.
fn apply(registry: &mut StepRegistry, id: &str, result: ActionResult) -> StepOutcome {
    match result {
        ActionResult::Completed(detail) => {
            registry.complete(id, detail.as_deref());
            StepOutcome::Continue
        }
        ActionResult::Skipped(reason) => {
            registry.skip(id, Some(&reason));
            StepOutcome::Continue
        }
        ActionResult::Failed(message) => {
            registry.fail(id, Some(&message));
            StepOutcome::Abort(message)
        }
        ActionResult::Delegated(reason) => {
            registry.skip(id, Some(&reason));
            StepOutcome::Delegate(reason)
        }
    }
}

fn failure_message(message: &str, log_file: Option<&Path>) -> String {
    match log_file {
        Some(path) => format!("{}. Log file: {}", message.trim_end_matches('.'), path.display()),
        None => message.to_string(),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::{dry_run_ctx, live_ctx};
    use crate::logging::test_support::capture_console;
    use crate::steps::StepStatus;
    use crate::ui::NoPause;
    use std::cell::Cell;
    use std::rc::Rc;

    fn quiet_renderer() -> Renderer {
        Renderer::new("Test", false)
    }

    fn ok(detail: &'static str) -> impl Fn(&RuntimeContext) -> anyhow::Result<ActionResult> {
        move |_| Ok(ActionResult::completed(detail))
    }

    #[test]
    fn failure_aborts_remaining_steps() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = live_ctx(temp.path());
        let ran_third = Rc::new(Cell::new(false));
        let flag = ran_third.clone();

        let plan = Plan::new("Test", "Installation")
            .step("one", "First", ok("OK"))
            .step("two", "Second", |_: &RuntimeContext| -> anyhow::Result<ActionResult> {
                Ok(ActionResult::failed("disk full"))
            })
            .step("three", "Third", move |_: &RuntimeContext| -> anyhow::Result<ActionResult> {
                flag.set(true);
                Ok(ActionResult::completed("OK"))
            });

        let report = Orchestrator::new(&ctx, quiet_renderer(), Box::new(NoPause)).run(plan);

        assert_eq!(report.step("one").unwrap().status, StepStatus::Done);
        let two = report.step("two").unwrap();
        assert_eq!(two.status, StepStatus::Failed);
        assert_eq!(two.detail.as_deref(), Some("disk full"));
        assert_eq!(report.step("three").unwrap().status, StepStatus::Pending);
        assert!(!ran_third.get());
        assert!(!report.success());
        assert_ne!(report.exit_code(), 0);
        assert_eq!(
            report.outcome,
            RunOutcome::Failed {
                step: "two".to_string(),
                message: "disk full".to_string()
            }
        );
    }

    #[test]
    fn errors_become_failures() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = live_ctx(temp.path());
        let plan = Plan::new("Test", "Installation").step(
            "copy",
            "Copy files",
            |_: &RuntimeContext| -> anyhow::Result<ActionResult> {
                Err(anyhow::anyhow!("disk full").context("Failed to copy"))
            },
        );

        let report = Orchestrator::new(&ctx, quiet_renderer(), Box::new(NoPause)).run(plan);

        let step = report.step("copy").unwrap();
        assert_eq!(step.status, StepStatus::Failed);
        assert_eq!(step.detail.as_deref(), Some("Failed to copy"));
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn panics_become_failures() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = live_ctx(temp.path());
        let plan = Plan::new("Test", "Installation")
            .step(
                "boom",
                "Explode",
                |_: &RuntimeContext| -> anyhow::Result<ActionResult> { panic!("kaboom") },
            )
            .step("after", "After", ok("OK"));

        let report = Orchestrator::new(&ctx, quiet_renderer(), Box::new(NoPause)).run(plan);

        let step = report.step("boom").unwrap();
        assert_eq!(step.status, StepStatus::Failed);
        assert_eq!(step.detail.as_deref(), Some("kaboom"));
        assert_eq!(report.step("after").unwrap().status, StepStatus::Pending);
    }

    #[test]
    fn dry_run_ends_done_or_skipped() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = dry_run_ctx(temp.path());
        let plan = Plan::new("Test", "Installation")
            .with_note("Dry run mode: no changes will be made.")
            .step("one", "First", |ctx: &RuntimeContext| -> anyhow::Result<ActionResult> {
                if ctx.is_dry_run() {
                    return Ok(ActionResult::skipped("Dry run"));
                }
                Ok(ActionResult::failed("touched the system"))
            })
            .step("two", "Second", ok("OK"));

        let report = Orchestrator::new(&ctx, quiet_renderer(), Box::new(NoPause)).run(plan);

        assert!(report.success());
        assert!(report
            .steps
            .iter()
            .all(|s| matches!(s.status, StepStatus::Done | StepStatus::Skipped)));
    }

    #[test]
    fn delegation_skips_step_and_succeeds() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = live_ctx(temp.path());
        let plan = Plan::new("Test", "Installation")
            .step("admin", "Ensure admin", |_: &RuntimeContext| -> anyhow::Result<ActionResult> {
                Ok(ActionResult::Delegated("Continued in elevated window".to_string()))
            })
            .step("rest", "Rest", ok("OK"));

        let report = Orchestrator::new(&ctx, quiet_renderer(), Box::new(NoPause)).run(plan);

        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.step("admin").unwrap().status, StepStatus::Skipped);
        assert_eq!(report.step("rest").unwrap().status, StepStatus::Pending);
        assert!(matches!(report.outcome, RunOutcome::Delegated { .. }));
    }

    #[test]
    fn delegation_does_not_wait() {
        struct Counting(Rc<Cell<u32>>);
        impl Acknowledger for Counting {
            fn prompt(&self) -> Option<&str> {
                Some("Press Enter to exit.")
            }
            fn wait(&mut self, _show_prompt: bool) -> crate::error::Result<()> {
                self.0.set(self.0.get() + 1);
                Ok(())
            }
        }

        let temp = tempfile::TempDir::new().unwrap();
        let ctx = live_ctx(temp.path());
        let waits = Rc::new(Cell::new(0));

        let plan = Plan::new("Test", "Installation").step("one", "One", ok("OK"));
        Orchestrator::new(&ctx, quiet_renderer(), Box::new(Counting(waits.clone()))).run(plan);
        assert_eq!(waits.get(), 1);

        let plan = Plan::new("Test", "Installation").step(
            "admin",
            "Admin",
            |_: &RuntimeContext| -> anyhow::Result<ActionResult> {
                Ok(ActionResult::Delegated("elevated".to_string()))
            },
        );
        Orchestrator::new(&ctx, quiet_renderer(), Box::new(Counting(waits.clone()))).run(plan);
        assert_eq!(waits.get(), 1);
    }

    #[test]
    fn empty_plan_succeeds() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = live_ctx(temp.path());
        let plan = Plan::new("Test", "Installation");
        assert!(plan.is_empty());

        let report = Orchestrator::new(&ctx, quiet_renderer(), Box::new(NoPause)).run(plan);
        assert!(report.success());
        assert!(report.steps.is_empty());
    }

    fn failing_plan() -> Plan {
        Plan::new("Test", "Installation")
            .step("one", "First", ok("OK"))
            .step("two", "Second", |_: &RuntimeContext| -> anyhow::Result<ActionResult> {
                Ok(ActionResult::failed("disk full"))
            })
            .step("three", "Third", ok("OK"))
    }

    #[test]
    fn plain_run_logs_each_transition_once() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = live_ctx(temp.path());

        let (report, out) = capture_console(|| {
            Orchestrator::new(&ctx, quiet_renderer(), Box::new(NoPause)).run(failing_plan())
        });

        assert_eq!(report.exit_code(), 1);
        for line in [
            "[INFO] [1/3] First: active\n",
            "[INFO] [1/3] First: done - OK\n",
            "[INFO] [2/3] Second: active\n",
            "[ERROR] [2/3] Second: failed - disk full\n",
        ] {
            assert_eq!(out.matches(line).count(), 1, "{:?} in {}", line, out);
        }
        assert!(!out.contains("Third"));
        assert_eq!(out.matches("disk full").count(), 2);
        assert!(out.contains(&format!(
            "[ERROR] Failed: disk full. Log file: {}\n",
            ctx.log_file().display()
        )));
    }

    #[test]
    fn failure_without_log_file_omits_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = live_ctx(temp.path());

        let (_, out) = capture_console(|| {
            Orchestrator::new(&ctx, quiet_renderer(), Box::new(NoPause))
                .with_log_file(None)
                .run(failing_plan())
        });

        assert!(out.contains("[ERROR] Failed: disk full\n"));
        assert!(!out.contains("Log file"));
    }

    #[test]
    fn failure_message_names_log_file() {
        let path = Path::new("C:/hes/install.log");
        assert_eq!(
            failure_message("Extraction failed.", Some(path)),
            "Extraction failed. Log file: C:/hes/install.log"
        );
        assert_eq!(failure_message("Extraction failed.", None), "Extraction failed.");
    }
}

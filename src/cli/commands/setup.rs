//! Install and uninstall commands.
//!
//! Both build a plan for the operation and hand it to the orchestrator
//! together with a renderer and the end-of-run pause.

use crate::error::Result;
use crate::runner::{installer_plan, uninstaller_plan, Orchestrator, Plan};
use crate::runtime::Operation;
use crate::ui::{acknowledger, format_duration, Renderer, TerminalEnv};

use super::dispatcher::{Command, CommandResult, Invocation};

/// The install/uninstall command implementation.
pub struct SetupCommand {
    invocation: Invocation,
}

impl SetupCommand {
    /// Create a new setup command.
    pub fn new(invocation: Invocation) -> Self {
        Self { invocation }
    }

    /// Build the plan for this invocation's operation.
    pub fn plan(&self) -> Plan {
        let inv = &self.invocation;
        match inv.operation {
            Operation::Uninstall => {
                uninstaller_plan(&inv.product, &inv.host, &inv.ctx, inv.relaunch_args.clone())
            }
            Operation::Install | Operation::Launch => {
                installer_plan(&inv.product, &inv.host, &inv.ctx, inv.relaunch_args.clone())
            }
        }
    }

    /// Whether the live display should draw frames.
    pub fn live_display(&self) -> bool {
        let explicit = if self.invocation.no_tui { Some(false) } else { None };
        TerminalEnv::detect(&self.invocation.env).live_display(explicit)
    }
}

impl Command for SetupCommand {
    fn execute(&self) -> Result<CommandResult> {
        let inv = &self.invocation;
        let plan = self.plan();

        let renderer =
            Renderer::new(plan.title.clone(), self.live_display()).with_console(inv.console.clone());

        tracing::debug!("Running {} with {} steps", inv.operation, plan.len());
        let report = Orchestrator::new(&inv.ctx, renderer, acknowledger(inv.no_pause))
            .with_log_file(inv.log_file.clone())
            .run(plan);
        tracing::debug!("Finished in {}", format_duration(report.duration));

        if report.success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(report.exit_code()))
        }
    }
}

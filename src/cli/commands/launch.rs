//! Launch command implementation.
//!
//! Starts the installed applications without the live display.

use crate::error::{InstallerError, Result};
use crate::runner::launch_installed;
use crate::shell::is_windows;

use super::dispatcher::{Command, CommandResult, Invocation};

/// The launch command implementation.
pub struct LaunchCommand {
    invocation: Invocation,
}

impl LaunchCommand {
    /// Create a new launch command.
    pub fn new(invocation: Invocation) -> Self {
        Self { invocation }
    }
}

impl Command for LaunchCommand {
    fn execute(&self) -> Result<CommandResult> {
        let inv = &self.invocation;

        if inv.ctx.is_dry_run() {
            tracing::info!("Dry run mode: no applications will be started.");
        } else if !is_windows() {
            let err = InstallerError::UnsupportedPlatform {
                operation: inv.operation.noun().to_string(),
            };
            tracing::error!("{}", err);
            return Ok(CommandResult::failure(1));
        }

        match launch_installed(&inv.product, &inv.ctx) {
            Ok(report) => {
                tracing::info!("Started {} application(s)", report.launched.len());
                Ok(CommandResult::success())
            }
            Err(InstallerError::StepFailed { message, .. }) => {
                tracing::error!("{}", message);
                Ok(CommandResult::failure(1))
            }
            Err(err) => Err(err),
        }
    }
}

//! Host platform precondition.

use crate::error::InstallerError;
use crate::runtime::{Operation, RuntimeContext};
use crate::shell;

use super::{Action, ActionResult};

/// Refuses to run anywhere but Windows, unless this is a dry run.
#[derive(Debug, Clone)]
pub struct CheckPlatform {
    operation: Operation,
    windows: bool,
}

impl CheckPlatform {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            windows: shell::is_windows(),
        }
    }

    /// Pretend to run on (or off) Windows.
    pub fn assume_windows(mut self, windows: bool) -> Self {
        self.windows = windows;
        self
    }
}

impl Action for CheckPlatform {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        if ctx.is_dry_run() {
            if !self.windows {
                tracing::info!(
                    "Dry run on {}: Windows check bypassed",
                    shell::os_name()
                );
            }
            return Ok(ActionResult::completed("Dry run"));
        }

        if !self.windows {
            let err = InstallerError::UnsupportedPlatform {
                operation: self.operation.noun().to_string(),
            };
            tracing::error!("{}", err);
            return Ok(ActionResult::failed(err.to_string()));
        }

        Ok(ActionResult::completed("OK"))
    }

    fn detail(&self, _ctx: &RuntimeContext) -> Option<String> {
        Some("Windows".to_string())
    }
}

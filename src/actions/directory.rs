//! Removing the install directory.

use anyhow::Context;

use crate::runtime::RuntimeContext;

use super::{Action, ActionResult};

/// Deletes the install directory recursively.
#[derive(Debug, Clone, Default)]
pub struct RemoveDirectory;

impl Action for RemoveDirectory {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        let dir = ctx.install_dir();
        if ctx.is_dry_run() {
            return Ok(super::dry_run(&format!(
                "directory removal for {}",
                dir.display()
            )));
        }

        if !dir.exists() {
            tracing::info!("{} does not exist", dir.display());
            return Ok(ActionResult::skipped("Already removed"));
        }

        std::fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to remove {}", dir.display()))?;
        tracing::info!("Removed directory: {}", dir.display());
        Ok(ActionResult::completed("OK"))
    }

    fn detail(&self, ctx: &RuntimeContext) -> Option<String> {
        Some(ctx.install_dir().display().to_string())
    }
}

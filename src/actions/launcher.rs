//! Copy the launcher into the install directory.

use anyhow::Context;

use crate::config::LauncherSpec;
use crate::runtime::RuntimeContext;

use super::{Action, ActionResult};

#[derive(Debug, Clone)]
pub struct CopyLauncher {
    spec: LauncherSpec,
}

impl CopyLauncher {
    pub fn new(spec: LauncherSpec) -> Self {
        Self { spec }
    }
}

impl Action for CopyLauncher {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        let source = ctx.asset_path(&self.spec.file);
        if !source.is_file() {
            tracing::warn!("{} not found: {}", self.spec.file, source.display());
            return Ok(ActionResult::skipped(format!("{} not found", self.spec.file)));
        }

        if ctx.is_dry_run() {
            return Ok(super::dry_run(&format!("copy of {}", self.spec.file)));
        }

        let destination = ctx.install_path(&self.spec.file);
        std::fs::create_dir_all(ctx.install_dir())
            .with_context(|| format!("Failed to create {}", ctx.install_dir().display()))?;
        std::fs::copy(&source, &destination).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                source.display(),
                destination.display()
            )
        })?;

        tracing::info!("Copied {} to installation directory", self.spec.file);
        Ok(ActionResult::completed("Copied"))
    }

    fn detail(&self, _ctx: &RuntimeContext) -> Option<String> {
        Some(self.spec.file.clone())
    }
}

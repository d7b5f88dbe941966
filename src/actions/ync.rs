//! Optional YNC Neo third-party installer.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::YncSpec;
use crate::runtime::RuntimeContext;
use crate::shell::{self, CommandOptions};

use super::{Action, ActionResult};

/// Runs the bundled YNC Neo installer when present and not yet installed.
#[derive(Debug, Clone)]
pub struct InstallYnc {
    spec: YncSpec,
}

impl InstallYnc {
    pub fn new(spec: YncSpec) -> Self {
        Self { spec }
    }

    fn is_installed(&self) -> bool {
        Path::new(&self.spec.executable).exists()
    }
}

/// First `<prefix>*.exe` in `dir`, by file name.
pub fn find_installer(dir: &Path, prefix: &str) -> anyhow::Result<Option<PathBuf>> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            name.starts_with(prefix) && name.to_ascii_lowercase().ends_with(".exe")
        })
        .collect();
    candidates.sort();
    Ok(candidates.into_iter().next())
}

impl Action for InstallYnc {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        let assets = ctx.asset_path(&self.spec.assets_folder);
        if !assets.is_dir() {
            tracing::info!("YNC Neo assets not found, skipping YNC Neo installation");
            return Ok(ActionResult::skipped("No YNC Neo assets"));
        }

        if self.is_installed() {
            tracing::info!("YNC Neo is already installed, skipping...");
            return Ok(ActionResult::skipped("Already installed"));
        }

        let Some(installer) = find_installer(&assets, &self.spec.installer_prefix)? else {
            tracing::info!("YNC Neo installer not found, skipping...");
            return Ok(ActionResult::skipped("Installer not found"));
        };

        if ctx.is_dry_run() {
            return Ok(super::dry_run(&format!(
                "YNC Neo installer {}",
                installer.display()
            )));
        }

        tracing::info!("Launching YNC Neo installer: {}", installer.display());
        let installer_arg = installer.to_string_lossy().into_owned();
        let options = CommandOptions {
            inherit_stdio: true,
            ..Default::default()
        };
        let args = ["/c", "start", "/wait", "", installer_arg.as_str()];
        let result = shell::execute("cmd", &args, &options)
            .context("Failed to start the YNC Neo installer")?;

        if !result.success {
            tracing::warn!("YNC Neo installer exited with code {:?}", result.exit_code);
            return Ok(ActionResult::completed(format!(
                "Installer exited with code {}",
                result.exit_code.unwrap_or(-1)
            )));
        }

        tracing::info!("YNC Neo installation completed");
        Ok(ActionResult::completed("Installed"))
    }
}

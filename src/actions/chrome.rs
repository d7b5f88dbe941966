//! Google Chrome through winget.

use anyhow::Context;

use crate::runtime::RuntimeContext;
use crate::shell;

use super::{Action, ActionResult};

const INSTALL_SCRIPT: &str = r#"$ErrorActionPreference = 'Stop'
$wingetPath = "$env:LOCALAPPDATA\Microsoft\WindowsApps\winget.exe"
if (!(Test-Path $wingetPath)) { $wingetPath = "winget" }
& $wingetPath install --id Google.Chrome -e --accept-package-agreements --accept-source-agreements --silent"#;

/// Installs Chrome. A non-zero exit usually means it is already there.
#[derive(Debug, Clone, Default)]
pub struct InstallChrome;

impl Action for InstallChrome {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        if ctx.is_dry_run() {
            return Ok(super::dry_run("Google Chrome installation"));
        }

        tracing::info!("Installing Google Chrome...");
        let result = shell::powershell(INSTALL_SCRIPT).context("Failed to run winget")?;

        if result.success {
            tracing::info!("Google Chrome installed successfully");
            return Ok(ActionResult::completed("Installed"));
        }

        tracing::warn!(
            "Chrome installation returned non-zero exit code (may already be installed): {}",
            result.output()
        );
        Ok(ActionResult::completed("may already be installed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::dry_run_ctx;

    #[test]
    fn dry_run_skips() {
        let temp = tempfile::TempDir::new().unwrap();
        assert_eq!(
            InstallChrome.run(&dry_run_ctx(temp.path())).unwrap(),
            ActionResult::skipped("Dry run")
        );
    }

    #[test]
    fn script_installs_silently() {
        assert!(INSTALL_SCRIPT.contains("--id Google.Chrome"));
        assert!(INSTALL_SCRIPT.contains("--silent"));
    }
}

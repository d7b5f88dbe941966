//! Windows package manager bootstrap.

use std::path::PathBuf;

use anyhow::{bail, Context};

use crate::runtime::RuntimeContext;
use crate::shell::{self, quote};

use super::{Action, ActionResult};

const WINGET_DOWNLOAD_URL: &str = "https://github.com/microsoft/winget-cli/releases/latest/download/Microsoft.DesktopAppInstaller_8wekyb3d8bbwe.msixbundle";

// The current process may not see winget on PATH right after installing it.
const INITIALIZE_SCRIPT: &str = r#"$wingetPath = "$env:LOCALAPPDATA\Microsoft\WindowsApps\winget.exe"
if (!(Test-Path $wingetPath)) { $wingetPath = "winget" }
& $wingetPath upgrade --id Microsoft.DesktopAppInstaller -s msstore -e 2>$null
& $wingetPath source reset 2>$null
& $wingetPath source update 2>$null"#;

/// Downloads and installs winget, then refreshes its sources.
#[derive(Debug, Clone)]
pub struct SetupWinget {
    temp_dir: PathBuf,
}

impl SetupWinget {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
        }
    }

    fn bundle_path(&self) -> PathBuf {
        self.temp_dir.join("winget_installer.msixbundle")
    }

    /// Script that downloads the bundle and registers it.
    pub fn install_script(&self) -> String {
        let bundle = quote(&self.bundle_path().to_string_lossy());
        format!(
            "$ErrorActionPreference = 'Stop'
$ProgressPreference = 'SilentlyContinue'
try {{
  Invoke-WebRequest -Uri '{url}' -OutFile {bundle}
  Add-AppxPackage -Path {bundle} -ForceApplicationShutdown -ForceUpdateFromAnyVersion 2>$null
  Remove-Item {bundle} -ErrorAction SilentlyContinue
}} catch {{
  Write-Host ('Error: ' + $_.Exception.Message)
  exit 1
}}",
            url = WINGET_DOWNLOAD_URL,
            bundle = bundle
        )
    }
}

impl Action for SetupWinget {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        if ctx.is_dry_run() {
            return Ok(super::dry_run("winget installation"));
        }

        tracing::info!("Installing winget...");
        let result = shell::powershell(&self.install_script()).context("Failed to run winget installer")?;
        if !result.success {
            bail!("winget installation failed: {}", result.diagnostics());
        }
        tracing::info!("winget installed successfully");

        tracing::info!("Initializing winget...");
        let result = shell::powershell(INITIALIZE_SCRIPT).context("Failed to initialize winget")?;
        if !result.success {
            tracing::warn!("winget initialization returned non-zero exit code (may be normal)");
        }

        Ok(ActionResult::completed("OK"))
    }
}

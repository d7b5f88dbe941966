//! Administrator privileges and elevated relaunch.

use std::path::PathBuf;

use anyhow::Context;

use crate::runtime::RuntimeContext;
use crate::shell::{self, quote};

use super::{Action, ActionResult};

const IS_ADMIN_SCRIPT: &str = "([Security.Principal.WindowsPrincipal][Security.Principal.WindowsIdentity]::GetCurrent()).IsInRole([Security.Principal.WindowsBuiltInRole]::Administrator)";

/// Message shown when the UAC prompt is dismissed.
pub const DECLINED: &str = "Administrator privileges were declined";

/// Makes sure the run has administrator rights.
///
/// When the process is not elevated it relaunches itself with the `RunAs`
/// verb, waits for the elevated copy, and reports
/// [`ActionResult::Delegated`].
#[derive(Debug, Clone)]
pub struct EnsureAdmin {
    exe_path: PathBuf,
    args: Vec<String>,
}

impl EnsureAdmin {
    /// `args` are forwarded to the elevated copy.
    pub fn new(exe_path: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            exe_path: exe_path.into(),
            args,
        }
    }

    /// Script that relaunches the executable elevated and waits for it.
    pub fn relaunch_script(&self) -> String {
        let mut command = format!(
            "Start-Process -FilePath {}",
            quote(&self.exe_path.to_string_lossy())
        );
        if !self.args.is_empty() {
            let args: Vec<String> = self.args.iter().map(|a| quote(a)).collect();
            command.push_str(&format!(" -ArgumentList @({})", args.join(", ")));
        }
        command.push_str(" -Verb RunAs -Wait");

        format!(
            "$ErrorActionPreference = 'Stop'\ntry {{\n  {}\n}} catch {{\n  Write-Host $_.Exception.Message\n  exit 1\n}}",
            command
        )
    }
}

fn is_admin() -> anyhow::Result<bool> {
    let result = shell::powershell(IS_ADMIN_SCRIPT).context("Failed to query administrator role")?;
    Ok(result.is_true())
}

impl Action for EnsureAdmin {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        if ctx.is_dry_run() {
            return Ok(super::dry_run("administrator elevation"));
        }

        if is_admin()? {
            tracing::info!("Running with administrator privileges.");
            return Ok(ActionResult::completed("OK"));
        }

        tracing::warn!("Not running as administrator. Requesting elevation...");
        let result = shell::powershell(&self.relaunch_script())
            .context("Failed to request administrator privileges")?;

        if !result.success {
            tracing::error!("Elevation failed: {}", result.diagnostics());
            return Ok(ActionResult::failed(DECLINED));
        }

        tracing::info!("Elevated {} finished", self.exe_path.display());
        Ok(ActionResult::Delegated(
            "Continued in elevated window".to_string(),
        ))
    }

    fn detail(&self, _ctx: &RuntimeContext) -> Option<String> {
        Some("Elevate if prompted".to_string())
    }
}

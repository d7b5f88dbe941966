//! Stopping running product processes.

use anyhow::Context;

use crate::runtime::RuntimeContext;
use crate::shell::{self, quote};

use super::{Action, ActionResult};

/// Stops each named process (name without `.exe`) that is running.
#[derive(Debug, Clone)]
pub struct StopProcesses {
    names: Vec<String>,
}

impl StopProcesses {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

/// Step detail for the processes that were stopped.
pub fn stopped_detail(stopped: &[String]) -> String {
    if stopped.is_empty() {
        "No processes running".to_string()
    } else {
        format!("Stopped: {}", stopped.join(", "))
    }
}

fn is_running(name: &str) -> anyhow::Result<bool> {
    let script = format!(
        "if (Get-Process -Name {} -ErrorAction SilentlyContinue) {{ Write-Host 'true' }} else {{ Write-Host 'false' }}",
        quote(name)
    );
    let result = shell::powershell(&script)
        .with_context(|| format!("Failed to query process {}", name))?;
    Ok(result.is_true())
}

fn kill(name: &str) -> anyhow::Result<()> {
    // Give the process a moment to release its files.
    let script = format!(
        "Stop-Process -Name {} -Force -ErrorAction SilentlyContinue\nStart-Sleep -Milliseconds 500",
        quote(name)
    );
    shell::powershell(&script).with_context(|| format!("Failed to stop process {}", name))?;
    tracing::info!("Stopped process: {}", name);
    Ok(())
}

impl Action for StopProcesses {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        if ctx.is_dry_run() {
            return Ok(super::dry_run(&format!(
                "process check for {}",
                self.names.join(", ")
            )));
        }

        let mut stopped = Vec::new();
        for name in &self.names {
            if is_running(name)? {
                tracing::info!("Process {} is running, stopping...", name);
                kill(name)?;
                stopped.push(name.clone());
            }
        }

        Ok(ActionResult::completed(stopped_detail(&stopped)))
    }

    fn detail(&self, _ctx: &RuntimeContext) -> Option<String> {
        Some("Checking processes".to_string())
    }
}

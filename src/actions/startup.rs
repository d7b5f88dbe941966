//! Windows startup registration under the current user's `Run` key.

use anyhow::Context;

use crate::config::StartupSpec;
use crate::runtime::RuntimeContext;
use crate::shell::{self, quote};

use super::{Action, ActionResult};

const RUN_KEY: &str = r"HKCU:\Software\Microsoft\Windows\CurrentVersion\Run";

/// Script that points the `Run` value `name` at `exe` (quoted).
pub fn register_script(name: &str, exe: &str) -> String {
    format!(
        "$ErrorActionPreference = 'Stop'
try {{
  Set-ItemProperty -Path {key} -Name {name} -Value {value}
}} catch {{
  Write-Host $_.Exception.Message
  exit 1
}}",
        key = quote(RUN_KEY),
        name = quote(name),
        value = quote(&format!("\"{}\"", exe))
    )
}

/// Script that removes the `Run` value `name`, ignoring absence.
pub fn unregister_script(name: &str) -> String {
    format!(
        "Remove-ItemProperty -Path {} -Name {} -ErrorAction SilentlyContinue",
        quote(RUN_KEY),
        quote(name)
    )
}

/// Registers the viewer to start with Windows.
#[derive(Debug, Clone)]
pub struct RegisterStartup {
    spec: StartupSpec,
}

impl RegisterStartup {
    pub fn new(spec: StartupSpec) -> Self {
        Self { spec }
    }
}

impl Action for RegisterStartup {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        let exe = ctx.install_path(&self.spec.target);
        if ctx.is_dry_run() {
            return Ok(super::dry_run(&format!(
                "startup registration of {}",
                exe.display()
            )));
        }

        if !exe.is_file() {
            tracing::warn!("{} not found: {}", self.spec.name, exe.display());
            return Ok(ActionResult::skipped(format!("{} not found", self.spec.name)));
        }

        tracing::info!("Registering {} to Windows startup...", self.spec.name);
        let script = register_script(&self.spec.name, &exe.to_string_lossy());
        let result = shell::powershell(&script).context("Failed to update the Run key")?;

        if !result.success {
            tracing::warn!(
                "Failed to register to startup: {} - {}",
                self.spec.name,
                result.diagnostics()
            );
            return Ok(ActionResult::skipped("Registration failed"));
        }

        tracing::info!("Registered to startup: {}", self.spec.name);
        Ok(ActionResult::completed("OK"))
    }

    fn detail(&self, _ctx: &RuntimeContext) -> Option<String> {
        Some(self.spec.name.clone())
    }
}

/// Removes the startup entry.
#[derive(Debug, Clone)]
pub struct UnregisterStartup {
    name: String,
}

impl UnregisterStartup {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Action for UnregisterStartup {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        if ctx.is_dry_run() {
            return Ok(super::dry_run(&format!("startup removal of {}", self.name)));
        }

        tracing::info!("Removing {} from Windows startup...", self.name);
        shell::powershell(&unregister_script(&self.name))
            .context("Failed to update the Run key")?;
        tracing::info!("Removed from startup: {}", self.name);
        Ok(ActionResult::completed("OK"))
    }

    fn detail(&self, _ctx: &RuntimeContext) -> Option<String> {
        Some(self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::dry_run_ctx;

    #[test]
    fn register_script_quotes_executable_path() {
        let script = register_script("ElectronViewer", r"C:\hes\ElectronViewer.exe");
        assert!(script.contains(r"-Path 'HKCU:\Software\Microsoft\Windows\CurrentVersion\Run'"));
        assert!(script.contains("-Name 'ElectronViewer'"));
        assert!(script.contains(r#"-Value '"C:\hes\ElectronViewer.exe"'"#));
    }

    #[test]
    fn unregister_script_ignores_missing_value() {
        let script = unregister_script("Bob's Viewer");
        assert!(script.contains("-Name 'Bob''s Viewer'"));
        assert!(script.contains("-ErrorAction SilentlyContinue"));
    }

    #[test]
    fn dry_run_skips_both() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = dry_run_ctx(temp.path());
        assert_eq!(
            RegisterStartup::new(StartupSpec::default()).run(&ctx).unwrap(),
            ActionResult::skipped("Dry run")
        );
        assert_eq!(
            UnregisterStartup::new("ElectronViewer").run(&ctx).unwrap(),
            ActionResult::skipped("Dry run")
        );
    }

    #[test]
    fn missing_executable_skips() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = crate::actions::test_support::live_ctx(temp.path());
        assert_eq!(
            RegisterStartup::new(StartupSpec::default()).run(&ctx).unwrap(),
            ActionResult::skipped("ElectronViewer not found")
        );
    }
}

//! Desktop shortcuts.

use std::path::PathBuf;

use anyhow::Context;

use crate::config::{LauncherSpec, ShortcutSpec, YncSpec};
use crate::runtime::RuntimeContext;
use crate::shell::{self, quote};

use super::{Action, ActionResult};

/// One shortcut to create, with its target resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutTarget {
    pub name: String,
    pub target: PathBuf,
    pub folder: bool,
}

/// Script that writes `<Desktop>\<name>.lnk` through `WScript.Shell`.
///
/// Executable targets get their parent directory as working directory.
pub fn create_script(shortcut: &ShortcutTarget) -> String {
    let working_dir = if shortcut.folder {
        String::new()
    } else {
        let dir = shortcut
            .target
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("\n  $shortcut.WorkingDirectory = {}", quote(&dir))
    };

    format!(
        "$ErrorActionPreference = 'Stop'
try {{
  $desktop = [Environment]::GetFolderPath('Desktop')
  $linkPath = Join-Path $desktop ({name} + '.lnk')
  $shell = New-Object -ComObject WScript.Shell
  $shortcut = $shell.CreateShortcut($linkPath)
  $shortcut.TargetPath = {target}{working_dir}
  $shortcut.Save()
}} catch {{
  Write-Host $_.Exception.Message
  exit 1
}}",
        name = quote(&shortcut.name),
        target = quote(&shortcut.target.to_string_lossy()),
        working_dir = working_dir
    )
}

/// Script that deletes `<Desktop>\<name>.lnk` if it exists.
pub fn remove_script(name: &str) -> String {
    format!(
        "$ErrorActionPreference = 'SilentlyContinue'
$desktop = [Environment]::GetFolderPath('Desktop')
$linkPath = Join-Path $desktop ({} + '.lnk')
if (Test-Path $linkPath) {{ Remove-Item $linkPath -Force }}",
        quote(name)
    )
}

/// Creates the product shortcuts, plus the launcher and YNC Neo when they
/// are installed.
#[derive(Debug, Clone)]
pub struct CreateShortcuts {
    shortcuts: Vec<ShortcutSpec>,
    launcher: LauncherSpec,
    ync: YncSpec,
}

impl CreateShortcuts {
    pub fn new(shortcuts: Vec<ShortcutSpec>, launcher: LauncherSpec, ync: YncSpec) -> Self {
        Self {
            shortcuts,
            launcher,
            ync,
        }
    }

    /// Every shortcut this run should attempt, in order.
    pub fn targets(&self, ctx: &RuntimeContext) -> Vec<ShortcutTarget> {
        let mut targets: Vec<ShortcutTarget> = self
            .shortcuts
            .iter()
            .map(|s| ShortcutTarget {
                name: s.name.clone(),
                target: ctx.install_path(&s.target),
                folder: s.folder,
            })
            .collect();

        let launcher = ctx.install_path(&self.launcher.file);
        if launcher.exists() {
            targets.push(ShortcutTarget {
                name: self.launcher.shortcut.clone(),
                target: launcher,
                folder: false,
            });
        }

        let ync = PathBuf::from(&self.ync.executable);
        if ync.exists() {
            targets.push(ShortcutTarget {
                name: self.ync.shortcut.clone(),
                target: ync,
                folder: false,
            });
        }

        targets
    }
}

fn create(shortcut: &ShortcutTarget) -> anyhow::Result<bool> {
    if shortcut.folder {
        std::fs::create_dir_all(&shortcut.target)
            .with_context(|| format!("Failed to create {}", shortcut.target.display()))?;
    }

    if !shortcut.target.exists() {
        tracing::warn!(
            "Target not found for shortcut \"{}\": {}",
            shortcut.name,
            shortcut.target.display()
        );
        return Ok(false);
    }

    let result = shell::powershell(&create_script(shortcut))
        .with_context(|| format!("Failed to create shortcut {}", shortcut.name))?;
    if !result.success {
        tracing::warn!(
            "Failed to create shortcut: {} - {}",
            shortcut.name,
            result.diagnostics()
        );
        return Ok(false);
    }

    tracing::info!("Shortcut created: {}", shortcut.name);
    Ok(true)
}

impl Action for CreateShortcuts {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        let targets = self.targets(ctx);

        if ctx.is_dry_run() {
            for shortcut in &targets {
                tracing::info!(
                    "Dry run: skipping shortcut \"{}\" -> {}",
                    shortcut.name,
                    shortcut.target.display()
                );
            }
            return Ok(ActionResult::skipped("Dry run"));
        }

        let mut created = 0;
        for shortcut in &targets {
            if create(shortcut)? {
                created += 1;
            }
        }

        Ok(ActionResult::completed(format!("{} shortcuts", created)))
    }
}

/// Deletes the product shortcuts from the desktop.
#[derive(Debug, Clone)]
pub struct RemoveShortcuts {
    names: Vec<String>,
}

impl RemoveShortcuts {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }
}

fn remove(name: &str) -> anyhow::Result<()> {
    shell::powershell(&remove_script(name))
        .with_context(|| format!("Failed to remove shortcut {}", name))?;
    tracing::info!("Removed shortcut: {}", name);
    Ok(())
}

impl Action for RemoveShortcuts {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        if ctx.is_dry_run() {
            for name in &self.names {
                tracing::info!("Dry run: skipping shortcut removal for \"{}\"", name);
            }
            return Ok(ActionResult::skipped("Dry run"));
        }

        for name in &self.names {
            remove(name)?;
        }
        Ok(ActionResult::completed(format!(
            "{} shortcuts",
            self.names.len()
        )))
    }
}

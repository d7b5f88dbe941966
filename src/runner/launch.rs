//! Starting the installed applications.

use std::path::PathBuf;

use crate::config::ProductConfig;
use crate::error::{InstallerError, Result};
use crate::runtime::RuntimeContext;
use crate::shell;

/// An application the launcher may start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchTarget {
    /// Name used in log lines.
    pub name: String,
    pub executable: PathBuf,
    /// Working directory, the executable's own folder.
    pub cwd: PathBuf,
    /// Optional targets are skipped quietly when missing.
    pub optional: bool,
}

impl LaunchTarget {
    fn new(name: String, executable: PathBuf, optional: bool) -> Self {
        let cwd = executable
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_default();
        Self {
            name,
            executable,
            cwd,
            optional,
        }
    }
}

/// What a launch did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchReport {
    pub launched: Vec<String>,
    pub missing: Vec<String>,
}

/// `bin/EARSCOPE_Viewer.exe` -> `EARSCOPE Viewer`.
pub fn display_name(relative: &str) -> String {
    let file = relative.rsplit(['/', '\\']).next().unwrap_or(relative);
    let stem = file
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file);
    stem.replace('_', " ")
}

/// Installed applications followed by the optional YNC Neo program.
pub fn launch_targets(product: &ProductConfig, ctx: &RuntimeContext) -> Vec<LaunchTarget> {
    let mut targets: Vec<LaunchTarget> = product
        .launch
        .iter()
        .map(|rel| LaunchTarget::new(display_name(rel), ctx.install_path(rel), false))
        .collect();

    if !product.ync.executable.is_empty() {
        targets.push(LaunchTarget::new(
            product.ync.shortcut.clone(),
            PathBuf::from(&product.ync.executable),
            true,
        ));
    }
    targets
}

/// Start every target that exists, detached from this process.
///
/// # Errors
///
/// Returns `StepFailed` when nothing could be launched. Individual spawn
/// failures are logged and counted as missing.
pub fn launch_installed(product: &ProductConfig, ctx: &RuntimeContext) -> Result<LaunchReport> {
    let mut report = LaunchReport::default();

    for target in launch_targets(product, ctx) {
        if !target.executable.exists() {
            if target.optional {
                tracing::info!("{} not found, skipping", target.name);
            } else {
                tracing::error!("{} not found: {}", target.name, target.executable.display());
            }
            report.missing.push(target.name);
            continue;
        }

        if ctx.is_dry_run() {
            tracing::info!("Dry run: would launch {}", target.executable.display());
            report.launched.push(target.name);
            continue;
        }

        match shell::spawn_detached(&target.executable, &target.cwd) {
            Ok(pid) => {
                tracing::info!("Launched {} (pid {})", target.name, pid);
                report.launched.push(target.name);
            }
            Err(err) => {
                tracing::error!("Failed to launch {}: {}", target.name, err);
                report.missing.push(target.name);
            }
        }
    }

    if report.launched.is_empty() {
        return Err(InstallerError::StepFailed {
            step: "launch".to_string(),
            message: "No applications found to launch.".to_string(),
        });
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::test_support::{dry_run_ctx, live_ctx};
    use std::fs;

    fn product_without_ync() -> ProductConfig {
        let mut product = ProductConfig::default();
        product.ync.executable = String::new();
        product
    }

    #[test]
    fn display_names_from_paths() {
        assert_eq!(display_name("bin/EARSCOPE_Viewer.exe"), "EARSCOPE Viewer");
        assert_eq!(
            display_name(r"ElectronViewer-win32-x64\ElectronViewer.exe"),
            "ElectronViewer"
        );
        assert_eq!(display_name("tool"), "tool");
    }

    #[test]
    fn targets_run_from_their_own_folder() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = live_ctx(temp.path());
        let targets = launch_targets(&ProductConfig::default(), &ctx);

        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].cwd, ctx.install_path("bin"));
        assert!(!targets[0].optional);
        assert!(targets[2].optional);
        assert_eq!(targets[2].name, "YNC Neo");
    }

    #[test]
    fn nothing_installed_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = dry_run_ctx(temp.path());
        let err = launch_installed(&product_without_ync(), &ctx).unwrap_err();
        assert!(err.to_string().contains("No applications found to launch"));
    }

    #[test]
    fn dry_run_only_logs() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = dry_run_ctx(temp.path());
        let viewer = ctx.install_path("bin/EARSCOPE_Viewer.exe");
        fs::create_dir_all(viewer.parent().unwrap()).unwrap();
        fs::write(&viewer, b"").unwrap();

        let report = launch_installed(&product_without_ync(), &ctx).unwrap();
        assert_eq!(report.launched, vec!["EARSCOPE Viewer".to_string()]);
        assert_eq!(report.missing, vec!["ElectronViewer".to_string()]);
    }
}

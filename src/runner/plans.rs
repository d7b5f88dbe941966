//! The step lists of the installer and the uninstaller.

use crate::actions::{
    CheckPlatform, CopyLauncher, CreateShortcuts, EnsureAdmin, ExtractArchives, InstallChrome,
    InstallYnc, RegisterStartup, RemoveDirectory, RemoveShortcuts, SetupWinget, StopProcesses,
    UnregisterStartup,
};
use crate::config::ProductConfig;
use crate::runtime::{HostPaths, Operation, RuntimeContext};

use super::orchestrator::Plan;

/// Note shown while a dry run is in progress.
pub const DRY_RUN_NOTE: &str = "Dry run mode: no changes will be made.";

fn base_plan(product: &ProductConfig, operation: Operation, ctx: &RuntimeContext) -> Plan {
    let plan = Plan::new(operation.title(&product.name), operation.activity());
    if ctx.is_dry_run() {
        plan.with_note(DRY_RUN_NOTE)
    } else {
        plan
    }
}

/// Steps that install the product.
///
/// `relaunch_args` are passed to the elevated copy when the run has to ask
/// for administrator rights.
pub fn installer_plan(
    product: &ProductConfig,
    host: &HostPaths,
    ctx: &RuntimeContext,
    relaunch_args: Vec<String>,
) -> Plan {
    base_plan(product, Operation::Install, ctx)
        .step(
            "check",
            "Check environment",
            CheckPlatform::new(Operation::Install),
        )
        .step(
            "admin",
            "Ensure admin privileges",
            EnsureAdmin::new(&host.exe_path, relaunch_args),
        )
        .step("winget", "Install winget", SetupWinget::new(&host.temp_dir))
        .step("chrome", "Install Google Chrome", InstallChrome)
        .step("ync", "Install YNC Neo", InstallYnc::new(product.ync.clone()))
        .step(
            "extract",
            "Extract application archives",
            ExtractArchives::new(product.archives.clone()),
        )
        .step(
            "launcher",
            "Copy launcher",
            CopyLauncher::new(product.launcher.clone()),
        )
        .step(
            "shortcuts",
            "Create desktop shortcuts",
            CreateShortcuts::new(
                product.shortcuts.clone(),
                product.launcher.clone(),
                product.ync.clone(),
            ),
        )
        .step(
            "startup",
            "Register startup entry",
            RegisterStartup::new(product.startup.clone()),
        )
}

/// Steps that remove the product.
pub fn uninstaller_plan(
    product: &ProductConfig,
    host: &HostPaths,
    ctx: &RuntimeContext,
    relaunch_args: Vec<String>,
) -> Plan {
    base_plan(product, Operation::Uninstall, ctx)
        .step(
            "check",
            "Check environment",
            CheckPlatform::new(Operation::Uninstall),
        )
        .step(
            "admin",
            "Ensure admin privileges",
            EnsureAdmin::new(&host.exe_path, relaunch_args),
        )
        .step(
            "stop",
            "Stop running processes",
            StopProcesses::new(product.stop_processes.clone()),
        )
        .step(
            "registry",
            "Remove registry entry",
            UnregisterStartup::new(product.startup.name.clone()),
        )
        .step(
            "shortcuts",
            "Remove desktop shortcuts",
            RemoveShortcuts::new(product.remove_shortcuts.clone()),
        )
        .step(
            "directory",
            "Remove installation directory",
            RemoveDirectory,
        )
}

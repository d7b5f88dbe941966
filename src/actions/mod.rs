//! Side-effecting step actions.
//!
//! Every step of a run is backed by one [`Action`]. An action performs a
//! blocking operation against the host (PowerShell script, file copy,
//! process start) and reports a uniform [`ActionResult`]. Actions must
//! honor [`RuntimeContext::is_dry_run`] by logging what they would do and
//! leaving the system untouched.
//!
//! # Example
//!
//! ```
//! use earscope::actions::{Action, ActionResult};
//! use earscope::runtime::RuntimeContext;
//!
//! let ctx = RuntimeContext::new(true, "/tmp/hes", "/tmp/install.log", "/tmp");
//! let action = |ctx: &RuntimeContext| -> anyhow::Result<ActionResult> {
//!     if ctx.is_dry_run() {
//!         return Ok(ActionResult::skipped("Dry run"));
//!     }
//!     Ok(ActionResult::completed("OK"))
//! };
//!
//! assert_eq!(action.run(&ctx).unwrap(), ActionResult::skipped("Dry run"));
//! ```

pub mod admin;
pub mod archive;
pub mod chrome;
pub mod directory;
pub mod launcher;
pub mod platform;
pub mod process;
pub mod shortcut;
pub mod startup;
pub mod winget;
pub mod ync;

use crate::runtime::RuntimeContext;

pub use admin::EnsureAdmin;
pub use archive::ExtractArchives;
pub use chrome::InstallChrome;
pub use directory::RemoveDirectory;
pub use launcher::CopyLauncher;
pub use platform::CheckPlatform;
pub use process::StopProcesses;
pub use shortcut::{CreateShortcuts, RemoveShortcuts};
pub use startup::{RegisterStartup, UnregisterStartup};
pub use winget::SetupWinget;
pub use ync::InstallYnc;

/// Outcome of one action invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// The action did its work. The detail is shown beside the step.
    Completed(Option<String>),

    /// Nothing to do (optional asset missing, already installed, dry run).
    Skipped(String),

    /// The action failed; the run stops here.
    Failed(String),

    /// The work was handed to another process (elevated relaunch). The step
    /// is skipped and the run ends successfully.
    Delegated(String),
}

impl ActionResult {
    pub fn completed(detail: impl Into<String>) -> Self {
        ActionResult::Completed(Some(detail.into()))
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        ActionResult::Skipped(reason.into())
    }

    pub fn failed(message: impl Into<String>) -> Self {
        ActionResult::Failed(message.into())
    }
}

/// A blocking, side-effecting operation behind one step.
///
/// Returning `Err` is treated like [`ActionResult::Failed`]; the error's
/// cause chain is written to the log.
pub trait Action {
    /// Run the action.
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult>;

    /// Detail shown as soon as the step becomes active.
    fn detail(&self, _ctx: &RuntimeContext) -> Option<String> {
        None
    }
}

impl<F> Action for F
where
    F: Fn(&RuntimeContext) -> anyhow::Result<ActionResult>,
{
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        self(ctx)
    }
}

/// Log a dry-run notice and return the matching skip.
pub(crate) fn dry_run(what: &str) -> ActionResult {
    tracing::info!("Dry run: skipping {}", what);
    ActionResult::skipped("Dry run")
}

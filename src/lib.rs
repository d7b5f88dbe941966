//! EARSCOPE setup suite - installer, uninstaller and launcher.
//!
//! A run is an ordered list of named steps. Each step is backed by an
//! [`actions::Action`] that performs one blocking operation against the
//! host; the [`runner::Orchestrator`] drives the steps through a
//! [`steps::StepRegistry`] state machine while a [`ui::Renderer`] repaints
//! a live progress display.
//!
//! # Modules
//!
//! - [`actions`] - Side-effecting step actions
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Product configuration
//! - [`error`] - Error types and result aliases
//! - [`logging`] - Log file and console logging
//! - [`runner`] - Plans, orchestration and the launcher
//! - [`runtime`] - Run context resolution
//! - [`shell`] - PowerShell and process execution
//! - [`steps`] - Step lifecycle state machine
//! - [`ui`] - Live progress display and end-of-run pause
//! - [`updates`] - Version information
//!
//! # Example
//!
//! ```
//! use earscope::actions::ActionResult;
//! use earscope::runner::{Orchestrator, Plan};
//! use earscope::runtime::RuntimeContext;
//! use earscope::ui::{NoPause, Renderer};
//!
//! let ctx = RuntimeContext::new(true, "/tmp/hes", "/tmp/install.log", "/tmp");
//! let plan = Plan::new("Demo Installer", "Installation").step(
//!     "hello",
//!     "Say hello",
//!     |_: &RuntimeContext| -> anyhow::Result<ActionResult> { Ok(ActionResult::completed("Hi")) },
//! );
//!
//! let report = Orchestrator::new(&ctx, Renderer::new("Demo Installer", false), Box::new(NoPause))
//!     .run(plan);
//! assert_eq!(report.exit_code(), 0);
//! ```

pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;
pub mod runtime;
pub mod shell;
pub mod steps;
pub mod ui;
pub mod updates;

pub use error::{InstallerError, Result};

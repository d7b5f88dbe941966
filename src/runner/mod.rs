//! Step execution orchestration.

pub mod launch;
pub mod orchestrator;
pub mod plans;

pub use launch::{launch_installed, launch_targets, LaunchReport, LaunchTarget};
pub use orchestrator::{Orchestrator, Plan, PlannedStep, RunOutcome, RunReport};
pub use plans::{installer_plan, uninstaller_plan, DRY_RUN_NOTE};

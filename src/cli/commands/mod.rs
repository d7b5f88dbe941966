//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary shipped as `installer.exe`, `uninstaller.exe` and `launcher.exe`
//! - Shared context resolution and logging setup

pub mod dispatcher;
pub mod launch;
pub mod setup;
pub mod version;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, Invocation};

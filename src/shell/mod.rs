//! External program execution and PowerShell plumbing.

pub mod command;
pub mod escape;
pub mod platform;

pub use command::{
    execute, powershell, spawn_detached, CommandOptions, CommandResult, POWERSHELL,
};
pub use escape::{escape_powershell_string, quote};
pub use platform::{is_windows, os_name};

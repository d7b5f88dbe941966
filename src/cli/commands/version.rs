//! The `version` command prints the suite version.

use crate::error::Result;
use crate::updates::VERSION;

use super::dispatcher::{Command, CommandResult};

/// `earscope <version>`.
pub fn version_line() -> String {
    format!("earscope {}", VERSION)
}

/// The version command implementation.
#[derive(Debug, Default)]
pub struct VersionCommand;

impl VersionCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for VersionCommand {
    fn execute(&self) -> Result<CommandResult> {
        println!("{}", version_line());
        Ok(CommandResult::success())
    }
}

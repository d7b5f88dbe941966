//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands
//! - [`Invocation`] for the resolved state an operation runs with

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::config::{load_product_config, ProductConfig};
use crate::error::Result;
use crate::logging::{self, ConsoleSwitch, LogSession};
use crate::runtime::{
    resolve_assets_dir, EnvSnapshot, HostPaths, Operation, RuntimeContext, RuntimeOptions,
};
use crate::shell::is_windows;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Everything an install, uninstall or launch runs with.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub operation: Operation,
    pub ctx: RuntimeContext,
    pub product: ProductConfig,
    pub host: HostPaths,
    pub env: EnvSnapshot,
    pub console: ConsoleSwitch,
    /// The log file this process appends to, if one was opened.
    pub log_file: Option<PathBuf>,
    /// Arguments handed to an elevated relaunch.
    pub relaunch_args: Vec<String>,
    pub no_pause: bool,
    pub no_tui: bool,
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    host: HostPaths,
    env: EnvSnapshot,
    args: Vec<String>,
    console: ConsoleSwitch,
}

impl CommandDispatcher {
    /// Create a dispatcher from host facts, the environment and the raw
    /// arguments (without the program name).
    pub fn new(host: HostPaths, env: EnvSnapshot, args: Vec<String>) -> Self {
        Self {
            host,
            env,
            args,
            console: ConsoleSwitch::new(),
        }
    }

    pub fn host(&self) -> &HostPaths {
        &self.host
    }

    /// The operation a CLI invocation selects, if any. Without a
    /// subcommand it comes from the executable name.
    pub fn operation(&self, cli: &Cli) -> Option<Operation> {
        match &cli.command {
            Some(Commands::Install) => Some(Operation::Install),
            Some(Commands::Uninstall) => Some(Operation::Uninstall),
            Some(Commands::Launch) => Some(Operation::Launch),
            Some(Commands::Version) => None,
            None => Some(Operation::from_executable(&self.host.exe_path)),
        }
    }

    /// Resolve configuration and context, and start logging.
    ///
    /// The log file is only used on Windows or during a dry run; elsewhere
    /// the fixed install location does not exist.
    pub fn prepare(&self, cli: &Cli, operation: Operation) -> Result<Invocation> {
        let options = RuntimeOptions::from_args(&cli.runtime, &self.env);
        let assets_dir = resolve_assets_dir(&self.host.exe_path, &options, &self.host.cwd);
        let product = load_product_config(&assets_dir)?;
        let ctx = RuntimeContext::from_options(&options, &self.host, &product, operation.log_name());

        let session = LogSession {
            log_file: (is_windows() || ctx.is_dry_run()).then(|| ctx.log_file().to_path_buf()),
            product: product.name.clone(),
            operation,
            debug: cli.debug,
        };
        let log_file = logging::init(&session, &self.console)?;
        tracing::debug!("Resolved context: {:?}", ctx);

        Ok(Invocation {
            operation,
            ctx,
            product,
            host: self.host.clone(),
            env: self.env.clone(),
            console: self.console.clone(),
            log_file,
            relaunch_args: self.args.clone(),
            no_pause: cli.no_pause,
            no_tui: cli.no_tui,
        })
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Version) => super::version::VersionCommand::new().execute(),
            _ => {
                let operation = self
                    .operation(cli)
                    .unwrap_or_else(|| Operation::from_executable(&self.host.exe_path));
                let invocation = self.prepare(cli, operation)?;
                match operation {
                    Operation::Launch => super::launch::LaunchCommand::new(invocation).execute(),
                    Operation::Install | Operation::Uninstall => {
                        super::setup::SetupCommand::new(invocation).execute()
                    }
                }
            }
        }
    }
}

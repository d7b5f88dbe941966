//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// EARSCOPE setup suite - install, launch and uninstall the viewer.
#[derive(Debug, Parser)]
#[command(name = "earscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub runtime: RuntimeArgs,

    /// Do not wait for a key press before exiting
    #[arg(long, global = true)]
    pub no_pause: bool,

    /// Disable the live progress display and print plain log lines
    #[arg(long, global = true)]
    pub no_tui: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Operation to run (inferred from the executable name when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Flags that feed runtime context resolution.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RuntimeArgs {
    /// Simulate every step without changing the system
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Same as --dry-run
    #[arg(long, global = true)]
    pub mock: bool,

    /// Directory containing the installer assets
    #[arg(long, global = true, value_name = "PATH")]
    pub assets_dir: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Install the product (default for `installer.exe`)
    Install,

    /// Remove the product (default for `uninstaller.exe`)
    Uninstall,

    /// Start the installed applications (default for `launcher.exe`)
    Launch,

    /// Print the suite version
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["installer"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.runtime.dry_run);
    }

    #[test]
    fn parses_subcommands() {
        let cli = Cli::try_parse_from(["earscope", "uninstall"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Uninstall)));

        let cli = Cli::try_parse_from(["earscope", "launch"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Launch)));
    }

    #[test]
    fn parses_global_flags() {
        let cli =
            Cli::try_parse_from(["earscope", "--no-pause", "--no-tui", "--debug", "install"])
                .unwrap();
        assert!(cli.no_pause);
        assert!(cli.no_tui);
        assert!(cli.debug);
    }

    #[test]
    fn completions_are_not_a_subcommand() {
        assert!(Cli::try_parse_from(["earscope", "completions", "bash"]).is_err());
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["earscope", "--nope"]).is_err());
    }
}

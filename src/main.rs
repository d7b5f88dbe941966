//! EARSCOPE setup suite entry point.

use std::process::ExitCode;

use clap::Parser;
use earscope::cli::{Cli, CommandDispatcher};
use earscope::runtime::{EnvSnapshot, HostPaths};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let host = match HostPaths::detect() {
        Ok(host) => host,
        Err(e) => {
            eprintln!("Error: failed to inspect the running process: {}", e);
            return ExitCode::from(1);
        }
    };

    // Forwarded unchanged to an elevated relaunch.
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let dispatcher = CommandDispatcher::new(host, EnvSnapshot::capture(), args);

    match dispatcher.dispatch(&cli) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

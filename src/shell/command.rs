//! External program execution.

use crate::error::{InstallerError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Program used to run PowerShell scripts.
pub const POWERSHELL: &str = "powershell";

/// Result of executing an external program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Trimmed stdout, the way scripts report a single value.
    pub fn output(&self) -> &str {
        self.stdout.trim()
    }

    /// Whether the script printed `true` (case-insensitive).
    pub fn is_true(&self) -> bool {
        self.output().eq_ignore_ascii_case("true")
    }

    /// Stderr if present, stdout otherwise. Used in failure messages.
    pub fn diagnostics(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.output()
        } else {
            stderr
        }
    }

    /// Turn a non-zero exit into [`InstallerError::CommandFailed`].
    pub fn into_checked(self, command: &str) -> Result<Self> {
        if self.success {
            return Ok(self);
        }
        Err(InstallerError::CommandFailed {
            command: command.to_string(),
            code: self.exit_code,
            stderr: self.diagnostics().to_string(),
        })
    }
}

/// Options for program execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Pass the console through to the child instead of capturing.
    pub inherit_stdio: bool,
}

/// Run a program to completion.
///
/// Failing to start the program is an error; a non-zero exit is reported
/// through [`CommandResult::success`].
pub fn execute<S: AsRef<str>>(
    program: &str,
    args: &[S],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args.iter().map(AsRef::as_ref));
    cmd.stdin(Stdio::null());

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    if options.inherit_stdio {
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());
    } else {
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
    }

    let output = cmd.output().map_err(|e| InstallerError::CommandFailed {
        command: program.to_string(),
        code: None,
        stderr: e.to_string(),
    })?;

    let duration = start.elapsed();
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    tracing::debug!(
        "{} exited with {:?} after {:?}",
        program,
        output.status.code(),
        duration
    );

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Run a PowerShell script with `-NoProfile -Command`, capturing output.
pub fn powershell(script: &str) -> Result<CommandResult> {
    execute(
        POWERSHELL,
        &["-NoProfile", "-Command", script],
        &CommandOptions::default(),
    )
}

/// Start a program without waiting for it, detached from our console.
///
/// The child runs in `cwd` with its output discarded.
pub fn spawn_detached(program: &Path, cwd: &Path) -> Result<u32> {
    let child = Command::new(program)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| InstallerError::CommandFailed {
            command: program.display().to_string(),
            code: None,
            stderr: e.to_string(),
        })?;
    Ok(child.id())
}

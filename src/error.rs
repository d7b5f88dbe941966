//! Error types for installer operations.
//!
//! This module defines [`InstallerError`], the primary error type used by
//! the setup suite, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `InstallerError` for failures the entry points report distinctly
//! - Actions return `anyhow::Result` so diagnostics carry a context chain
//! - Nothing escapes the orchestrator as an unhandled fault; failures become
//!   a failed step plus a closing status line

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The suite only runs on Windows outside of dry-run mode.
    #[error("This {operation} is only supported on Windows.")]
    UnsupportedPlatform { operation: String },

    /// Failed to read a product configuration file.
    #[error("Failed to read config at {path}: {message}")]
    ConfigRead { path: PathBuf, message: String },

    /// Failed to parse a product configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Invalid command-line arguments.
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// A PowerShell script or external program failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A step reported failure.
    #[error("Step '{step}' failed: {message}")]
    StepFailed { step: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, InstallerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_names_operation() {
        let err = InstallerError::UnsupportedPlatform {
            operation: "uninstaller".into(),
        };
        assert_eq!(
            err.to_string(),
            "This uninstaller is only supported on Windows."
        );
    }

    #[test]
    fn config_parse_displays_path_and_message() {
        let err = InstallerError::ConfigParse {
            path: PathBuf::from("/assets/installer.yml"),
            message: "unknown field `foo`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/assets/installer.yml"));
        assert!(msg.contains("unknown field"));
    }

    #[test]
    fn command_failed_displays_command_and_code() {
        let err = InstallerError::CommandFailed {
            command: "Expand-Archive".into(),
            code: Some(1),
            stderr: "access denied".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Expand-Archive"));
        assert!(msg.contains("1"));
    }

    #[test]
    fn step_failed_displays_step_and_message() {
        let err = InstallerError::StepFailed {
            step: "extract".into(),
            message: "disk full".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("extract"));
        assert!(msg.contains("disk full"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: InstallerError = io_err.into();
        assert!(matches!(err, InstallerError::Io(_)));
    }

    #[test]
    fn anyhow_error_is_transparent() {
        let err: InstallerError = anyhow::anyhow!("boom").into();
        assert_eq!(err.to_string(), "boom");
    }
}

//! The resolved, read-only context shared by every step.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::Cli;
use crate::config::ProductConfig;
use crate::error::{InstallerError, Result};

use super::env::EnvSnapshot;
use super::options::RuntimeOptions;
use super::paths::{join_relative, resolve_assets_dir, resolve_install_paths, HostPaths};

/// Resolved runtime configuration, fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeContext {
    dry_run: bool,
    install_dir: PathBuf,
    log_file: PathBuf,
    assets_dir: PathBuf,
}

impl RuntimeContext {
    /// Create a context from already resolved values.
    pub fn new(
        dry_run: bool,
        install_dir: impl Into<PathBuf>,
        log_file: impl Into<PathBuf>,
        assets_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            dry_run,
            install_dir: install_dir.into(),
            log_file: log_file.into(),
            assets_dir: assets_dir.into(),
        }
    }

    /// Resolve a context from options, host facts and the product layout.
    pub fn from_options(
        options: &RuntimeOptions,
        host: &HostPaths,
        product: &ProductConfig,
        log_name: &str,
    ) -> Self {
        let dry_run = options.is_dry_run();
        let assets_dir = resolve_assets_dir(&host.exe_path, options, &host.cwd);
        let paths = resolve_install_paths(dry_run, &host.temp_dir, product, log_name);

        Self {
            dry_run,
            install_dir: paths.install_dir,
            log_file: paths.log_file,
            assets_dir,
        }
    }

    /// Resolve a context straight from command-line arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArguments` if `argv` does not parse.
    pub fn resolve<I, T>(
        argv: I,
        env: &EnvSnapshot,
        host: &HostPaths,
        product: &ProductConfig,
        log_name: &str,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(argv).map_err(|e| InstallerError::InvalidArguments {
            message: e.to_string(),
        })?;
        let options = RuntimeOptions::from_args(&cli.runtime, env);
        Ok(Self::from_options(&options, host, product, log_name))
    }

    /// Whether actions must skip real side effects.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// A path inside the install directory, given `/`-separated.
    pub fn install_path(&self, relative: &str) -> PathBuf {
        join_relative(&self.install_dir, relative)
    }

    /// A path inside the assets directory, given `/`-separated.
    pub fn asset_path(&self, relative: &str) -> PathBuf {
        join_relative(&self.assets_dir, relative)
    }
}

//! Filesystem location resolution.

use std::path::{Path, PathBuf};

use crate::config::ProductConfig;

use super::options::RuntimeOptions;

/// Host facts consulted when resolving locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Path of the running executable.
    pub exe_path: PathBuf,
    /// System temporary directory.
    pub temp_dir: PathBuf,
}

impl HostPaths {
    /// Read the host facts from the running process.
    pub fn detect() -> std::io::Result<Self> {
        Ok(Self {
            cwd: std::env::current_dir()?,
            exe_path: std::env::current_exe()?,
            temp_dir: std::env::temp_dir(),
        })
    }
}

/// Install directory and log file for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    pub install_dir: PathBuf,
    pub log_file: PathBuf,
}

/// Root of the scratch tree used instead of the real install location
/// during a dry run: `<temp>/<slug>-installer-dry-run`.
pub fn dry_run_root(temp_dir: &Path, slug: &str) -> PathBuf {
    temp_dir.join(format!("{}-installer-dry-run", slug))
}

/// Resolve where the product is installed and where the run logs to.
///
/// In dry-run mode both live under [`dry_run_root`] so no real state is
/// touched. Otherwise the fixed product location is used and `temp_dir` is
/// ignored.
pub fn resolve_install_paths(
    dry_run: bool,
    temp_dir: &Path,
    product: &ProductConfig,
    log_name: &str,
) -> InstallPaths {
    if dry_run {
        let base = dry_run_root(temp_dir, &product.slug);
        return InstallPaths {
            install_dir: base.join(&product.dry_run_folder),
            log_file: base.join(log_name),
        };
    }

    InstallPaths {
        install_dir: PathBuf::from(&product.install_dir),
        log_file: windows_join(&product.install_dir, log_name),
    }
}

/// Resolve the directory holding the installer assets.
///
/// An explicit non-blank override wins; a dry run falls back to `cwd`;
/// otherwise the directory containing the executable is used.
pub fn resolve_assets_dir(exe_path: &Path, options: &RuntimeOptions, cwd: &Path) -> PathBuf {
    if let Some(dir) = options.assets_override() {
        return dir.clone();
    }
    if options.is_dry_run() {
        return cwd.to_path_buf();
    }
    exe_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cwd.to_path_buf())
}

/// Join a `/`-separated relative path onto a base directory.
pub fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |acc, part| acc.join(part))
}

/// Join with a backslash so fixed Windows locations render the same on
/// every host.
fn windows_join(dir: &str, name: &str) -> PathBuf {
    PathBuf::from(format!(r"{}\{}", dir.trim_end_matches('\\'), name))
}

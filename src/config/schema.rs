//! Product configuration schema.
//!
//! These structs map to the optional `installer.yml` shipped next to the
//! installer assets. Every field has a default that reproduces the stock
//! EARSCOPE layout, so an empty file is valid.

use serde::{Deserialize, Serialize};

/// Root product configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProductConfig {
    /// Display name used in titles and log banners.
    pub name: String,

    /// Lowercase identifier used for the dry-run scratch directory.
    pub slug: String,

    /// Fixed install location on the target machine.
    pub install_dir: String,

    /// Folder name that stands in for `install_dir` under the dry-run root.
    pub dry_run_folder: String,

    /// Archives extracted into the install directory, in order.
    pub archives: Vec<ArchiveSpec>,

    /// Launcher executable copied from the assets directory.
    pub launcher: LauncherSpec,

    /// Desktop shortcuts created after extraction.
    pub shortcuts: Vec<ShortcutSpec>,

    /// Program registered to start with Windows.
    pub startup: StartupSpec,

    /// Optional third-party YNC Neo installer.
    pub ync: YncSpec,

    /// Applications started by the launcher, relative to `install_dir`.
    pub launch: Vec<String>,

    /// Process names (without `.exe`) stopped before uninstalling.
    pub stop_processes: Vec<String>,

    /// Shortcut names removed from the desktop when uninstalling.
    pub remove_shortcuts: Vec<String>,
}

/// An archive bundled with the installer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveSpec {
    /// Path of the zip file, relative to the assets directory.
    pub source: String,

    /// File that must exist after extraction, relative to the install directory.
    pub expect: String,
}

/// The launcher executable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherSpec {
    /// File name in the assets directory, also used in the install directory.
    pub file: String,

    /// Desktop shortcut name for the copied launcher.
    pub shortcut: String,
}

/// A desktop shortcut to something inside the install directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShortcutSpec {
    /// Shortcut name on the desktop (without `.lnk`).
    pub name: String,

    /// Target path relative to the install directory.
    pub target: String,

    /// Whether the target is a folder, created if missing.
    #[serde(default)]
    pub folder: bool,
}

/// Windows startup registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StartupSpec {
    /// Value name under the `Run` registry key.
    pub name: String,

    /// Executable relative to the install directory.
    pub target: String,
}

/// YNC Neo third-party installer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct YncSpec {
    /// Folder in the assets directory holding the installer.
    pub assets_folder: String,

    /// File name prefix of the installer executable.
    pub installer_prefix: String,

    /// Absolute path of the installed program.
    pub executable: String,

    /// Desktop shortcut name for the installed program.
    pub shortcut: String,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            name: "EARSCOPE".to_string(),
            slug: "earscope".to_string(),
            install_dir: r"C:\hes".to_string(),
            dry_run_folder: "hes".to_string(),
            archives: vec![
                ArchiveSpec {
                    source: "win32-x64/bin.zip".to_string(),
                    expect: "bin/EARSCOPE_Viewer.exe".to_string(),
                },
                ArchiveSpec {
                    source: "win32-x64/ElectronViewer-win32-x64.zip".to_string(),
                    expect: "ElectronViewer-win32-x64/ElectronViewer.exe".to_string(),
                },
            ],
            launcher: LauncherSpec::default(),
            shortcuts: vec![
                ShortcutSpec {
                    name: "EARSCOPE Viewer".to_string(),
                    target: "bin/EARSCOPE_Viewer.exe".to_string(),
                    folder: false,
                },
                ShortcutSpec {
                    name: "EARSCOPE Recordings".to_string(),
                    target: "bin/data/recordings".to_string(),
                    folder: true,
                },
            ],
            startup: StartupSpec::default(),
            ync: YncSpec::default(),
            launch: vec![
                "bin/EARSCOPE_Viewer.exe".to_string(),
                "ElectronViewer-win32-x64/ElectronViewer.exe".to_string(),
            ],
            stop_processes: vec!["ElectronViewer".to_string(), "EARSCOPE_Viewer".to_string()],
            remove_shortcuts: vec![
                "EARSCOPE Viewer".to_string(),
                "EARSCOPE Recordings".to_string(),
                "EARSCOPE Captures".to_string(),
                "EARSCOPE Launcher".to_string(),
                "YNC Neo".to_string(),
            ],
        }
    }
}

impl Default for LauncherSpec {
    fn default() -> Self {
        Self {
            file: "launcher.exe".to_string(),
            shortcut: "EARSCOPE Launcher".to_string(),
        }
    }
}

impl Default for StartupSpec {
    fn default() -> Self {
        Self {
            name: "ElectronViewer".to_string(),
            target: "ElectronViewer-win32-x64/ElectronViewer.exe".to_string(),
        }
    }
}

impl Default for YncSpec {
    fn default() -> Self {
        Self {
            assets_folder: "ync".to_string(),
            installer_prefix: "YNCneo".to_string(),
            executable: r"C:\Program Files\YNC_Neo\YNC_Neo.exe".to_string(),
            shortcut: "YNC Neo".to_string(),
        }
    }
}

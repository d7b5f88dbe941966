//! Which program of the suite is running.

use std::path::Path;

/// The three programs shipped in the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Install,
    Uninstall,
    Launch,
}

impl Operation {
    /// Infer the operation from the executable name, so one binary can be
    /// shipped as `installer.exe`, `uninstaller.exe` and `launcher.exe`.
    pub fn from_executable(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        if stem.starts_with("uninstall") {
            Operation::Uninstall
        } else if stem.starts_with("launch") {
            Operation::Launch
        } else {
            Operation::Install
        }
    }

    /// Noun used in user-facing messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Operation::Install => "installer",
            Operation::Uninstall => "uninstaller",
            Operation::Launch => "launcher",
        }
    }

    /// Log file name for this operation.
    pub fn log_name(&self) -> &'static str {
        match self {
            Operation::Install => "install.log",
            Operation::Uninstall => "uninstall.log",
            Operation::Launch => "launch.log",
        }
    }

    /// Word used in the log banner and closing messages.
    pub fn activity(&self) -> &'static str {
        match self {
            Operation::Install => "Installation",
            Operation::Uninstall => "Uninstallation",
            Operation::Launch => "Launch",
        }
    }

    /// Window title for a product, e.g. `EARSCOPE Installer`.
    pub fn title(&self, product: &str) -> String {
        let noun = self.noun();
        let mut chars = noun.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        };
        format!("{} {}", product, capitalized)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.noun())
    }
}

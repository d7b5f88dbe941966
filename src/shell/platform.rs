//! Host platform checks.

/// Whether the suite is running on Windows.
pub fn is_windows() -> bool {
    cfg!(target_os = "windows")
}

/// Name of the host OS for log lines.
pub fn os_name() -> &'static str {
    std::env::consts::OS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_windows_matches_target() {
        assert_eq!(is_windows(), std::env::consts::OS == "windows");
    }

    #[test]
    fn os_name_not_empty() {
        assert!(!os_name().is_empty());
    }
}

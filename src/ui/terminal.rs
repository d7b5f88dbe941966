//! Deciding whether the live display can run.

use console::Term;

use crate::runtime::EnvSnapshot;

/// Disables the live display when set to `1` or `true`.
pub const NO_TUI_VAR: &str = "NO_TUI";

/// Facts about the output terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalEnv {
    /// Whether stdout is an interactive terminal.
    pub is_tty: bool,
    /// Value of `NO_TUI`.
    pub no_tui: Option<String>,
    /// Value of `TERM`.
    pub term: Option<String>,
}

impl TerminalEnv {
    /// Inspect the real stdout and the given environment.
    pub fn detect(env: &EnvSnapshot) -> Self {
        Self::from_env(Term::stdout().is_term(), env)
    }

    pub fn from_env(is_tty: bool, env: &EnvSnapshot) -> Self {
        Self {
            is_tty,
            no_tui: env.get(NO_TUI_VAR).map(str::to_string),
            term: env.get("TERM").map(str::to_string),
        }
    }

    /// Whether the live display should run absent an explicit choice.
    pub fn supports_live_display(&self) -> bool {
        let no_tui = self
            .no_tui
            .as_deref()
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let dumb = self
            .term
            .as_deref()
            .map(|t| t.eq_ignore_ascii_case("dumb"))
            .unwrap_or(false);

        self.is_tty && !no_tui && !dumb
    }

    /// An explicit choice wins over detection.
    pub fn live_display(&self, explicit: Option<bool>) -> bool {
        explicit.unwrap_or_else(|| self.supports_live_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
        EnvSnapshot::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn tty_enables_display() {
        let term = TerminalEnv::from_env(true, &env(&[("TERM", "xterm-256color")]));
        assert!(term.supports_live_display());
    }

    #[test]
    fn pipe_disables_display() {
        let term = TerminalEnv::from_env(false, &env(&[]));
        assert!(!term.supports_live_display());
    }

    #[test]
    fn no_tui_disables_display() {
        for value in ["1", "true", "TRUE"] {
            let term = TerminalEnv::from_env(true, &env(&[(NO_TUI_VAR, value)]));
            assert!(!term.supports_live_display(), "NO_TUI={}", value);
        }
        let term = TerminalEnv::from_env(true, &env(&[(NO_TUI_VAR, "0")]));
        assert!(term.supports_live_display());
    }

    #[test]
    fn dumb_terminal_disables_display() {
        let term = TerminalEnv::from_env(true, &env(&[("TERM", "dumb")]));
        assert!(!term.supports_live_display());
    }

    #[test]
    fn explicit_choice_overrides_detection() {
        let term = TerminalEnv::from_env(false, &env(&[]));
        assert!(term.live_display(Some(true)));

        let term = TerminalEnv::from_env(true, &env(&[]));
        assert!(!term.live_display(Some(false)));
        assert!(term.live_display(None));
    }
}

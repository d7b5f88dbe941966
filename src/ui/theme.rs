//! Status icon styling.

use console::Style;

use crate::steps::StepStatus;

/// Colors for the step status icons.
#[derive(Debug, Clone)]
pub struct StatusTheme {
    /// `[OK]` (green).
    pub done: Style,
    /// Spinner icon (cyan).
    pub active: Style,
    /// `[SKIP]` (yellow).
    pub skipped: Style,
    /// `[FAIL]` (red).
    pub failed: Style,
    /// `[..]` (dim grey).
    pub pending: Style,
}

impl Default for StatusTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusTheme {
    /// Colored theme. Styling is forced on: the renderer only picks this
    /// theme when it already decided to emit ANSI sequences.
    pub fn new() -> Self {
        Self {
            done: Style::new().green().force_styling(true),
            active: Style::new().cyan().force_styling(true),
            skipped: Style::new().yellow().force_styling(true),
            failed: Style::new().red().force_styling(true),
            pending: Style::new().black().bright().force_styling(true),
        }
    }

    /// Create a theme without colors.
    pub fn plain() -> Self {
        Self {
            done: Style::new(),
            active: Style::new(),
            skipped: Style::new(),
            failed: Style::new(),
            pending: Style::new(),
        }
    }

    /// Bracketed icon for a status. `spinner` is shown for active steps.
    pub fn icon(&self, status: StepStatus, spinner: &str) -> String {
        match status {
            StepStatus::Done => self.done.apply_to("[OK]").to_string(),
            StepStatus::Active => self.active.apply_to(format!("[{}]", spinner)).to_string(),
            StepStatus::Skipped => self.skipped.apply_to("[SKIP]").to_string(),
            StepStatus::Failed => self.failed.apply_to("[FAIL]").to_string(),
            StepStatus::Pending => self.pending.apply_to("[..]").to_string(),
        }
    }
}

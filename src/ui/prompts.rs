//! End-of-run acknowledgment.

use std::io::BufRead;

use console::Term;

use crate::error::Result;

/// Text shown when waiting for the user.
pub const EXIT_PROMPT: &str = "Press Enter to exit.";

/// Blocks until the user has seen the outcome of a run.
pub trait Acknowledger {
    /// Text appended to the closing message, if this waits at all.
    fn prompt(&self) -> Option<&str>;

    /// Wait for the user. With `show_prompt` the prompt is printed first;
    /// otherwise the caller already displayed it.
    fn wait(&mut self, show_prompt: bool) -> Result<()>;
}

/// Waits for a key press on the terminal, or a line on piped stdin.
pub struct TerminalAcknowledger {
    term: Term,
}

impl Default for TerminalAcknowledger {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalAcknowledger {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }
}

impl Acknowledger for TerminalAcknowledger {
    fn prompt(&self) -> Option<&str> {
        Some(EXIT_PROMPT)
    }

    fn wait(&mut self, show_prompt: bool) -> Result<()> {
        if show_prompt {
            self.term.write_line("")?;
            self.term.write_line(EXIT_PROMPT)?;
        }

        if self.term.is_term() {
            self.term.read_key()?;
        } else {
            // EOF returns immediately, so unattended runs never hang here.
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
        }
        Ok(())
    }
}

/// Returns immediately (`--no-pause`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl Acknowledger for NoPause {
    fn prompt(&self) -> Option<&str> {
        None
    }

    fn wait(&mut self, _show_prompt: bool) -> Result<()> {
        Ok(())
    }
}

/// Pick the acknowledger for the `--no-pause` flag.
pub fn acknowledger(no_pause: bool) -> Box<dyn Acknowledger> {
    if no_pause {
        Box::new(NoPause)
    } else {
        Box::new(TerminalAcknowledger::new())
    }
}

//! Terminal output for a run.
//!
//! This module provides:
//! - [`Renderer`] - the live progress display
//! - [`TerminalEnv`] - whether the display can run
//! - [`Acknowledger`] - the end-of-run pause
//! - frame formatting, icon styling and the spinner timer behind them
//!
//! # Example
//!
//! ```
//! use earscope::steps::{StepDef, StepRegistry};
//! use earscope::ui::Renderer;
//!
//! let mut registry = StepRegistry::new([StepDef::new("check", "Check environment")]);
//!
//! // A disabled renderer logs transitions instead of drawing frames.
//! let mut renderer = Renderer::new("EARSCOPE Installer", false);
//! renderer.start(registry.snapshot());
//! registry.set_active("check", None);
//! renderer.update(registry.snapshot());
//! renderer.finish(true, None);
//! ```

pub mod frame;
pub mod prompts;
pub mod renderer;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use frame::{format_duration, render_frame, BAR_WIDTH, SPINNER_FRAMES};
pub use prompts::{acknowledger, Acknowledger, NoPause, TerminalAcknowledger, EXIT_PROMPT};
pub use renderer::{catch_action_panic, install_cursor_restore_hook, Renderer};
pub use spinner::{SpinnerTicker, SPINNER_INTERVAL};
pub use terminal::{TerminalEnv, NO_TUI_VAR};
pub use theme::StatusTheme;

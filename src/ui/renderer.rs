//! Live progress display with differential repaint.
//!
//! The renderer keeps its own copy of the steps, pushed by the orchestrator
//! after every transition, and repaints the whole frame from the top-left
//! corner. A frame identical to the last one written is not written again,
//! so the spinner thread only causes output when something visible changed.
//!
//! Every step change is also logged as a `[n/N] label: status` line. With
//! the display disabled (no terminal, `NO_TUI`, `TERM=dumb`) that line is
//! all the console shows; with the display live it only reaches the log
//! file.

use std::cell::Cell;
use std::io::{self, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Once};
use std::time::{Duration, Instant};

use crate::logging::ConsoleSwitch;
use crate::steps::{RunSnapshot, Step, StepStatus};

use super::frame::render_frame;
use super::spinner::{SpinnerTicker, SPINNER_INTERVAL};
use super::theme::StatusTheme;

const HIDE_CURSOR: &str = "\x1b[?25l";
const SHOW_CURSOR: &str = "\x1b[?25h";
const CURSOR_HOME: &str = "\x1b[H";
const CLEAR_TO_END: &str = "\x1b[J";

static CURSOR_HIDDEN: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

thread_local! {
    // Set while an action runs under `catch_action_panic`.
    static CATCHING: Cell<bool> = const { Cell::new(false) };
}

/// Chain a panic hook that shows the cursor again before the default
/// report is printed. Installed once per process.
///
/// Panics raised inside [`catch_action_panic`] are logged instead and
/// leave the cursor to the renderer, which keeps drawing afterwards.
pub fn install_cursor_restore_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if CATCHING.with(|flag| flag.get()) {
                tracing::error!("{}", info);
                return;
            }
            if CURSOR_HIDDEN.swap(false, Ordering::SeqCst) {
                let mut out = io::stdout();
                let _ = out.write_all(SHOW_CURSOR.as_bytes());
                let _ = out.flush();
            }
            previous(info);
        }));
    });
}

/// Run `f`, catching a panic instead of unwinding further.
pub fn catch_action_panic<R>(f: impl FnOnce() -> R) -> std::thread::Result<R> {
    install_cursor_restore_hook();
    let outer = CATCHING.with(|flag| flag.replace(true));
    let result = catch_unwind(AssertUnwindSafe(f));
    CATCHING.with(|flag| flag.set(outer));
    result
}

struct RenderState {
    title: String,
    steps: Vec<Step>,
    status_line: Option<String>,
    started: Option<Instant>,
    spinner_frame: usize,
    finished: bool,
    last_frame: String,
    cursor_hidden: bool,
    ansi: bool,
    theme: StatusTheme,
    out: Box<dyn Write + Send>,
}

impl RenderState {
    fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            steps: self.steps.clone(),
            status_line: self.status_line.clone(),
            elapsed: self.started.map(|t| t.elapsed()).unwrap_or_default(),
            spinner_frame: self.spinner_frame,
        }
    }

    fn render(&mut self, force: bool) {
        let frame = render_frame(&self.title, &self.snapshot(), &self.theme);
        if !force && frame == self.last_frame {
            return;
        }

        let mut bytes = String::with_capacity(frame.len() + 16);
        if self.ansi {
            bytes.push_str(CURSOR_HOME);
        }
        bytes.push_str(&frame);
        bytes.push('\n');
        if self.ansi {
            bytes.push_str(CLEAR_TO_END);
        }
        self.write(&bytes);
        self.last_frame = frame;
    }

    fn tick(&mut self) {
        if self.finished || !self.snapshot().has_active() {
            return;
        }
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        self.render(false);
    }

    fn hide_cursor(&mut self) {
        if self.ansi && !self.cursor_hidden {
            self.write(HIDE_CURSOR);
            self.cursor_hidden = true;
            CURSOR_HIDDEN.store(true, Ordering::SeqCst);
        }
    }

    fn show_cursor(&mut self) {
        if self.cursor_hidden {
            self.write(SHOW_CURSOR);
            self.cursor_hidden = false;
            CURSOR_HIDDEN.store(false, Ordering::SeqCst);
        }
    }

    fn write(&mut self, text: &str) {
        self.out.write_all(text.as_bytes()).ok();
        self.out.flush().ok();
    }
}

/// Lock, recovering the state if a ticker panicked mid-render.
fn lock(state: &Mutex<RenderState>) -> MutexGuard<'_, RenderState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Terminal progress display for one run.
pub struct Renderer {
    state: Arc<Mutex<RenderState>>,
    ticker: Option<SpinnerTicker>,
    enabled: bool,
    interval: Duration,
    console: Option<ConsoleSwitch>,
}

impl Renderer {
    /// A renderer writing to stdout. `enabled` is the outcome of
    /// [`TerminalEnv::live_display`](super::TerminalEnv::live_display).
    pub fn new(title: impl Into<String>, enabled: bool) -> Self {
        Self::with_writer(title, enabled, Box::new(io::stdout()))
    }

    /// A renderer writing to any sink, with ANSI sequences when enabled.
    pub fn with_writer(title: impl Into<String>, enabled: bool, out: Box<dyn Write + Send>) -> Self {
        let theme = if enabled {
            StatusTheme::new()
        } else {
            StatusTheme::plain()
        };
        let state = RenderState {
            title: title.into(),
            steps: Vec::new(),
            status_line: None,
            started: None,
            spinner_frame: 0,
            finished: false,
            last_frame: String::new(),
            cursor_hidden: false,
            ansi: enabled,
            theme,
            out,
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            ticker: None,
            enabled,
            interval: SPINNER_INTERVAL,
            console: None,
        }
    }

    /// Switch console logging off while the display owns the screen.
    pub fn with_console(mut self, console: ConsoleSwitch) -> Self {
        self.console = Some(console);
        self
    }

    pub fn with_spinner_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Take over the screen and draw the first frame.
    pub fn start(&mut self, steps: Vec<Step>) {
        if !self.enabled {
            lock(&self.state).steps = steps;
            return;
        }

        if let Some(console) = &self.console {
            console.disable();
        }
        install_cursor_restore_hook();

        {
            let mut state = lock(&self.state);
            state.steps = steps;
            state.started = Some(Instant::now());
            state.hide_cursor();
            state.render(true);
        }

        let shared = Arc::clone(&self.state);
        self.ticker = Some(SpinnerTicker::start(self.interval, move || {
            lock(&shared).tick();
        }));
    }

    /// Replace the displayed steps.
    pub fn update(&mut self, steps: Vec<Step>) {
        let mut state = lock(&self.state);
        log_changes(&state.steps, &steps);
        state.steps = steps;
        if self.enabled {
            state.render(false);
        }
    }

    /// Show a free-text line under the steps.
    pub fn note(&mut self, message: &str) {
        if !self.enabled {
            tracing::info!("{}", message);
            return;
        }
        let mut state = lock(&self.state);
        state.status_line = Some(message.to_string());
        state.render(false);
    }

    /// Draw the final frame and hand the screen back.
    ///
    /// The status line reads `Completed: <message>` or `Failed: <message>`,
    /// or `Status: Completed` / `Status: Failed` without a message.
    pub fn finish(&mut self, success: bool, message: Option<&str>) {
        let status = if success { "Completed" } else { "Failed" };
        let line = match message {
            Some(message) => format!("{}: {}", status, message),
            None => format!("Status: {}", status),
        };

        if !self.enabled {
            if success {
                tracing::info!("{}", line);
            } else {
                tracing::error!("{}", line);
            }
            return;
        }

        lock(&self.state).finished = true;
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }

        {
            let mut state = lock(&self.state);
            state.status_line = Some(line);
            state.render(true);
            state.show_cursor();
        }

        if let Some(console) = &self.console {
            console.enable();
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
        lock(&self.state).show_cursor();
        if let Some(console) = &self.console {
            console.enable();
        }
    }
}

/// Log every step whose status or detail changed.
fn log_changes(before: &[Step], after: &[Step]) {
    for (index, step) in after.iter().enumerate() {
        if before.get(index) == Some(step) {
            continue;
        }
        let position = format!("[{}/{}]", index + 1, after.len());
        let detail = step
            .detail
            .as_deref()
            .map(|d| format!(" - {}", d))
            .unwrap_or_default();
        match step.status {
            StepStatus::Failed => {
                tracing::error!("{} {}: {}{}", position, step.label, step.status, detail)
            }
            StepStatus::Pending => {}
            _ => tracing::info!("{} {}: {}{}", position, step.label, step.status, detail),
        }
    }
}

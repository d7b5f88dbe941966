//! Log file and console logging.
//!
//! Every run appends to a persistent log file (one banner line per run,
//! then one timestamped line per event) and echoes `[LEVEL] message` lines
//! to the console. The live progress display owns the screen while it
//! runs, so the console layer is gated by a [`ConsoleSwitch`] it can turn
//! off.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Local};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::writer::MakeWriter;
use tracing_subscriber::fmt::{self as fmt_layer, FmtContext};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer};

use crate::runtime::Operation;

/// Shared on/off flag for console log output.
#[derive(Debug, Clone)]
pub struct ConsoleSwitch(Arc<AtomicBool>);

impl Default for ConsoleSwitch {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleSwitch {
    /// A switch that starts on.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn enable(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a run logs and where.
#[derive(Debug, Clone)]
pub struct LogSession {
    /// Log file to append to. `None` logs to the console only.
    pub log_file: Option<PathBuf>,
    /// Product name for the banner.
    pub product: String,
    pub operation: Operation,
    /// Force debug level regardless of `RUST_LOG`.
    pub debug: bool,
}

/// First line written to the log file for each run.
pub fn banner(product: &str, operation: Operation, at: DateTime<Local>) -> String {
    format!(
        "===== {} {} Started at {} =====",
        product,
        operation.activity(),
        at.format("%Y-%m-%d %H:%M:%S")
    )
}

/// Filter from `--debug`, then `RUST_LOG`, then `earscope=info`.
pub fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new("earscope=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("earscope=info"))
    }
}

/// Opens the log file in append mode for every event, so the file is never
/// held open between writes.
#[derive(Debug, Clone)]
pub struct AppendFile {
    path: PathBuf,
}

impl AppendFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn open(&self) -> io::Result<std::fs::File> {
        OpenOptions::new().create(true).append(true).open(&self.path)
    }
}

impl<'a> MakeWriter<'a> for AppendFile {
    type Writer = Box<dyn Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        match self.open() {
            Ok(file) => Box::new(file),
            // The directory may be gone, e.g. after uninstalling.
            Err(_) => Box::new(io::sink()),
        }
    }
}

/// `[LEVEL] message`, matching what the log file shows after the timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        use std::fmt::Write as _;

        write!(writer, "[{}] ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Console layer writing to `writer` while `switch` is on.
pub fn console_layer<S, W>(switch: ConsoleSwitch, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt_layer::layer()
        .event_format(ConsoleFormat)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter_fn(move |_| switch.is_enabled()))
}

/// File layer with UTC timestamps and no color codes.
pub fn file_layer<S>(path: &Path) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt_layer::layer()
        .with_timer(fmt_layer::time::ChronoUtc::new(
            "%Y-%m-%dT%H:%M:%S%.3fZ".to_string(),
        ))
        .with_target(false)
        .with_ansi(false)
        .with_writer(AppendFile::new(path))
}

/// Create the log directory and append the run banner.
pub fn open_log(path: &Path, product: &str, operation: Operation) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut file = AppendFile::new(path)
        .open()
        .with_context(|| format!("Failed to open {}", path.display()))?;
    writeln!(file, "{}", banner(product, operation, Local::now()))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Install the global subscriber for a run.
///
/// Returns the log file in use, or `None` when logging to the console only
/// (no file requested, or it could not be opened).
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(session: &LogSession, switch: &ConsoleSwitch) -> anyhow::Result<Option<PathBuf>> {
    let mut open_error = None;
    let log_file = match &session.log_file {
        Some(path) => match open_log(path, &session.product, session.operation) {
            Ok(()) => Some(path.clone()),
            Err(err) => {
                open_error = Some(format!("{:#}", err));
                None
            }
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter(session.debug))
        .with(console_layer(switch.clone(), io::stdout))
        .with(log_file.as_deref().map(file_layer))
        .try_init()
        .context("Failed to install the log subscriber")?;

    if let Some(err) = open_error {
        tracing::warn!("Logging to console only: {}", err);
    }
    if let Some(path) = &log_file {
        tracing::debug!("Logging to {}", path.display());
    }
    Ok(log_file)
}


#[cfg(test)]
mod tests {
    use super::test_support::Buffer;
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn banner_names_product_and_activity() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(
            banner("EARSCOPE", Operation::Uninstall, at),
            "===== EARSCOPE Uninstallation Started at 2024-03-09 14:05:07 ====="
        );
    }

    #[test]
    fn console_switch_is_shared() {
        let switch = ConsoleSwitch::new();
        let clone = switch.clone();
        assert!(clone.is_enabled());
        switch.disable();
        assert!(!clone.is_enabled());
        clone.enable();
        assert!(switch.is_enabled());
    }

    #[test]
    fn console_layer_formats_and_respects_switch() {
        let switch = ConsoleSwitch::new();
        let buffer = Buffer::default();
        let subscriber =
            tracing_subscriber::registry().with(console_layer(switch.clone(), buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("visible line");
            switch.disable();
            tracing::warn!("hidden line");
            switch.enable();
            tracing::error!("back again");
        });

        let out = buffer.contents();
        assert!(out.contains("[INFO] visible line\n"));
        assert!(!out.contains("hidden line"));
        assert!(out.contains("[ERROR] back again\n"));
    }

    #[test]
    fn file_layer_appends_timestamped_lines() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("logs/install.log");
        open_log(&path, "EARSCOPE", Operation::Install).unwrap();

        let subscriber = tracing_subscriber::registry().with(file_layer(&path));
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Extracting bin.zip");
            tracing::warn!("launcher.exe not found");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("===== EARSCOPE Installation Started at "));
        assert!(lines[1].contains("INFO"));
        assert!(lines[1].ends_with("Extracting bin.zip"));
        assert!(lines[2].contains("WARN"));
        assert!(!content.contains('\x1b'));
    }

    #[test]
    fn open_log_appends_across_runs() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("install.log");
        open_log(&path, "EARSCOPE", Operation::Install).unwrap();
        open_log(&path, "EARSCOPE", Operation::Install).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("===== EARSCOPE Installation Started").count(), 2);
    }

    #[test]
    fn append_file_survives_missing_directory() {
        let temp = tempfile::TempDir::new().unwrap();
        let writer = AppendFile::new(temp.path().join("gone/install.log"));
        let mut sink = writer.make_writer();
        assert!(sink.write_all(b"dropped").is_ok());
    }
}

//! Frame layout for the live progress display.
//!
//! ```text
//! EARSCOPE Installer
//! Progress: [============------------] 50% (6/12) Elapsed: 01:05
//!
//! 01. [OK] Check environment - OK
//! 02. [|] Install winget
//! 03. [..] Install Google Chrome
//!
//! Dry run mode: no changes will be made.
//! ```

use std::time::Duration;

use crate::steps::{RunSnapshot, Step};

use super::theme::StatusTheme;

/// Width of the progress bar in characters.
pub const BAR_WIDTH: usize = 24;

/// Spinner animation frames.
pub const SPINNER_FRAMES: [&str; 4] = ["-", "\\", "|", "/"];

/// `mm:ss`, or `hh:mm:ss` from one hour on.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Spinner glyph for a frame index.
pub fn spinner_frame(index: usize) -> &'static str {
    SPINNER_FRAMES[index % SPINNER_FRAMES.len()]
}

pub fn progress_line(snapshot: &RunSnapshot) -> String {
    let progress = snapshot.progress();
    let filled = progress.filled(BAR_WIDTH);
    format!(
        "Progress: [{}{}] {}% ({}/{}) Elapsed: {}",
        "=".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.percent(),
        progress.completed,
        progress.total,
        format_duration(snapshot.elapsed)
    )
}

/// `NN. <icon> <label>[ - <detail>]`, numbered from 1.
pub fn step_line(step: &Step, index: usize, theme: &StatusTheme, spinner: &str) -> String {
    let line = format!(
        "{:02}. {} {}",
        index + 1,
        theme.icon(step.status, spinner),
        step.label
    );
    match &step.detail {
        Some(detail) => format!("{} - {}", line, detail),
        None => line,
    }
}

/// The whole frame, lines joined with `\n`, without a trailing newline.
pub fn render_frame(title: &str, snapshot: &RunSnapshot, theme: &StatusTheme) -> String {
    let spinner = spinner_frame(snapshot.spinner_frame);
    let mut lines = vec![title.to_string(), progress_line(snapshot), String::new()];

    lines.extend(
        snapshot
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| step_line(step, i, theme, spinner)),
    );

    if let Some(status) = &snapshot.status_line {
        lines.push(String::new());
        lines.push(status.clone());
    }

    lines.join("\n")
}

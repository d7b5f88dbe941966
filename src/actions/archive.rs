//! Application archive extraction.

use std::path::Path;

use anyhow::Context;

use crate::config::ArchiveSpec;
use crate::runtime::RuntimeContext;
use crate::shell::{self, quote};

use super::{Action, ActionResult};

/// Extracts each bundled zip into the install directory and checks that
/// the expected executable appeared.
///
/// The zips carry their own top-level folder, so they are expanded straight
/// into the install directory.
#[derive(Debug, Clone)]
pub struct ExtractArchives {
    archives: Vec<ArchiveSpec>,
}

impl ExtractArchives {
    pub fn new(archives: Vec<ArchiveSpec>) -> Self {
        Self { archives }
    }
}

/// `Expand-Archive` script for one zip.
pub fn expand_script(source: &Path, destination: &Path) -> String {
    format!(
        "$ErrorActionPreference = 'Stop'\nExpand-Archive -Path {} -DestinationPath {} -Force",
        quote(&source.to_string_lossy()),
        quote(&destination.to_string_lossy())
    )
}

fn unzip(source: &Path, destination: &Path) -> anyhow::Result<()> {
    tracing::info!(
        "Extracting {} to {}...",
        source.display(),
        destination.display()
    );
    std::fs::create_dir_all(destination)
        .with_context(|| format!("Failed to create {}", destination.display()))?;

    shell::powershell(&expand_script(source, destination))?
        .into_checked("Expand-Archive")
        .with_context(|| format!("Failed to extract {}", source.display()))?;

    tracing::info!("Extracted {} successfully", source.display());
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl Action for ExtractArchives {
    fn run(&self, ctx: &RuntimeContext) -> anyhow::Result<ActionResult> {
        let mut found = 0;

        for archive in &self.archives {
            let source = ctx.asset_path(&archive.source);
            if !source.is_file() {
                tracing::warn!("{} not found: {}", file_name(&source), source.display());
                continue;
            }
            found += 1;

            if ctx.is_dry_run() {
                tracing::info!("Dry run: skipping extraction of {}", source.display());
                continue;
            }

            unzip(&source, ctx.install_dir())?;

            let expected = ctx.install_path(&archive.expect);
            if !expected.exists() {
                tracing::error!("Expected file missing after extraction: {}", expected.display());
                return Ok(ActionResult::failed(format!(
                    "{} not found after extraction",
                    file_name(&expected)
                )));
            }
        }

        if found == 0 {
            return Ok(ActionResult::skipped("No archives found"));
        }
        if ctx.is_dry_run() {
            return Ok(ActionResult::skipped("Dry run"));
        }
        Ok(ActionResult::completed(format!(
            "{} of {} archives",
            found,
            self.archives.len()
        )))
    }

    fn detail(&self, _ctx: &RuntimeContext) -> Option<String> {
        Some(format!("{} archives", self.archives.len()))
    }
}

//! Product configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ProductConfig;
use crate::error::{InstallerError, Result};

/// File name looked up in the assets directory.
pub const CONFIG_FILE: &str = "installer.yml";

/// Path where a product configuration override would live.
pub fn config_path(assets_dir: &Path) -> PathBuf {
    assets_dir.join(CONFIG_FILE)
}

/// Load the product configuration for an assets directory.
///
/// Falls back to [`ProductConfig::default`] when no `installer.yml` exists.
///
/// # Errors
///
/// Returns `ConfigRead` if the file exists but cannot be read.
/// Returns `ConfigParse` if the YAML is invalid or has unknown fields.
pub fn load_product_config(assets_dir: &Path) -> Result<ProductConfig> {
    let path = config_path(assets_dir);
    if !path.is_file() {
        tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, assets_dir.display());
        return Ok(ProductConfig::default());
    }

    let content = fs::read_to_string(&path).map_err(|e| InstallerError::ConfigRead {
        path: path.clone(),
        message: e.to_string(),
    })?;

    parse_product_config(&content, &path)
}

/// Parse YAML content into a [`ProductConfig`].
pub fn parse_product_config(content: &str, source_path: &Path) -> Result<ProductConfig> {
    if content.trim().is_empty() {
        return Ok(ProductConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| InstallerError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

//! Product configuration.
//!
//! The suite ships with built-in defaults for the EARSCOPE product. An
//! `installer.yml` placed in the assets directory can override any field:
//!
//! ```
//! use earscope::config::{parse_product_config, ProductConfig};
//! use std::path::Path;
//!
//! let config = parse_product_config("name: Demo\n", Path::new("installer.yml")).unwrap();
//! assert_eq!(config.name, "Demo");
//! assert_eq!(config.install_dir, ProductConfig::default().install_dir);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{config_path, load_product_config, parse_product_config, CONFIG_FILE};
pub use schema::{ArchiveSpec, LauncherSpec, ProductConfig, ShortcutSpec, StartupSpec, YncSpec};

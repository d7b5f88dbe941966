//! Runtime context resolution.
//!
//! Decides whether a run is real or simulated and where it reads assets,
//! installs files and writes its log. Everything here is a pure function of
//! explicit inputs: arguments, an [`EnvSnapshot`] and [`HostPaths`].
//!
//! # Example
//!
//! ```
//! use earscope::config::ProductConfig;
//! use earscope::runtime::{EnvSnapshot, HostPaths, RuntimeContext};
//! use std::path::PathBuf;
//!
//! let host = HostPaths {
//!     cwd: PathBuf::from("/work"),
//!     exe_path: PathBuf::from("/dist/installer"),
//!     temp_dir: PathBuf::from("/tmp"),
//! };
//! let env = EnvSnapshot::from_pairs([("DRY_RUN", "1")]);
//! let ctx = RuntimeContext::resolve(
//!     ["installer"],
//!     &env,
//!     &host,
//!     &ProductConfig::default(),
//!     "install.log",
//! )
//! .unwrap();
//! assert!(ctx.is_dry_run());
//! ```

pub mod context;
pub mod env;
pub mod operation;
pub mod options;
pub mod paths;

pub use context::RuntimeContext;
pub use env::{is_truthy, EnvSnapshot, DRY_RUN_VAR};
pub use operation::Operation;
pub use options::RuntimeOptions;
pub use paths::{
    dry_run_root, join_relative, resolve_assets_dir, resolve_install_paths, HostPaths,
    InstallPaths,
};

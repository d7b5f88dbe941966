//! Version information.

pub mod version;

pub use version::{compare_versions, parse_version, VERSION};

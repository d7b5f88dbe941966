//! Suite version and version comparison.

use std::cmp::Ordering;

/// Current version of the suite.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Split a dotted version into numeric components.
///
/// A leading `v` is ignored and components that are not numbers count as 0.
pub fn parse_version(version: &str) -> Vec<u64> {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed);

    trimmed
        .split('.')
        .map(|part| part.trim().parse().unwrap_or(0))
        .collect()
}

/// Three-way comparison of dotted versions. Missing components are 0, so
/// `1.0` equals `1.0.0`.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = parse_version(a);
    let b = parse_version(b);
    let len = a.len().max(b.len());

    for i in 0..len {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

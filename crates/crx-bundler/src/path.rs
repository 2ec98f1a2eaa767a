//! POSIX-style path normalization.
//!
//! Entry paths are compared as strings, so every path that takes part in a
//! comparison goes through [`normalize_path`] first. The result is the same on
//! every host OS.

use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Replace every backslash with a forward slash.
pub fn slash(path: &str) -> String {
    path.replace('\\', "/")
}

/// Canonicalize `path` to a forward-slash string.
///
/// Collapses repeated separators, drops `.` segments and resolves `..`
/// against the preceding segment. A `..` that climbs above a relative path is
/// kept; one that climbs above `/` is dropped. A trailing slash survives, and
/// an empty path becomes `.`. No filesystem access.
///
/// ```
/// use crx_bundler::normalize_path;
///
/// assert_eq!(normalize_path("src\\background\\index.ts"), "src/background/index.ts");
/// assert_eq!(normalize_path("./a//b/../c.ts"), "a/c.ts");
/// assert_eq!(normalize_path("/../x"), "/x");
/// ```
pub fn normalize_path(path: impl AsRef<Path>) -> String {
    let raw = slash(&path.as_ref().to_string_lossy());
    let mut normalized = slash(&PathBuf::from(&raw).clean().to_string_lossy());
    if raw.ends_with('/') && !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}

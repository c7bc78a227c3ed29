//! Collision-free file naming inside the download directory.

use std::path::{Path, PathBuf};

/// Splits `name` into (stem, extension) where the extension starts at the last
/// `.`; leading dots belong to the stem, so `.js` has no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

/// First path in `dir` that does not exist yet: `name`, then `stem_1.ext`, `stem_2.ext`, ...
///
/// Check-then-write; only safe while a single process writes the directory.
pub fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = split_extension(name);
    let mut counter = 1u32;
    loop {
        let candidate = dir.join(format!("{stem}_{counter}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

//! Directory scans over downloaded scripts.
//!
//! Every scan is a full walk of the directory; nothing is cached between
//! calls, so the result always reflects what is on disk right now.

use crate::normalize::normalize_path;
use crate::patterns::{MatchSet, PatternTable};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Matches from one directory scan plus file counts.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub matches: MatchSet,
    /// `.js` files found.
    pub files_total: usize,
    /// `.js` files read successfully.
    pub files_processed: usize,
}

/// Visits every `*.js` file under `dir` (sorted by name) with its bare file
/// name and lossily decoded content. Returns (total, processed).
fn for_each_script<F>(dir: &Path, mut visit: F) -> (usize, usize)
where
    F: FnMut(&str, &str),
{
    let mut total = 0;
    let mut processed = 0;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("cannot walk {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".js") {
            continue;
        }
        total += 1;
        match fs::read(entry.path()) {
            Ok(bytes) => {
                processed += 1;
                visit(&name, &String::from_utf8_lossy(&bytes));
            }
            Err(e) => tracing::warn!("cannot read {}: {}", entry.path().display(), e),
        }
    }
    (total, processed)
}

/// Runs `table` over every script under `dir`. When `with_filenames` is set,
/// records carry the file name they came from.
pub fn scan_directory(dir: &Path, table: &PatternTable, with_filenames: bool) -> ScanOutcome {
    let mut matches = table.empty_matches();
    let (files_total, files_processed) = for_each_script(dir, |name, text| {
        let file = with_filenames.then_some(name);
        table.extract_into(text, file, &mut matches);
    });
    tracing::info!(
        "scanned {}: {}/{} files, {} matches",
        dir.display(),
        files_processed,
        files_total,
        matches.total_records()
    );
    ScanOutcome {
        matches,
        files_total,
        files_processed,
    }
}

/// Normalized set of every value `table` finds under `dir`.
pub fn collect_paths(dir: &Path, table: &PatternTable) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    let (total, processed) = for_each_script(dir, |_, text| {
        paths.extend(table.values(text).map(normalize_path));
    });
    tracing::info!(
        "path analysis of {}: {}/{} files, {} unique paths",
        dir.display(),
        processed,
        total,
        paths.len()
    );
    paths
}

/// SHA-256 hex of the paths concatenated in sorted order.
pub fn path_set_digest(paths: &BTreeSet<String>) -> String {
    let mut hasher = Sha256::new();
    for p in paths {
        hasher.update(p.as_bytes());
    }
    hex::encode(hasher.finalize())
}

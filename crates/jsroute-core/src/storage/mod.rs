//! Script files on disk: collision-free naming and verbatim writes.

mod unique;

pub use unique::{split_extension, unique_path};

use crate::fetch::{Accept, Fetcher};
use crate::url_model::derive_filename;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Downloads `url` into `dir` and returns the path written.
///
/// The filename comes from [`derive_filename`]; an existing file of the same
/// name is left untouched and the new copy gets a `_N` suffix. Body bytes are
/// written as received. Fetch and write failures are logged and yield `None`.
pub fn save_script<F: Fetcher + ?Sized>(
    fetcher: &mut F,
    url: &str,
    dir: &Path,
    referer: &str,
    timeout: Duration,
) -> Option<PathBuf> {
    let response = match fetcher.get(url, Some(referer), Some(timeout), Accept::Script) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("download failed {}: {}", url, e);
            return None;
        }
    };

    let path = unique_path(dir, &derive_filename(url));
    if let Err(e) = fs::write(&path, &response.body) {
        tracing::warn!("write failed {}: {}", path.display(), e);
        return None;
    }
    tracing::info!(
        "saved {} ({} bytes) from {}",
        path.display(),
        response.body.len(),
        url
    );
    Some(path)
}

//! Filename extraction from URL path.

/// Returns the last `/`-separated segment of the URL path, still percent-encoded.
///
/// Returns `None` if the URL cannot be parsed or the last segment is empty
/// (root path or trailing slash).
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(segment.to_string())
}

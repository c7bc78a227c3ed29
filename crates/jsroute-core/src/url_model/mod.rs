//! URL modeling: script filename derivation and discovery candidate URLs.

mod candidates;
mod path;
mod sanitize;

pub use candidates::{direct_url, hash_url, CandidateUrls};
pub use path::filename_from_url_path;
pub use sanitize::sanitize_script_filename;

/// Stem used when the URL path has no last segment.
const DEFAULT_STEM: &str = "index";

/// Extension every saved script carries.
pub const SCRIPT_EXTENSION: &str = ".js";

/// Derives the local filename for a downloaded script.
///
/// Takes the last path segment of `url` (`index` when empty or unparseable),
/// appends `.js` unless already present, then keeps only alphanumerics,
/// `-`, `_` and `.`.
///
/// # Examples
///
/// - `derive_filename("https://example.com/static/app.js?v=3")` → `"app.js"`
/// - `derive_filename("https://example.com/")` → `"index.js"`
/// - `derive_filename("https://example.com/chunk%201")` → `"chunk201.js"`
pub fn derive_filename(url: &str) -> String {
    let mut name = filename_from_url_path(url).unwrap_or_else(|| DEFAULT_STEM.to_string());
    if !name.ends_with(SCRIPT_EXTENSION) {
        name.push_str(SCRIPT_EXTENSION);
    }
    sanitize_script_filename(&name)
}

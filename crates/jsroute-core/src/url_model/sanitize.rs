//! Script filename sanitization.

/// Keeps only alphanumeric characters, `-`, `_` and `.`; everything else is dropped.
pub fn sanitize_script_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        .collect()
}

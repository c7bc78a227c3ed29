//! Route path normalization.

/// Trims whitespace, forces a leading `/` and drops trailing `/`s along with
/// any whitespace they were hiding.
///
/// `"api/x/"` and `"/api/x"` both become `"/api/x"`. A bare `"/"` becomes
/// the empty string.
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };
    let mut rest = path.as_str();
    loop {
        let next = rest.trim_end_matches('/').trim_end();
        if next == rest {
            return next.to_string();
        }
        rest = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forces_leading_and_strips_trailing_slash() {
        assert_eq!(normalize_path("api/x/"), "/api/x");
        assert_eq!(normalize_path("/api/x"), "/api/x");
        assert_eq!(normalize_path("  pages/home  "), "/pages/home");
        assert_eq!(normalize_path("/a//"), "/a");
    }

    #[test]
    fn whitespace_between_trailing_slashes() {
        assert_eq!(normalize_path("a/ /"), "/a");
        assert_eq!(normalize_path("/x/\t/"), "/x");
        assert_eq!(normalize_path("/ /"), "");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "api/x/", "/a/b", " c ", "/", "", "//", "#/hash/", "/a//", "a/ /", "/x/\t/", "/ /",
        ];
        for raw in inputs {
            let once = normalize_path(raw);
            assert_eq!(normalize_path(&once), once, "normalizing {raw:?} twice");
        }
    }

    #[test]
    fn root_and_empty() {
        assert_eq!(normalize_path("/"), "");
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("  "), "");
    }
}

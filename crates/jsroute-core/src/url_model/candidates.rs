//! Candidate page URLs derived from extracted route paths.

use url::Url;

/// Direct and hash-routed URLs built from one set of paths, in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateUrls {
    pub direct: Vec<String>,
    pub hash: Vec<String>,
}

impl CandidateUrls {
    /// Builds both candidate forms for every path. Paths that cannot be joined are skipped.
    pub fn build<'a, I>(target: &Url, paths: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut out = Self::default();
        for path in paths {
            match direct_url(target, path) {
                Some(u) => out.direct.push(u),
                None => tracing::debug!("cannot join path {:?} onto {}", path, target),
            }
            out.hash.push(hash_url(target, path));
        }
        out
    }

    pub fn len(&self) -> usize {
        self.direct.len() + self.hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.direct.is_empty() && self.hash.is_empty()
    }
}

/// `scheme://host[:port]` of the target joined with `path`.
pub fn direct_url(target: &Url, path: &str) -> Option<String> {
    let origin = Url::parse(&target.origin().ascii_serialization()).ok()?;
    origin.join(path).ok().map(String::from)
}

/// The target URL with only its fragment replaced by `path`.
pub fn hash_url(target: &Url, path: &str) -> String {
    let mut u = target.clone();
    u.set_fragment(Some(path.strip_prefix('#').unwrap_or(path)));
    u.into()
}

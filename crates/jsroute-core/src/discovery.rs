//! Bounded fixpoint over discovered route paths.
//!
//! Each iteration turns the current path set into candidate page URLs,
//! crawls them for script links, downloads every link, and rescans the whole
//! download directory. The loop stops when a rescan yields exactly the set
//! it started from, or when the iteration cap is reached.

use crate::fetch::Fetcher;
use crate::links::discover_script_links;
use crate::patterns::PatternTable;
use crate::scan::{collect_paths, path_set_digest};
use crate::storage::save_script;
use crate::url_model::CandidateUrls;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Copy)]
pub struct DiscoverySettings {
    /// Hard cap on iterations.
    pub max_iterations: u32,
    /// Pause after each page request.
    pub request_delay: Duration,
    /// Transfer timeout for script downloads.
    pub download_timeout: Duration,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            request_delay: Duration::from_millis(500),
            download_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryOutcome {
    /// Iterations actually run.
    pub iterations: u32,
    /// Path set after the last rescan.
    pub paths: BTreeSet<String>,
    /// Files saved by the loop, in download order.
    pub new_files: Vec<PathBuf>,
    /// True when the loop stopped because two consecutive scans agreed.
    pub converged: bool,
}

/// Crawls every candidate URL for `paths`, direct URLs first then hash URLs,
/// and returns the union of script links found.
fn crawl_candidates<F: Fetcher + ?Sized>(
    fetcher: &mut F,
    target: &Url,
    paths: &BTreeSet<String>,
    delay: Duration,
) -> BTreeSet<String> {
    let candidates = CandidateUrls::build(target, paths);
    if candidates.is_empty() {
        tracing::warn!("no candidate URLs for {} paths", paths.len());
        return BTreeSet::new();
    }
    tracing::info!(
        "built {} direct and {} hash candidate URLs",
        candidates.direct.len(),
        candidates.hash.len()
    );

    let mut links = BTreeSet::new();
    for (i, url) in candidates.direct.iter().chain(&candidates.hash).enumerate() {
        tracing::debug!("candidate {}/{}: {}", i + 1, candidates.len(), url);
        links.extend(discover_script_links(fetcher, url));
        thread::sleep(delay);
    }
    links
}

/// Runs the discovery loop starting from `initial`, the path set of the first full scan.
pub fn run_discovery<F: Fetcher + ?Sized>(
    fetcher: &mut F,
    target: &Url,
    dir: &Path,
    initial: BTreeSet<String>,
    table: &PatternTable,
    settings: &DiscoverySettings,
) -> DiscoveryOutcome {
    let referer = target.as_str();
    let mut previous = BTreeSet::new();
    let mut current = initial;
    let mut outcome = DiscoveryOutcome::default();

    while outcome.iterations < settings.max_iterations && previous != current {
        if current.is_empty() {
            tracing::warn!("no paths extracted, stopping discovery");
            break;
        }
        outcome.iterations += 1;
        tracing::info!(
            "discovery iteration {}/{} over {} paths (digest {})",
            outcome.iterations,
            settings.max_iterations,
            current.len(),
            path_set_digest(&current)
        );

        previous = std::mem::take(&mut current);
        let links = crawl_candidates(fetcher, target, &previous, settings.request_delay);
        tracing::info!("found {} distinct script links", links.len());

        let before = outcome.new_files.len();
        for link in &links {
            if let Some(path) = save_script(fetcher, link, dir, referer, settings.download_timeout) {
                outcome.new_files.push(path);
            }
        }
        tracing::info!(
            "saved {}/{} scripts",
            outcome.new_files.len() - before,
            links.len()
        );

        current = collect_paths(dir, table);
        tracing::info!(
            "{} new paths this iteration",
            current.difference(&previous).count()
        );
    }

    outcome.converged = !current.is_empty() && previous == current;
    outcome.paths = current;
    outcome
}

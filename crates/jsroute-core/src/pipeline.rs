//! End-to-end runs: the crawl (download, discover, report) and the standalone directory scan.

use crate::config::JsrouteConfig;
use crate::discovery::{run_discovery, DiscoverySettings};
use crate::fetch::Fetcher;
use crate::links::discover_script_links;
use crate::patterns::PatternTable;
use crate::report::{write_report, ReportStats};
use crate::scan::{collect_paths, scan_directory};
use crate::storage::save_script;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Everything a crawl run needs besides the fetcher.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub target: String,
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
    pub discovery: DiscoverySettings,
}

impl CrawlSettings {
    pub fn from_config(target: &str, cfg: &JsrouteConfig) -> Self {
        Self {
            target: target.trim().to_string(),
            output_dir: cfg.output_dir.clone(),
            report_path: cfg.report_path(),
            discovery: DiscoverySettings {
                max_iterations: cfg.max_iterations,
                request_delay: cfg.request_delay(),
                download_timeout: cfg.download_timeout(),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    /// Distinct script links on the target page.
    pub initial_links: usize,
    /// Files saved from the target page.
    pub initial_files: Vec<PathBuf>,
    /// Files saved by the discovery loop.
    pub new_files: Vec<PathBuf>,
    pub iterations: u32,
    pub converged: bool,
    /// Size of the final discovery path set.
    pub final_paths: usize,
    /// Scripts read by the final report scan.
    pub files_processed: usize,
    pub report_path: PathBuf,
    /// Record lines in the report; 0 when it could not be written.
    pub report_lines: usize,
}

/// Downloads every script linked from `target` into `dir`.
fn download_initial<F: Fetcher + ?Sized>(
    fetcher: &mut F,
    target: &Url,
    dir: &Path,
    settings: &DiscoverySettings,
) -> (usize, Vec<PathBuf>) {
    let links: BTreeSet<String> = discover_script_links(fetcher, target.as_str())
        .into_iter()
        .collect();
    let mut saved = Vec::new();
    for (i, link) in links.iter().enumerate() {
        tracing::info!("downloading ({}/{}): {}", i + 1, links.len(), link);
        if let Some(p) = save_script(fetcher, link, dir, target.as_str(), settings.download_timeout) {
            saved.push(p);
        }
    }
    tracing::info!("initial download: saved {}/{} scripts", saved.len(), links.len());
    (links.len(), saved)
}

/// Full crawl: initial download, initial path scan, discovery loop, final report.
///
/// Fails only when the run cannot start (output directory or target URL
/// unusable). Network and per-file problems are logged and skipped; a report
/// that cannot be written leaves `report_lines` at 0.
pub fn run_crawl<F: Fetcher + ?Sized>(fetcher: &mut F, settings: &CrawlSettings) -> Result<CrawlSummary> {
    let dir = settings.output_dir.as_path();
    fs::create_dir_all(dir).with_context(|| format!("create output dir {}", dir.display()))?;
    let target =
        Url::parse(&settings.target).with_context(|| format!("invalid target URL {:?}", settings.target))?;
    let discovery_table = PatternTable::discovery()?;
    let report_table = PatternTable::report()?;

    let (initial_links, initial_files) = download_initial(fetcher, &target, dir, &settings.discovery);

    let initial_paths = collect_paths(dir, &discovery_table);
    let outcome = run_discovery(
        fetcher,
        &target,
        dir,
        initial_paths,
        &discovery_table,
        &settings.discovery,
    );
    tracing::info!(
        "discovery finished after {}/{} iterations (converged: {}), {} paths",
        outcome.iterations,
        settings.discovery.max_iterations,
        outcome.converged,
        outcome.paths.len()
    );

    let scan = scan_directory(dir, &report_table, false);
    let stats = ReportStats::now(scan.files_processed, dir);
    let report_lines = match write_report(&settings.report_path, &scan.matches, Some(&stats)) {
        Ok(n) => n,
        Err(e) => {
            tracing::error!("{:#}", e);
            0
        }
    };

    Ok(CrawlSummary {
        initial_links,
        initial_files,
        new_files: outcome.new_files,
        iterations: outcome.iterations,
        converged: outcome.converged,
        final_paths: outcome.paths.len(),
        files_processed: scan.files_processed,
        report_path: settings.report_path.clone(),
        report_lines,
    })
}

/// Pattern table choice for a standalone scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanVariant {
    /// Report table, two-column output.
    Simple,
    /// Strict table, three-column output with file names.
    #[default]
    Strict,
}

#[derive(Debug, Clone)]
pub struct ScanSummary {
    pub files_total: usize,
    pub files_processed: usize,
    pub report_path: PathBuf,
    pub report_lines: usize,
}

/// Scans `dir` with the chosen table and writes a report (no statistics block) to `output`.
pub fn run_scan(dir: &Path, output: &Path, variant: ScanVariant) -> Result<ScanSummary> {
    let (table, with_filenames) = match variant {
        ScanVariant::Simple => (PatternTable::report()?, false),
        ScanVariant::Strict => (PatternTable::strict()?, true),
    };
    let scan = scan_directory(dir, &table, with_filenames);
    let report_lines = write_report(output, &scan.matches, None)?;
    Ok(ScanSummary {
        files_total: scan.files_total,
        files_processed: scan.files_processed,
        report_path: output.to_path_buf(),
        report_lines,
    })
}

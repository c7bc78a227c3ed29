//! Plain-text route report.
//!
//! Each non-empty group becomes a `===== <name> =====` section of unique,
//! sorted, column-aligned records followed by a blank line. An optional
//! statistics block closes the file. Ordering comes only from sorting, so
//! the same records in any insertion order render identically.

use crate::patterns::{MatchRecord, MatchSet};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Format of the timestamp line in the statistics block.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trailing statistics block.
#[derive(Debug, Clone)]
pub struct ReportStats {
    pub files_processed: usize,
    pub source_dir: PathBuf,
    /// Preformatted, see [`TIMESTAMP_FORMAT`].
    pub generated_at: String,
}

impl ReportStats {
    /// Stats stamped with the current local time.
    pub fn now(files_processed: usize, source_dir: &Path) -> Self {
        Self {
            files_processed,
            source_dir: source_dir.to_path_buf(),
            generated_at: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Rendered report text and the number of record lines in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub text: String,
    pub lines: usize,
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, to: usize) -> String {
    format!("{s}{}", " ".repeat(to.saturating_sub(width(s))))
}

fn render_group(out: &mut String, name: &str, records: &BTreeSet<&MatchRecord>) {
    let value_width = records.iter().map(|r| width(&r.value)).max().unwrap_or(0);
    let label_width = records.iter().map(|r| width(&r.label)).max().unwrap_or(0);

    let _ = writeln!(out, "===== {name} =====");
    for r in records {
        match &r.file {
            Some(file) => {
                let _ = writeln!(
                    out,
                    "{}\t{}\t{}",
                    pad(&r.value, value_width),
                    pad(&r.label, label_width),
                    file
                );
            }
            None => {
                let _ = writeln!(out, "{}\t[{}]", pad(&r.value, value_width + 2), r.label);
            }
        }
    }
    out.push('\n');
}

/// Renders the report text.
pub fn render_report(matches: &MatchSet, stats: Option<&ReportStats>) -> RenderedReport {
    let mut text = String::new();
    let mut lines = 0;
    for group in &matches.groups {
        let unique: BTreeSet<&MatchRecord> = group.records.iter().collect();
        if unique.is_empty() {
            continue;
        }
        render_group(&mut text, &group.name, &unique);
        lines += unique.len();
    }

    if let Some(stats) = stats {
        let _ = writeln!(text, "===== 统计信息 =====");
        let _ = writeln!(text, "总提取路径数: {lines}");
        let _ = writeln!(text, "分析文件数: {}", stats.files_processed);
        let _ = writeln!(text, "文件来源目录: {}", stats.source_dir.display());
        let _ = writeln!(text, "分析时间: {}", stats.generated_at);
    }
    RenderedReport { text, lines }
}

/// Renders and writes the report, replacing any existing file.
/// Returns the number of record lines written.
pub fn write_report(path: &Path, matches: &MatchSet, stats: Option<&ReportStats>) -> Result<usize> {
    let report = render_report(matches, stats);
    fs::write(path, &report.text).with_context(|| format!("write report {}", path.display()))?;
    tracing::info!("wrote {} report lines to {}", report.lines, path.display());
    Ok(report.lines)
}

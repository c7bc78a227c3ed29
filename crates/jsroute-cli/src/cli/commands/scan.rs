//! `jsroute scan [DIR]` – report on scripts already on disk.

use anyhow::Result;
use jsroute_core::pipeline::{self, ScanVariant};
use std::path::Path;

pub fn run_scan(dir: &Path, output: &Path, variant: ScanVariant) -> Result<()> {
    let summary = pipeline::run_scan(dir, output, variant)?;
    println!(
        "Scanned {}/{} script files in {}",
        summary.files_processed,
        summary.files_total,
        dir.display()
    );
    println!(
        "Wrote {} matches to {}",
        summary.report_lines,
        summary.report_path.display()
    );
    Ok(())
}

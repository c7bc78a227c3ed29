//! `jsroute crawl [URL]` – download scripts, discover routes, write the report.

use anyhow::{bail, Context, Result};
use jsroute_core::config::JsrouteConfig;
use jsroute_core::fetch::CurlSession;
use jsroute_core::pipeline::{self, CrawlSettings, CrawlSummary};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct CrawlOverrides {
    pub output_dir: Option<PathBuf>,
    pub max_iterations: Option<u32>,
    pub delay_ms: Option<u64>,
}

impl CrawlOverrides {
    pub fn apply(self, cfg: &JsrouteConfig) -> JsrouteConfig {
        let mut cfg = cfg.clone();
        if let Some(dir) = self.output_dir {
            cfg.output_dir = dir;
        }
        if let Some(n) = self.max_iterations {
            cfg.max_iterations = n;
        }
        if let Some(ms) = self.delay_ms {
            cfg.request_delay_ms = ms;
        }
        cfg
    }
}

/// Reads the target URL from `input` after printing a prompt to `prompt_out`.
fn prompt_target<R: BufRead, W: Write>(input: &mut R, prompt_out: &mut W) -> Result<String> {
    write!(prompt_out, "Target URL: ")?;
    prompt_out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("read target URL")?;
    let url = line.trim().to_string();
    if url.is_empty() {
        bail!("no target URL given");
    }
    Ok(url)
}

fn print_summary(summary: &CrawlSummary, cfg: &JsrouteConfig) {
    println!("Output directory:    {}", cfg.output_dir.display());
    println!(
        "Initial scripts:     {}/{}",
        summary.initial_files.len(),
        summary.initial_links
    );
    println!("Discovered scripts:  {}", summary.new_files.len());
    println!(
        "Iterations:          {}/{}{}",
        summary.iterations,
        cfg.max_iterations,
        if summary.converged { " (converged)" } else { "" }
    );
    println!("Final paths:         {}", summary.final_paths);
    println!(
        "Report:              {} ({} entries)",
        summary.report_path.display(),
        summary.report_lines
    );
}

pub fn run_crawl(base_cfg: &JsrouteConfig, url: Option<String>, overrides: CrawlOverrides) -> Result<()> {
    let cfg = overrides.apply(base_cfg);
    let target = match url {
        Some(u) => u,
        None => prompt_target(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    tracing::info!("crawl target={} output_dir={}", target, cfg.output_dir.display());

    let mut session = CurlSession::new(cfg.user_agent()).context("configure HTTP session")?;
    let settings = CrawlSettings::from_config(&target, &cfg);
    let summary = pipeline::run_crawl(&mut session, &settings)?;
    print_summary(&summary, &cfg);
    Ok(())
}

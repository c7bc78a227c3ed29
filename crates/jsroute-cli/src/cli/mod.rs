//! CLI for jsroute.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use jsroute_core::config;
use jsroute_core::pipeline::ScanVariant;
use std::path::PathBuf;

use commands::{run_crawl, run_scan, CrawlOverrides};

/// Top-level CLI for jsroute.
#[derive(Debug, Parser)]
#[command(name = "jsroute")]
#[command(about = "jsroute: crawl a site's scripts and extract API route declarations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Pattern table used by `scan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Case-sensitive keys, two-column report.
    Simple,
    /// Case-insensitive keys, nested calls, object literals; report lists file names.
    Strict,
}

impl From<VariantArg> for ScanVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Simple => ScanVariant::Simple,
            VariantArg::Strict => ScanVariant::Strict,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a page's scripts, follow discovered routes, and write the route report.
    Crawl {
        /// Target page URL. Prompted for on stdin when omitted.
        url: Option<String>,
        /// Directory for downloaded scripts and the report (overrides config).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Cap on discovery iterations (overrides config).
        #[arg(long, value_name = "N")]
        max_iterations: Option<u32>,
        /// Pause between discovery requests in milliseconds (overrides config).
        #[arg(long, value_name = "MS")]
        delay_ms: Option<u64>,
    },

    /// Scan an existing directory of scripts and write a route report.
    Scan {
        /// Directory to scan (default: configured output dir).
        dir: Option<PathBuf>,
        /// Report file (default: <DIR>/<report_file>).
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Pattern table to apply.
        #[arg(long, value_enum, default_value = "strict")]
        variant: VariantArg,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Crawl {
                url,
                output_dir,
                max_iterations,
                delay_ms,
            } => {
                let overrides = CrawlOverrides {
                    output_dir,
                    max_iterations,
                    delay_ms,
                };
                run_crawl(&cfg, url, overrides)?
            }
            CliCommand::Scan {
                dir,
                output,
                variant,
            } => {
                let dir = dir.unwrap_or_else(|| cfg.output_dir.clone());
                let output = output.unwrap_or_else(|| dir.join(&cfg.report_file));
                run_scan(&dir, &output, variant.into())?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

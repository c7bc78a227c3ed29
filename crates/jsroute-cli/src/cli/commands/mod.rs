//! CLI command handlers.

mod crawl;
mod scan;

pub use crawl::{run_crawl, CrawlOverrides};
pub use scan::run_scan;

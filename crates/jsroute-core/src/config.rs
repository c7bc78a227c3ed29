use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Browser-like User-Agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Global configuration loaded from `~/.config/jsroute/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsrouteConfig {
    /// Directory that receives downloaded scripts and the report.
    pub output_dir: PathBuf,
    /// Report file name, created inside `output_dir`.
    pub report_file: String,
    /// Hard cap on discovery loop iterations.
    pub max_iterations: u32,
    /// Pause after each discovery request, in milliseconds.
    pub request_delay_ms: u64,
    /// Transfer timeout for script downloads, in seconds. Page fetches have none.
    pub download_timeout_secs: u64,
    /// Optional User-Agent override.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for JsrouteConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("js"),
            report_file: "path.txt".to_string(),
            max_iterations: 5,
            request_delay_ms: 500,
            download_timeout_secs: 10,
            user_agent: None,
        }
    }
}

impl JsrouteConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    /// Report path: `<output_dir>/<report_file>`.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("jsroute")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<JsrouteConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = JsrouteConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg: JsrouteConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

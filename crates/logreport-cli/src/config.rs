use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime configuration, passed explicitly into the pipeline — no global
/// state. YAML key names mirror what the wider deployment already uses.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "LOG_DIR", default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(rename = "REPORT_DIR", default = "default_report_dir")]
    pub report_dir: PathBuf,

    #[serde(rename = "TEMPLATE_PATH", default = "default_template_path")]
    pub template_path: PathBuf,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./log")
}

fn default_report_dir() -> PathBuf {
    PathBuf::from("./reports")
}

fn default_template_path() -> PathBuf {
    PathBuf::from("./report-template/report.html")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            report_dir: default_report_dir(),
            template_path: default_template_path(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file. Keys absent from the file fall
    /// back to the defaults; no file at all means pure defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        tracing::info!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

//! Analyzer configuration
//!
//! Settings are layered, lowest priority first:
//!
//! 1. Hardcoded defaults
//! 2. TOML config file (`--config`, or `config.toml` in the platform config dir)
//! 3. Environment variables (`LOGSWEEP_*`)
//! 4. Command-line flags
//!
//! ```toml
//! log_level = "info"
//! on_parse_error = "skip"
//! tie_break = "input-order"
//! bucketing = "per-day"
//! plot = "enabled"
//!
//! [chart]
//! sink = "plotly"
//! username = "someone"
//! api_key = "..."
//! ```

use crate::error::{ErrorCode, Result, SweepError};
use crate::summary::Bucketing;
use crate::sweep::TieBreak;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod loader;

pub use loader::{load_config, load_config_with, ConfigOverrides};

/// Valid log levels for configuration validation.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Default hosted plotting endpoint
pub const DEFAULT_PLOTLY_ENDPOINT: &str = "https://api.plot.ly";

/// What to do with a line that does not match the expected layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseErrorPolicy {
    /// Warn with the line number, count the line as unparsed, keep going
    #[default]
    Skip,
    /// Stop the run at the first bad line
    Abort,
}

/// Whether the per-day chart is produced at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotMode {
    Enabled,
    #[default]
    Disabled,
}

impl PlotMode {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

/// Where an enabled chart goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSinkKind {
    /// Hosted Plotly REST API (network, credentials)
    #[default]
    Plotly,
    /// Figure JSON written to a local file
    File,
}

keyword_enum!(ParseErrorPolicy, "parse error policy", {
    "skip" => ParseErrorPolicy::Skip,
    "abort" => ParseErrorPolicy::Abort,
});

keyword_enum!(PlotMode, "plot mode", {
    "enabled" => PlotMode::Enabled,
    "disabled" => PlotMode::Disabled,
});

keyword_enum!(ChartSinkKind, "chart sink", {
    "plotly" => ChartSinkKind::Plotly,
    "file" => ChartSinkKind::File,
});

/// Chart rendering settings, only consulted when plotting is enabled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default)]
    pub sink: ChartSinkKind,

    /// Output path for the `file` sink
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Name of the published plot
    #[serde(default = "default_chart_filename")]
    pub filename: String,

    /// Base URL of the plotting service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_world_readable")]
    pub world_readable: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            sink: ChartSinkKind::default(),
            output: None,
            filename: default_chart_filename(),
            endpoint: default_endpoint(),
            username: None,
            api_key: None,
            world_readable: default_world_readable(),
        }
    }
}

/// Complete analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub on_parse_error: ParseErrorPolicy,

    #[serde(default)]
    pub tie_break: TieBreak,

    #[serde(default)]
    pub bucketing: Bucketing,

    #[serde(default)]
    pub plot: PlotMode,

    #[serde(default)]
    pub chart: ChartSettings,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            on_parse_error: ParseErrorPolicy::default(),
            tie_break: TieBreak::default(),
            bucketing: Bucketing::default(),
            plot: PlotMode::default(),
            chart: ChartSettings::default(),
        }
    }
}

// Default value functions for serde
fn default_log_level() -> String {
    "info".to_string()
}

fn default_chart_filename() -> String {
    "grouped-bar".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_PLOTLY_ENDPOINT.to_string()
}

fn default_world_readable() -> bool {
    true
}

impl AnalyzerConfig {
    /// Check every setting and report all problems at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let mut missing_credentials = false;

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            errors.push(format!(
                "log_level must be one of: {} (got '{}')",
                VALID_LOG_LEVELS.join(", "),
                self.log_level
            ));
        }

        if self.plot.is_enabled() {
            let chart = &self.chart;
            if chart.filename.trim().is_empty() {
                errors.push("chart.filename cannot be empty".to_string());
            }

            match chart.sink {
                ChartSinkKind::Plotly => {
                    if let Err(e) = url::Url::parse(&chart.endpoint) {
                        errors.push(format!(
                            "chart.endpoint '{}' is not a valid URL: {}",
                            chart.endpoint, e
                        ));
                    }
                    if chart.username.as_deref().map_or(true, str::is_empty)
                        || chart.api_key.as_deref().map_or(true, str::is_empty)
                    {
                        missing_credentials = true;
                        errors.push(
                            "plotting to plotly needs chart.username and chart.api_key \
                             (or LOGSWEEP_PLOTLY_USERNAME / LOGSWEEP_PLOTLY_API_KEY)"
                                .to_string(),
                        );
                    }
                }
                ChartSinkKind::File => {
                    if chart.output.is_none() {
                        errors.push("chart.output is required for the file sink".to_string());
                    }
                }
            }
        }

        match errors.len() {
            0 => Ok(()),
            1 if missing_credentials => Err(SweepError::config_with_code(
                ErrorCode::CONFIG_MISSING_CREDENTIALS,
                errors.remove(0),
                Some("chart".to_string()),
            )),
            _ => Err(SweepError::config_with_code(
                ErrorCode::CONFIG_VALIDATION_FAILED,
                errors.join("; "),
                None,
            )),
        }
    }
}

/// Returns the default config file path, `config.toml` in the platform config dir.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "logsweep").map(|dirs| dirs.config_dir().join("config.toml"))
}

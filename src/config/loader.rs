//! Layered configuration loading: file, environment, command line

use super::{default_config_path, AnalyzerConfig, ChartSinkKind, ParseErrorPolicy, PlotMode};
use crate::error::{ErrorCode, Result, SweepError};
use crate::summary::Bucketing;
use crate::sweep::TieBreak;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Values given on the command line; `None` leaves lower layers untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub on_parse_error: Option<ParseErrorPolicy>,
    pub tie_break: Option<TieBreak>,
    pub bucketing: Option<Bucketing>,
    pub plot: Option<PlotMode>,
    pub chart_sink: Option<ChartSinkKind>,
    pub chart_output: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut AnalyzerConfig) {
        if let Some(policy) = self.on_parse_error {
            config.on_parse_error = policy;
        }
        if let Some(tie_break) = self.tie_break {
            config.tie_break = tie_break;
        }
        if let Some(bucketing) = self.bucketing {
            config.bucketing = bucketing;
        }
        if let Some(plot) = self.plot {
            config.plot = plot;
        }
        if let Some(sink) = self.chart_sink {
            config.chart.sink = sink;
        }
        if let Some(output) = &self.chart_output {
            config.chart.output = Some(output.clone());
        }
    }
}

/// Load configuration from the real file system and process environment.
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<AnalyzerConfig> {
    load_config_with(path, overrides, |key| std::env::var(key).ok())
}

/// Load configuration with an injectable environment lookup.
///
/// An explicit `path` must exist. Without one, the default config file is
/// used when present. The result is validated before it is returned.
pub fn load_config_with<F>(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
    env: F,
) -> Result<AnalyzerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(SweepError::config_with_code(
                    ErrorCode::CONFIG_NOT_FOUND,
                    format!("Configuration file not found: {}", path.display()),
                    None,
                ));
            }
            read_config_file(path)?
        }
        None => match default_config_path().filter(|p| p.exists()) {
            Some(default_path) => read_config_file(&default_path)?,
            None => AnalyzerConfig::default(),
        },
    };

    merge_env_vars(&mut config, env)?;
    overrides.apply(&mut config);
    config.validate()?;

    debug!(
        on_parse_error = %config.on_parse_error,
        tie_break = %config.tie_break,
        bucketing = %config.bucketing,
        plot = %config.plot,
        "Configuration loaded"
    );
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<AnalyzerConfig> {
    debug!("Reading configuration from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        SweepError::config(format!("Cannot read {}", path.display())).with_source(e)
    })?;

    toml::from_str(&content)
        .map_err(|e| SweepError::from(e).with_context(path.display()))
}

/// Overlay `LOGSWEEP_*` environment variables onto the config.
pub fn merge_env_vars<F>(config: &mut AnalyzerConfig, env: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(level) = env("LOGSWEEP_LOG_LEVEL") {
        config.log_level = level.trim().to_ascii_lowercase();
    }
    if let Some(value) = env("LOGSWEEP_ON_PARSE_ERROR") {
        config.on_parse_error = parse_env("LOGSWEEP_ON_PARSE_ERROR", &value)?;
    }
    if let Some(value) = env("LOGSWEEP_TIE_BREAK") {
        config.tie_break = parse_env("LOGSWEEP_TIE_BREAK", &value)?;
    }
    if let Some(value) = env("LOGSWEEP_BUCKETING") {
        config.bucketing = parse_env("LOGSWEEP_BUCKETING", &value)?;
    }
    if let Some(value) = env("LOGSWEEP_PLOT") {
        config.plot = parse_env("LOGSWEEP_PLOT", &value)?;
    }
    if let Some(username) = env("LOGSWEEP_PLOTLY_USERNAME") {
        config.chart.username = Some(username);
    }
    if let Some(api_key) = env("LOGSWEEP_PLOTLY_API_KEY") {
        config.chart.api_key = Some(api_key);
    }
    Ok(())
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    value.parse().map_err(|message: String| {
        SweepError::config_with_code(
            ErrorCode::CONFIG_INVALID_VALUE,
            message,
            Some(key.to_string()),
        )
    })
}

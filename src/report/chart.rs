//! Grouped bar chart of per-day concurrency
//!
//! The figure is kept in Plotly's JSON shape so the same value can be posted
//! to the hosted service or written to disk and loaded by any Plotly client.

use crate::error::{ErrorCode, Result, SweepError};
use crate::summary::RunSummary;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

pub const MEAN_SERIES: &str = "avg concurrency";
pub const MAX_SERIES: &str = "max concurrency";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub barmode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<BarTrace>,
    pub layout: Layout,
}

impl Figure {
    /// Mean and max bars per day, grouped by day.
    ///
    /// `None` when the summary has no per-day results (global bucketing or
    /// no parsed requests).
    pub fn grouped_bars(summary: &RunSummary) -> Option<Self> {
        if summary.per_day.is_empty() {
            return None;
        }

        let days: Vec<String> = summary.per_day.iter().map(|d| d.day.clone()).collect();
        let means = summary.per_day.iter().map(|d| d.mean()).collect();
        let maxes = summary.per_day.iter().map(|d| d.max() as f64).collect();

        Some(Self {
            data: vec![
                BarTrace {
                    kind: "bar",
                    name: MEAN_SERIES.to_string(),
                    x: days.clone(),
                    y: means,
                },
                BarTrace {
                    kind: "bar",
                    name: MAX_SERIES.to_string(),
                    x: days,
                    y: maxes,
                },
            ],
            layout: Layout {
                barmode: "group",
                title: None,
            },
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.layout.title = Some(title.into());
        self
    }
}

/// Where a published chart ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartReceipt {
    Url(String),
    File(PathBuf),
}

impl fmt::Display for ChartReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Destination for a rendered figure
#[async_trait]
pub trait ChartSink: Send + Sync {
    fn name(&self) -> &'static str;

    async fn publish(&self, figure: &Figure) -> Result<ChartReceipt>;
}

/// Writes the figure JSON to a local file
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ChartSink for FileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn publish(&self, figure: &Figure) -> Result<ChartReceipt> {
        let body = serde_json::to_vec_pretty(figure)?;
        debug!("Writing {} byte figure to {}", body.len(), self.path.display());

        tokio::fs::write(&self.path, body).await.map_err(|e| {
            SweepError::chart_with_code(
                ErrorCode::CHART_WRITE_FAILED,
                format!("Cannot write {}", self.path.display()),
            )
            .with_source(e)
        })?;

        Ok(ChartReceipt::File(self.path.clone()))
    }
}

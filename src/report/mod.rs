//! Text report and optional chart output
//!
//! The text report always goes to stdout. Charts are best-effort: any failure
//! is logged and the run still succeeds.

pub mod chart;
pub mod plotly;
pub mod text;

pub use chart::{ChartReceipt, ChartSink, FileSink, Figure};
pub use plotly::PlotlySink;

use crate::config::{AnalyzerConfig, ChartSettings, ChartSinkKind};
use crate::error::{ErrorCode, Result, SweepError};
use crate::summary::RunSummary;
use tracing::{info, warn};

/// Build the sink selected in the chart settings
pub fn sink_from_settings(settings: &ChartSettings) -> Result<Box<dyn ChartSink>> {
    match settings.sink {
        ChartSinkKind::Plotly => Ok(Box::new(PlotlySink::from_settings(settings)?)),
        ChartSinkKind::File => {
            let path = settings.output.clone().ok_or_else(|| {
                SweepError::config_with_code(
                    ErrorCode::CONFIG_MISSING_REQUIRED,
                    "chart.output is required for the file sink",
                    Some("chart.output".to_string()),
                )
            })?;
            Ok(Box::new(FileSink::new(path)))
        }
    }
}

/// Render the per-day chart if plotting is enabled.
///
/// Returns `None` when plotting is disabled, there is nothing to plot, or
/// the sink failed. Failures are logged, never propagated.
pub async fn publish_chart(
    summary: &RunSummary,
    config: &AnalyzerConfig,
    title: &str,
) -> Option<ChartReceipt> {
    if !config.plot.is_enabled() {
        return None;
    }

    let Some(figure) = Figure::grouped_bars(summary) else {
        info!("No per-day results to plot");
        return None;
    };
    let figure = figure.with_title(title);

    let sink = match sink_from_settings(&config.chart) {
        Ok(sink) => sink,
        Err(e) => {
            warn!("Chart skipped: {}", e.user_message());
            return None;
        }
    };

    match sink.publish(&figure).await {
        Ok(receipt) => {
            info!("Chart published via {}: {}", sink.name(), receipt);
            Some(receipt)
        }
        Err(e) => {
            warn!("{}", e.user_message());
            None
        }
    }
}

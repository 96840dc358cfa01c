//! One analysis run from start banner to run time
//!
//! The report goes to the supplied writer; the chart, when enabled, is
//! published between the summary and the closing lines.

use crate::config::AnalyzerConfig;
use crate::pipeline::{analyze_file, AnalysisSettings};
use crate::report::{publish_chart, text};
use crate::summary::RunSummary;
use anyhow::Result;
use chrono::Local;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Analyze `input` and write the full text report to `out`.
///
/// Analysis errors are returned before anything past the start line is
/// written. Chart failures never fail the run.
pub async fn run_analysis<W: Write>(
    out: &mut W,
    input: &Path,
    config: &AnalyzerConfig,
) -> Result<RunSummary> {
    let started = Local::now();
    text::write_start(out, started)?;
    out.flush()?;

    let settings = AnalysisSettings::from(config);
    debug!(?settings, "Analysis settings");
    let summary = analyze_file(input, settings)?;

    text::write_summary(out, &summary, input)?;

    let title = input.display().to_string();
    if let Some(receipt) = publish_chart(&summary, config, &title).await {
        writeln!(out, "Chart - {}", receipt)?;
    }

    text::write_finish(out, started, Local::now())?;
    out.flush()?;
    Ok(summary)
}

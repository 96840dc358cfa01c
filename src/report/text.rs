//! Plain-text run report

use crate::summary::{Bucketing, RunSummary};
use chrono::{DateTime, Local};
use std::io::{self, Write};
use std::path::Path;

/// `ctime(3)` layout, e.g. `Thu Mar 12 10:00:05 2015`
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

const PROGRAM: &str = "logsweep";

/// Shortest representation that still shows a fractional part (`1.0`, `0.5`)
fn format_mean(value: f64) -> String {
    format!("{:?}", value)
}

pub fn write_start<W: Write>(out: &mut W, started: DateTime<Local>) -> io::Result<()> {
    writeln!(out, "{} start time - {}", PROGRAM, started.format(CTIME_FORMAT))
}

pub fn write_summary<W: Write>(out: &mut W, summary: &RunSummary, input: &Path) -> io::Result<()> {
    writeln!(out, "Running log analysis on {}", input.display())?;
    writeln!(out, "Total Requests - {}", summary.total_lines())?;
    writeln!(out, "Parsed requests - {}", summary.parsed_requests())?;
    writeln!(out, "Unparsed lines - {}", summary.unparsed_lines())?;

    if summary.bucketing == Bucketing::PerDay {
        for day in &summary.per_day {
            writeln!(
                out,
                "Day {} - avg concurrency {:.2}, max concurrency {}",
                day.day,
                day.mean(),
                day.max()
            )?;
        }
    }

    match &summary.overall {
        Some(stats) => {
            writeln!(out, "Overall min concurrency - {}", stats.min)?;
            writeln!(out, "Overall avg concurrency - {}", format_mean(stats.mean))?;
            writeln!(out, "Overall max concurrency - {}", stats.max)?;
        }
        None => writeln!(out, "No concurrency data (no parsable GET requests)")?,
    }
    Ok(())
}

pub fn write_finish<W: Write>(
    out: &mut W,
    started: DateTime<Local>,
    finished: DateTime<Local>,
) -> io::Result<()> {
    writeln!(out, "{} end time - {}", PROGRAM, finished.format(CTIME_FORMAT))?;
    writeln!(
        out,
        "Run time of {} - {} sec",
        PROGRAM,
        (finished - started).num_seconds()
    )
}

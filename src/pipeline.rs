//! Read -> parse -> bucket -> sweep -> summarize
//!
//! Each stage takes the previous stage's output by value or reference; no
//! state outlives a call. The input file is opened and closed inside
//! [`analyze_file`].

use crate::config::{AnalyzerConfig, ParseErrorPolicy};
use crate::error::{Result, SweepError};
use crate::events::{EventAccumulator, EventLog};
use crate::parser::parse_line;
use crate::summary::{summarize, Bucketing, RunSummary};
use crate::sweep::{ConcurrencySweeper, TieBreak};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// The subset of configuration the analysis itself depends on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSettings {
    pub on_parse_error: ParseErrorPolicy,
    pub tie_break: TieBreak,
    pub bucketing: Bucketing,
}

impl From<&AnalyzerConfig> for AnalysisSettings {
    fn from(config: &AnalyzerConfig) -> Self {
        Self {
            on_parse_error: config.on_parse_error,
            tie_break: config.tie_break,
            bucketing: config.bucketing,
        }
    }
}

/// Parse every line of `reader` into an event log.
///
/// Line numbers in warnings and errors are 1-based. Invalid UTF-8 is
/// replaced rather than rejected, so only the line layout decides whether a
/// line counts.
pub fn read_events<R: BufRead>(mut reader: R, policy: ParseErrorPolicy) -> Result<EventLog> {
    let mut accumulator = EventAccumulator::new();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|e| SweepError::from(e).with_context(format!("line {}", line_no + 1)))?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(['\n', '\r']);

        match parse_line(line) {
            Ok(parsed) => accumulator.record(&parsed),
            Err(e) => match policy {
                ParseErrorPolicy::Skip => {
                    warn!("Error: cannot parse log line no - {}: {}", line_no, e);
                    accumulator.record_unparsed();
                }
                ParseErrorPolicy::Abort => return Err(e.at_line(line_no)),
            },
        }
    }

    let counts = accumulator.counts();
    debug!(
        total = counts.total,
        parsed = counts.parsed,
        unparsed = counts.unparsed,
        "Finished reading log"
    );
    Ok(accumulator.finalize())
}

/// Run the whole analysis over an already opened reader
pub fn analyze_reader<R: BufRead>(reader: R, settings: AnalysisSettings) -> Result<RunSummary> {
    let log = read_events(reader, settings.on_parse_error)?;
    if log.is_empty() {
        info!("No parsable GET requests found");
    }
    let sweeper = ConcurrencySweeper::new(settings.tie_break);
    Ok(summarize(&log, &sweeper, settings.bucketing))
}

/// Open `path` and run the whole analysis over it
pub fn analyze_file(path: &Path, settings: AnalysisSettings) -> Result<RunSummary> {
    info!("process file - {}", path.display());

    let file = File::open(path).map_err(|e| SweepError::from(e).with_path(path))?;
    analyze_reader(BufReader::new(file), settings)
        .map_err(|e| match e {
            SweepError::Input { .. } => e.with_path(path),
            other => other,
        })
}

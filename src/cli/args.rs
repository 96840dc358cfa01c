//! CLI argument structures
//!
//! Flags map one-to-one onto configuration keys; anything left unset falls
//! back to the config file, then the environment, then defaults.

use crate::config::{ChartSinkKind, ConfigOverrides, ParseErrorPolicy, PlotMode};
use crate::summary::Bucketing;
use crate::sweep::TieBreak;
use clap::Parser;
use std::path::PathBuf;

/// Measure request concurrency in an access log
#[derive(Parser, Debug)]
#[command(name = "logsweep")]
#[command(about = "logsweep - Measure request concurrency in an access log", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Access log to analyze
    #[arg(short = 'i', long = "ifile", value_name = "INPUTFILE")]
    pub input: PathBuf,

    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Render the per-day chart [enabled, disabled]
    #[arg(long, value_name = "MODE")]
    pub plot: Option<PlotMode>,

    /// What to do with an unparsable line [skip, abort]
    #[arg(long, value_name = "POLICY")]
    pub on_parse_error: Option<ParseErrorPolicy>,

    /// Order of events sharing a timestamp [input-order, ends-first, starts-first]
    #[arg(long, value_name = "POLICY")]
    pub tie_break: Option<TieBreak>,

    /// Sweep each day separately or all requests at once [per-day, global]
    #[arg(long, value_name = "MODE")]
    pub bucketing: Option<Bucketing>,

    /// Where the chart goes [plotly, file]
    #[arg(long, value_name = "SINK")]
    pub chart_sink: Option<ChartSinkKind>,

    /// Output file for the file chart sink
    #[arg(long, value_name = "PATH")]
    pub chart_output: Option<PathBuf>,
}

impl Cli {
    /// Command-line layer of the configuration
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            on_parse_error: self.on_parse_error,
            tie_break: self.tie_break,
            bucketing: self.bucketing,
            plot: self.plot,
            chart_sink: self.chart_sink,
            chart_output: self.chart_output.clone(),
        }
    }
}

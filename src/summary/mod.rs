//! Run summary built from swept buckets

use crate::events::{EventLog, LineCounts};
use crate::sweep::{ConcurrencySweeper, LevelSet, LevelStats};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How events are grouped before sweeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucketing {
    /// One sweep per calendar day
    #[default]
    PerDay,
    /// A single sweep over every event of the run
    Global,
}

keyword_enum!(Bucketing, "bucketing", {
    "per-day" => Bucketing::PerDay,
    "global" => Bucketing::Global,
});

/// Sweep result of a single day
#[derive(Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub day: String,
    pub requests: usize,
    pub levels: LevelSet,
    pub stats: Option<LevelStats>,
}

impl DaySummary {
    pub fn mean(&self) -> f64 {
        self.stats.map_or(0.0, |s| s.mean)
    }

    pub fn max(&self) -> i64 {
        self.stats.map_or(0, |s| s.max)
    }
}

/// Everything the reporter and chart sinks need
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub counts: LineCounts,
    pub bucketing: Bucketing,
    /// Empty under [`Bucketing::Global`]
    pub per_day: Vec<DaySummary>,
    /// Union of every level observed in any sweep
    pub overall_levels: LevelSet,
    pub overall: Option<LevelStats>,
}

impl RunSummary {
    /// Every line read, parsed or not
    pub fn total_lines(&self) -> usize {
        self.counts.total
    }

    pub fn parsed_requests(&self) -> usize {
        self.counts.parsed
    }

    pub fn unparsed_lines(&self) -> usize {
        self.counts.unparsed
    }

    pub fn day(&self, label: &str) -> Option<&DaySummary> {
        self.per_day.iter().find(|d| d.day == label)
    }
}

/// Sweep the event log and aggregate the results
pub fn summarize(log: &EventLog, sweeper: &ConcurrencySweeper, bucketing: Bucketing) -> RunSummary {
    let mut per_day = Vec::new();
    let mut overall_levels = LevelSet::new();

    match bucketing {
        Bucketing::PerDay => {
            for day in log.days() {
                let events = log.bucket(day).unwrap_or_default();
                let result = sweeper.sweep(events);
                debug!(
                    day = %day,
                    events = events.len(),
                    levels = ?result.levels,
                    "Swept day bucket"
                );

                overall_levels.extend(result.levels.iter().copied());
                per_day.push(DaySummary {
                    day: day.clone(),
                    requests: events.len() / 2,
                    levels: result.levels,
                    stats: result.stats,
                });
            }
        }
        Bucketing::Global => {
            let result = sweeper.sweep(log.all_events());
            debug!(
                events = log.all_events().len(),
                levels = ?result.levels,
                "Swept all events"
            );
            overall_levels = result.levels;
        }
    }

    let overall = LevelStats::from_levels(&overall_levels);

    RunSummary {
        counts: log.counts(),
        bucketing,
        per_day,
        overall_levels,
        overall,
    }
}

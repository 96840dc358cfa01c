//! Request start/end events grouped by day
//!
//! The [`EventAccumulator`] is filled by the parse pass and then frozen into
//! an [`EventLog`], which the sweep and report stages only read.

use crate::parser::ParsedLine;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Format of the day labels cut out of the log timestamp
pub const DAY_LABEL_FORMAT: &str = "%d/%b/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    End,
}

/// A timestamped start or end of one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Seconds since midnight
    pub timestamp: f64,
    pub kind: EventKind,
}

impl Event {
    pub fn start(timestamp: f64) -> Self {
        Self {
            timestamp,
            kind: EventKind::Start,
        }
    }

    pub fn end(timestamp: f64) -> Self {
        Self {
            timestamp,
            kind: EventKind::End,
        }
    }
}

/// How many lines were read, and what became of them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCounts {
    pub total: usize,
    pub parsed: usize,
    pub unparsed: usize,
}

/// Mutable collection point for the parse pass
#[derive(Debug, Default)]
pub struct EventAccumulator {
    buckets: BTreeMap<String, Vec<Event>>,
    all: Vec<Event>,
    counts: LineCounts,
}

impl EventAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start and end of one parsed request
    pub fn record(&mut self, line: &ParsedLine) {
        let pair = [Event::start(line.start), Event::end(line.end)];

        self.buckets
            .entry(line.day.clone())
            .or_default()
            .extend_from_slice(&pair);
        self.all.extend_from_slice(&pair);

        self.counts.total += 1;
        self.counts.parsed += 1;
    }

    /// Count a line that produced no events
    pub fn record_unparsed(&mut self) {
        self.counts.total += 1;
        self.counts.unparsed += 1;
    }

    pub fn counts(&self) -> LineCounts {
        self.counts
    }

    /// Freeze the accumulated events
    pub fn finalize(self) -> EventLog {
        let mut days: Vec<String> = self.buckets.keys().cloned().collect();
        days.sort_by(|a, b| day_sort_key(a).cmp(&day_sort_key(b)));

        EventLog {
            buckets: self.buckets,
            days,
            all: self.all,
            counts: self.counts,
        }
    }
}

/// Read-only events of a finished parse pass
#[derive(Debug, Clone)]
pub struct EventLog {
    buckets: BTreeMap<String, Vec<Event>>,
    days: Vec<String>,
    all: Vec<Event>,
    counts: LineCounts,
}

impl EventLog {
    /// Day labels in calendar order; labels that are not valid dates come last
    pub fn days(&self) -> &[String] {
        &self.days
    }

    /// Events of one day in insertion order
    pub fn bucket(&self, day: &str) -> Option<&[Event]> {
        self.buckets.get(day).map(Vec::as_slice)
    }

    /// Every event of the run in insertion order, ignoring days
    pub fn all_events(&self) -> &[Event] {
        &self.all
    }

    pub fn counts(&self) -> LineCounts {
        self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Parse a day label, if it is a well-formed `dd/Mon/yyyy`
pub fn parse_day(label: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(label, DAY_LABEL_FORMAT).ok()
}

fn day_sort_key(label: &str) -> (bool, Option<NaiveDate>, &str) {
    let date = parse_day(label);
    (date.is_none(), date, label)
}

//! Concurrency sweep over start/end events
//!
//! Events are walked in timestamp order with a running counter: +1 on a
//! start, -1 on an end. Every counter value reached is recorded in a
//! level-set, and statistics are taken over that set of *distinct* levels.
//! The resulting mean is not time-weighted.
//!
//! There is no guard against a negative counter. An end without a matching
//! start shows up as a negative level.

use crate::events::{Event, EventKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinct concurrency levels visited during one sweep
pub type LevelSet = BTreeSet<i64>;

/// Order of start and end events that share a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Ends before starts, so touching `[start, end)` intervals never overlap.
    /// A zero-length request records its end first and dips to -1.
    EndsFirst,
    /// Starts before ends
    StartsFirst,
    /// Keep the order in which the events were recorded
    #[default]
    InputOrder,
}

keyword_enum!(TieBreak, "tie-break", {
    "input-order" => TieBreak::InputOrder,
    "ends-first" => TieBreak::EndsFirst,
    "starts-first" => TieBreak::StartsFirst,
});

impl TieBreak {
    fn rank(&self, kind: EventKind) -> u8 {
        match (self, kind) {
            (Self::EndsFirst, EventKind::End) | (Self::StartsFirst, EventKind::Start) => 0,
            (Self::EndsFirst, EventKind::Start) | (Self::StartsFirst, EventKind::End) => 1,
            (Self::InputOrder, _) => 0,
        }
    }
}

/// Minimum, mean and maximum of a level-set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    pub min: i64,
    pub mean: f64,
    pub max: i64,
}

impl LevelStats {
    /// `None` when no level was ever recorded
    pub fn from_levels(levels: &LevelSet) -> Option<Self> {
        let min = *levels.first()?;
        let max = *levels.last()?;
        let sum: f64 = levels.iter().map(|&level| level as f64).sum();

        Some(Self {
            min,
            mean: sum / levels.len() as f64,
            max,
        })
    }
}

/// Result of sweeping one bucket
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub levels: LevelSet,
    pub stats: Option<LevelStats>,
}

/// Runs sweeps with a fixed tie-break policy
#[derive(Debug, Clone, Copy, Default)]
pub struct ConcurrencySweeper {
    tie_break: TieBreak,
}

impl ConcurrencySweeper {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    /// Counter value after each event, in sweep order
    pub fn trace(&self, events: &[Event]) -> Vec<i64> {
        let mut order: Vec<&Event> = events.iter().collect();
        // Stable sort: equal keys keep recording order. NaN timestamps sort last.
        order.sort_by(|a, b| {
            a.timestamp
                .total_cmp(&b.timestamp)
                .then_with(|| self.tie_break.rank(a.kind).cmp(&self.tie_break.rank(b.kind)))
        });

        let mut counter: i64 = 0;
        order
            .into_iter()
            .map(|event| {
                match event.kind {
                    EventKind::Start => counter += 1,
                    EventKind::End => counter -= 1,
                }
                counter
            })
            .collect()
    }

    /// Distinct levels visited and their statistics
    pub fn sweep(&self, events: &[Event]) -> SweepResult {
        let levels: LevelSet = self.trace(events).into_iter().collect();
        let stats = LevelStats::from_levels(&levels);
        SweepResult { levels, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: f64, end: f64) -> [Event; 2] {
        [Event::start(start), Event::end(end)]
    }

    fn levels(values: &[i64]) -> LevelSet {
        values.iter().copied().collect()
    }

    #[test]
    fn test_single_request() {
        let result = ConcurrencySweeper::default().sweep(&request(100.0, 101.5));

        assert_eq!(result.levels, levels(&[0, 1]));
        let stats = result.stats.unwrap();
        assert_eq!(stats.mean, 0.5);
        assert_eq!(stats.max, 1);
        assert_eq!(stats.min, 0);
    }

    #[test]
    fn test_overlapping_requests() {
        let mut events = request(10.0, 20.0).to_vec();
        events.extend(request(15.0, 25.0));

        let sweeper = ConcurrencySweeper::default();
        assert_eq!(sweeper.trace(&events), vec![1, 2, 1, 0]);

        let result = sweeper.sweep(&events);
        assert_eq!(result.levels, levels(&[0, 1, 2]));
        assert_eq!(result.stats.unwrap().mean, 1.0);
    }

    #[test]
    fn test_unsorted_input_is_sorted_by_timestamp() {
        let events = vec![
            Event::end(25.0),
            Event::start(15.0),
            Event::end(20.0),
            Event::start(10.0),
        ];
        let trace = ConcurrencySweeper::default().trace(&events);
        assert_eq!(trace, vec![1, 2, 1, 0]);
    }

    #[test]
    fn test_mean_is_over_distinct_levels() {
        // Three disjoint requests visit 1 and 0 repeatedly
        let mut events = Vec::new();
        for i in 0..3 {
            events.extend(request(i as f64 * 10.0, i as f64 * 10.0 + 1.0));
        }

        let result = ConcurrencySweeper::default().sweep(&events);
        assert_eq!(result.levels, levels(&[0, 1]));
        assert_eq!(result.stats.unwrap().mean, 0.5);
    }

    #[test]
    fn test_unmatched_end_goes_negative() {
        let events = vec![Event::end(1.0), Event::start(2.0), Event::end(3.0)];
        let result = ConcurrencySweeper::default().sweep(&events);

        assert_eq!(result.levels, levels(&[-1, 0]));
        assert_eq!(result.stats.unwrap().min, -1);
    }

    #[test]
    fn test_zero_length_request_under_ends_first() {
        let events = request(5.0, 5.0);

        let default = ConcurrencySweeper::default().sweep(&events);
        assert_eq!(default.levels, levels(&[0, 1]));

        let ends_first = ConcurrencySweeper::new(TieBreak::EndsFirst).sweep(&events);
        assert_eq!(ends_first.levels, levels(&[-1, 0]));
    }

    #[test]
    fn test_tie_break_policies() {
        // The first request ends exactly when the second starts
        let mut events = request(10.0, 20.0).to_vec();
        events.extend(request(20.0, 30.0));

        let ends_first = ConcurrencySweeper::new(TieBreak::EndsFirst).sweep(&events);
        assert_eq!(ends_first.stats.unwrap().max, 1);

        let starts_first = ConcurrencySweeper::new(TieBreak::StartsFirst).sweep(&events);
        assert_eq!(starts_first.stats.unwrap().max, 2);

        // Recorded order is end(20) then start(20)
        let input_order = ConcurrencySweeper::new(TieBreak::InputOrder).sweep(&events);
        assert_eq!(input_order.stats.unwrap().max, 1);

        let reversed: Vec<Event> = events.iter().rev().copied().collect();
        let input_order = ConcurrencySweeper::new(TieBreak::InputOrder).sweep(&reversed);
        assert_eq!(input_order.stats.unwrap().max, 2);
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let mut events = request(1.0, 5.0).to_vec();
        events.extend(request(2.0, 3.0));
        events.extend(request(2.5, 9.0));
        let before = events.clone();

        let sweeper = ConcurrencySweeper::default();
        let first = sweeper.sweep(&events);
        let second = sweeper.sweep(&events);

        assert_eq!(first, second);
        assert_eq!(events, before);
    }

    #[test]
    fn test_empty_sweep() {
        let result = ConcurrencySweeper::default().sweep(&[]);
        assert!(result.levels.is_empty());
        assert!(result.stats.is_none());
    }

    #[test]
    fn test_tie_break_from_str() {
        assert_eq!("ends-first".parse::<TieBreak>(), Ok(TieBreak::EndsFirst));
        assert_eq!("Input-Order".parse::<TieBreak>(), Ok(TieBreak::InputOrder));
        assert!("sideways".parse::<TieBreak>().is_err());
        assert_eq!(TieBreak::StartsFirst.to_string(), "starts-first");

        for keyword in TieBreak::VARIANTS {
            let tie_break: TieBreak = keyword.parse().unwrap();
            assert_eq!(tie_break.as_str(), *keyword);
        }

        let err = "sideways".parse::<TieBreak>().unwrap_err();
        assert!(err.contains("unknown tie-break 'sideways'"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arb_requests() -> impl Strategy<Value = Vec<Event>> {
            prop::collection::vec((0u32..86_400, 0u32..5_000_000), 0..50).prop_map(|pairs| {
                pairs
                    .into_iter()
                    .flat_map(|(start, micros)| {
                        let start = start as f64;
                        request(start, start + micros as f64 / 1_000_000.0)
                    })
                    .collect()
            })
        }

        proptest! {
            #[test]
            fn test_well_formed_input_returns_to_zero(events in arb_requests()) {
                let trace = ConcurrencySweeper::default().trace(&events);
                prop_assert_eq!(trace.len(), events.len());
                if let Some(last) = trace.last() {
                    prop_assert_eq!(*last, 0);
                }
                prop_assert!(trace.iter().all(|&level| level >= 0));
            }

            #[test]
            fn test_stats_bounded_by_levels(events in arb_requests()) {
                let result = ConcurrencySweeper::default().sweep(&events);
                if let Some(stats) = result.stats {
                    prop_assert!(stats.min as f64 <= stats.mean);
                    prop_assert!(stats.mean <= stats.max as f64);
                    prop_assert!(stats.max as usize <= events.len() / 2);
                }
            }
        }
    }
}

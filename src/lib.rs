//! # logsweep
//!
//! Measures how many requests were in flight at once in an access log.
//!
//! ## Usage
//!
//! ```bash
//! logsweep -i access.log [--plot enabled] [--bucketing global] [-v]
//! ```
//!
//! ## Modules
//!
//! - `parser` - Access log line parsing and time normalization
//! - `events` - Start/end events grouped by day
//! - `sweep` - Concurrency sweep over a sequence of events
//! - `summary` - Per-day and overall statistics
//! - `pipeline` - Read, parse, bucket, sweep and summarize a log
//! - `report` - Text report and chart sinks
//! - `config` - Layered configuration (file, environment, flags)
//! - `error` - Error types with codes and exit statuses
//! - `app` / `cli` - Binary entry points
#[macro_use]
mod macros;

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod summary;
pub mod sweep;

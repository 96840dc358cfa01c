//! Access log line parsing
//!
//! Lines are expected in an Apache-combined-like layout with one extra field
//! appended: the response time in microseconds.
//!
//! ```text
//! 10.0.0.1 - - [12/Mar/2015:10:00:00 -0700] "GET /resolve HTTP/1.1" 200 512 "-" "curl" 1500000
//! ```
//!
//! Only the request timestamp and the response time are used. Timestamp
//! fields are cut at fixed offsets from the bracket, so the layout must be
//! exactly `[dd/Mon/yyyy:hh:mm:ss ...]`. A single-digit day shifts every
//! field by one and produces wrong values without failing.

pub mod time;

use crate::error::{ErrorCode, SweepError};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub use time::to_seconds;

/// Prefix, quoted GET request, trailing response time
static GET_REQUEST_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)(.*) "GET.*" (.*)"#).expect("Valid regex pattern"));

/// Separator between the client identity and the bracketed timestamp
pub const TIMESTAMP_SEPARATOR: &str = " - - ";

/// Microseconds per second
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Why a single line could not be turned into a request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error("not a GET request with a trailing response time")]
    NoGetRequest,

    #[error("no ' - - ' separator before the timestamp")]
    MissingSeparator,

    #[error("bracketed timestamp too short or malformed: {0:?}")]
    TruncatedTimestamp(String),

    #[error("time of day is not hh:mm:ss: {0:?}")]
    InvalidTime(String),

    #[error("response time is not a number: {0:?}")]
    InvalidResponseTime(String),
}

impl LineError {
    pub fn code(&self) -> u16 {
        match self {
            Self::NoGetRequest => ErrorCode::PARSE_NO_GET_REQUEST,
            Self::MissingSeparator => ErrorCode::PARSE_MISSING_SEPARATOR,
            Self::TruncatedTimestamp(_) => ErrorCode::PARSE_TRUNCATED_TIMESTAMP,
            Self::InvalidTime(_) => ErrorCode::PARSE_INVALID_TIME,
            Self::InvalidResponseTime(_) => ErrorCode::PARSE_INVALID_RESPONSE_TIME,
        }
    }

    /// Attach the 1-based line number
    pub fn at_line(self, line: usize) -> SweepError {
        SweepError::parse(self.code(), line, self.to_string())
    }
}

/// One request extracted from a log line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    /// `dd/Mon/yyyy` as it appears in the log
    pub day: String,
    /// Seconds since midnight
    pub start: f64,
    /// `start` plus the response time in seconds
    pub end: f64,
}

/// The fixed-width fields cut out of the text following ` - - `
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFields<'a> {
    pub day: &'a str,
    pub time_of_day: &'a str,
}

/// Cut the day label and time of day out of `[dd/Mon/yyyy:hh:mm:ss ...`.
///
/// Day is bytes 1..12, time is bytes 13..21 (clamped to the input length).
pub fn timestamp_fields(bracketed: &str) -> Result<TimestampFields<'_>, LineError> {
    let truncated = || LineError::TruncatedTimestamp(bracketed.to_string());

    let day = bracketed.get(1..12).ok_or_else(truncated)?;
    let time_end = bracketed.len().min(21);
    let time_of_day = bracketed.get(13..time_end).ok_or_else(truncated)?;

    Ok(TimestampFields { day, time_of_day })
}

/// Parse a single log line into a request with start and end times.
pub fn parse_line(line: &str) -> Result<ParsedLine, LineError> {
    let captures = GET_REQUEST_REGEX
        .captures(line)
        .ok_or(LineError::NoGetRequest)?;

    let prefix = captures.get(1).map_or("", |m| m.as_str());
    let response = captures.get(2).map_or("", |m| m.as_str());

    let (_, bracketed) = prefix
        .split_once(TIMESTAMP_SEPARATOR)
        .ok_or(LineError::MissingSeparator)?;

    let fields = timestamp_fields(bracketed)?;
    let start = to_seconds(fields.time_of_day)? as f64;

    let micros: f64 = response
        .trim()
        .parse()
        .map_err(|_| LineError::InvalidResponseTime(response.trim().to_string()))?;

    Ok(ParsedLine {
        day: fields.day.to_string(),
        start,
        end: start + micros / MICROS_PER_SECOND,
    })
}

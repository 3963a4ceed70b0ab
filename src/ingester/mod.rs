//! Feed ingestion
//!
//! Turns pasted, loosely formatted text into typed records. Every line is
//! parsed on its own: a line that does not fit the grammar is logged and
//! skipped, the rest of the batch still goes through.

pub mod odds;
pub mod results;

#[cfg(test)]
mod tests;

pub use odds::{parse_odd_line, parse_odds};
pub use results::{parse_result_line, parse_results};

use thiserror::Error;

/// Why a single line was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error("expected at least {expected} comma-separated fields, got {found}")]
    MissingFields { expected: usize, found: usize },

    #[error("no score found")]
    MissingScore,

    #[error("goals out of range: {0}")]
    GoalsOutOfRange(String),

    #[error("empty team name")]
    EmptyTeam,

    #[error("event '{0}' does not name two teams")]
    InvalidEvent(String),

    #[error("field {field} is not a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// Non-empty trimmed lines of `input`
fn data_lines(input: &str) -> impl Iterator<Item = &str> {
    input.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Header heuristic: the line mentions "time" and the given column keyword.
/// A data line that happens to contain both words is dropped as well.
fn is_header(line: &str, keyword: &str) -> bool {
    let lower = line.to_lowercase();
    lower.contains("time") && lower.contains(keyword)
}

/// Run `parse_line` over every data line, keeping only the lines that parse
fn parse_lines<T>(
    input: &str,
    header_keyword: &str,
    kind: &str,
    parse_line: fn(&str) -> Result<T, LineError>,
) -> Vec<T> {
    let mut records = Vec::new();
    for line in data_lines(input) {
        if is_header(line, header_keyword) {
            continue;
        }
        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(e) => tracing::debug!("Skipping {} line '{}': {}", kind, line, e),
        }
    }
    records
}

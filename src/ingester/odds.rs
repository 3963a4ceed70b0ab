//! Upcoming fixtures feed
//!
//! Format: `Time,Event,1,X,2,Goals,Over,Under`,
//! e.g. `05:36,FCA - HDH,2.51,3.46,2.93,2.5,2.32,1.64`

use super::{parse_lines, LineError};
use crate::types::ParsedOdd;

const FIELD_COUNT: usize = 8;

/// Parse an odds feed, skipping the header and every malformed line
pub fn parse_odds(input: &str) -> Vec<ParsedOdd> {
    parse_lines(input, "event", "odds", parse_odd_line)
}

/// Parse one odds line. All six prices must be numbers or the line is dropped.
pub fn parse_odd_line(line: &str) -> Result<ParsedOdd, LineError> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() < FIELD_COUNT {
        return Err(LineError::MissingFields {
            expected: FIELD_COUNT,
            found: parts.len(),
        });
    }

    let event = parts[1];
    // Only the first two pieces are kept, so "A-B - C" yields "A" vs "B".
    let teams: Vec<&str> = event.split('-').map(str::trim).collect();
    if teams.len() < 2 {
        return Err(LineError::InvalidEvent(event.to_string()));
    }

    Ok(ParsedOdd {
        time: parts[0].to_string(),
        home_team: teams[0].to_string(),
        away_team: teams[1].to_string(),
        odd1: number("1", parts[2])?,
        odd_x: number("X", parts[3])?,
        odd2: number("2", parts[4])?,
        goal_line: number("goals", parts[5])?,
        over_odd: number("over", parts[6])?,
        under_odd: number("under", parts[7])?,
    })
}

fn number(field: &'static str, value: &str) -> Result<f64, LineError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LineError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

//! Historical results feed
//!
//! Format: `Time,Result`, e.g. `08:24,LEV 0-2 HSV`

use super::{parse_lines, LineError};
use crate::types::ParsedResult;
use once_cell::sync::Lazy;
use regex::Regex;

// ASCII digits only; the leftmost match is taken as the score.
static SCORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)-([0-9]+)").expect("score pattern is valid")
});

/// Parse a results feed, skipping the header and every malformed line
pub fn parse_results(input: &str) -> Vec<ParsedResult> {
    parse_lines(input, "result", "result", parse_result_line)
}

/// Parse one `time,<home> <h>-<a> <away>` line
pub fn parse_result_line(line: &str) -> Result<ParsedResult, LineError> {
    let (time, rest) = line
        .split_once(',')
        .ok_or(LineError::MissingFields { expected: 2, found: 1 })?;
    let time = time.trim();
    let match_str = rest.trim();

    let caps = SCORE.captures(match_str).ok_or(LineError::MissingScore)?;
    let (Some(score), Some(home_goals), Some(away_goals)) = (caps.get(0), caps.get(1), caps.get(2))
    else {
        return Err(LineError::MissingScore);
    };

    let home_goals: u32 = home_goals
        .as_str()
        .parse()
        .map_err(|_| LineError::GoalsOutOfRange(score.as_str().to_string()))?;
    let away_goals: u32 = away_goals
        .as_str()
        .parse()
        .map_err(|_| LineError::GoalsOutOfRange(score.as_str().to_string()))?;
    if home_goals.checked_add(away_goals).is_none() {
        return Err(LineError::GoalsOutOfRange(score.as_str().to_string()));
    }

    let home_team = match_str[..score.start()].trim();
    let away_team = match_str[score.end()..].trim();
    if home_team.is_empty() || away_team.is_empty() {
        return Err(LineError::EmptyTeam);
    }

    Ok(ParsedResult::new(time, home_team, away_team, home_goals, away_goals))
}

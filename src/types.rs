//! Core record types shared by the parser, the model and storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A finished match parsed from a results feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub total_goals: u32,
    pub over15: bool,
    pub over25: bool,
}

impl ParsedResult {
    /// Build a result, deriving the total (saturating at `u32::MAX`) and the over flags
    pub fn new(
        time: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_goals: u32,
        away_goals: u32,
    ) -> Self {
        let total_goals = home_goals.saturating_add(away_goals);
        Self {
            time: time.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_goals,
            away_goals,
            total_goals,
            over15: total_goals >= 2,
            over25: total_goals >= 3,
        }
    }
}

/// Market prices for one upcoming fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedOdd {
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    pub odd1: f64,
    pub odd_x: f64,
    pub odd2: f64,
    pub goal_line: f64,
    pub over_odd: f64,
    pub under_odd: f64,
}

/// Per-team summary over every stored appearance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub avg_goals_scored: f64,
    pub avg_goals_conceded: f64,
    /// Percentage (0-100) of appearances with 2+ total goals
    pub over15_rate: f64,
    /// Percentage (0-100) of appearances with 3+ total goals
    pub over25_rate: f64,
    pub match_count: usize,
}

/// Betting recommendation for a fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "LOCK_2_PLUS_GOALS")]
    Lock2PlusGoals,
    #[serde(rename = "SAFE_OVER_1_5")]
    SafeOver15,
    #[serde(rename = "AVOID")]
    Avoid,
}

impl Decision {
    /// Stable code used on the wire and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Lock2PlusGoals => "LOCK_2_PLUS_GOALS",
            Decision::SafeOver15 => "SAFE_OVER_1_5",
            Decision::Avoid => "AVOID",
        }
    }

    /// Human-facing label
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Lock2PlusGoals => "LOCK 2+ GOALS",
            Decision::SafeOver15 => "SAFE OVER 1.5",
            Decision::Avoid => "AVOID",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOCK_2_PLUS_GOALS" | "LOCK 2+ GOALS" => Ok(Decision::Lock2PlusGoals),
            "SAFE_OVER_1_5" | "SAFE OVER 1.5" => Ok(Decision::SafeOver15),
            "AVOID" => Ok(Decision::Avoid),
            other => Err(format!("unknown decision: {}", other)),
        }
    }
}

/// Model output for one fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub home_team: String,
    pub away_team: String,
    pub combined_expected_goals: f64,
    /// Not clamped to 0-100
    pub over15_probability: f64,
    /// Not clamped to 0-100
    pub over25_probability: f64,
    pub decision: Decision,
    pub confidence_score: f64,
}

/// A result row as handed back by storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResult {
    pub id: i64,
    #[serde(flatten)]
    pub result: ParsedResult,
    pub created_at: DateTime<Utc>,
}

/// An odds row as handed back by storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOdd {
    pub id: i64,
    #[serde(flatten)]
    pub odd: ParsedOdd,
    pub created_at: DateTime<Utc>,
}

impl StoredOdd {
    pub fn fixture(&self) -> FixtureSummary {
        FixtureSummary {
            time: self.odd.time.clone(),
            home_team: self.odd.home_team.clone(),
            away_team: self.odd.away_team.clone(),
        }
    }
}

/// A persisted analysis, keyed to the odds row it was computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPrediction {
    pub id: i64,
    pub odd_id: i64,
    pub combined_expected_goals: f64,
    pub over15_probability: f64,
    pub over25_probability: f64,
    pub decision: Decision,
    pub confidence_score: f64,
    pub created_at: DateTime<Utc>,
}

impl StoredPrediction {
    pub fn new(id: i64, odd_id: i64, analysis: &AnalysisResult, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            odd_id,
            combined_expected_goals: analysis.combined_expected_goals,
            over15_probability: analysis.over15_probability,
            over25_probability: analysis.over25_probability,
            decision: analysis.decision,
            confidence_score: analysis.confidence_score,
            created_at,
        }
    }
}

/// Who played and when, taken from the odds row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSummary {
    pub time: String,
    pub home_team: String,
    pub away_team: String,
}

/// Prediction joined with its fixture; `fixture` is `None` when the odds row is gone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionView {
    #[serde(flatten)]
    pub prediction: StoredPrediction,
    pub fixture: Option<FixtureSummary>,
}

//! Over/under goals model
//!
//! Combines two teams' [`TeamStats`] into an additive expected-goals
//! estimate, blends it with the historical over-rates into over 1.5 / 2.5
//! probabilities, and derives a [`Decision`] plus a 0-100 confidence score.
//! Probabilities are deliberately left unclamped.


use crate::analysis::StatsAggregator;
use crate::error::Result;
use crate::storage::Repository;
use crate::types::{AnalysisResult, Decision, TeamStats};
use std::sync::Arc;

/// Weight of the historical over-rate in the probability blend
const RATE_WEIGHT: f64 = 0.6;
/// Weight of the expected-goals indicator in the probability blend
const XG_WEIGHT: f64 = 0.4;
const XG_HIT: f64 = 30.0;
const XG_MISS: f64 = 10.0;

const LOCK_MIN_EXPECTED_GOALS: f64 = 2.4;
const LOCK_MIN_OVER15: f64 = 70.0;
const SAFE_MIN_EXPECTED_GOALS: f64 = 2.0;

/// Both teams need this many appearances for full data quality
const FULL_DATA_MATCHES: usize = 5;
const PARTIAL_DATA_QUALITY: f64 = 0.7;
/// Max distance between expected goals and the market line to count as aligned
const LINE_ALIGNMENT_BAND: f64 = 0.5;
const MISALIGNED_LINE: f64 = 0.8;

/// Round half-up to two decimals
pub fn round2(x: f64) -> f64 {
    (x * 100.0 + 0.5).floor() / 100.0
}

/// Additive expected-goals estimate for a fixture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

impl ExpectedGoals {
    /// Each side's attack averaged with the opponent's defence
    pub fn from_stats(home: &TeamStats, away: &TeamStats) -> Self {
        Self {
            home: (home.avg_goals_scored + away.avg_goals_conceded) / 2.0,
            away: (away.avg_goals_scored + home.avg_goals_conceded) / 2.0,
        }
    }

    pub fn combined(&self) -> f64 {
        self.home + self.away
    }
}

fn blend(home_rate: f64, away_rate: f64, combined: f64, goals_needed: f64) -> f64 {
    let indicator = if combined >= goals_needed { XG_HIT } else { XG_MISS };
    (home_rate + away_rate) / 2.0 * RATE_WEIGHT + indicator * XG_WEIGHT
}

/// Probability (percent, unclamped) of two or more goals
pub fn over15_probability(home: &TeamStats, away: &TeamStats, combined: f64) -> f64 {
    blend(home.over15_rate, away.over15_rate, combined, 2.0)
}

/// Probability (percent, unclamped) of three or more goals
pub fn over25_probability(home: &TeamStats, away: &TeamStats, combined: f64) -> f64 {
    blend(home.over25_rate, away.over25_rate, combined, 3.0)
}

impl Decision {
    /// First matching rule wins: lock, then safe, then avoid
    pub fn from_model(combined_expected_goals: f64, over15_probability: f64) -> Self {
        if combined_expected_goals >= LOCK_MIN_EXPECTED_GOALS
            && over15_probability >= LOCK_MIN_OVER15
        {
            Decision::Lock2PlusGoals
        } else if combined_expected_goals >= SAFE_MIN_EXPECTED_GOALS {
            Decision::SafeOver15
        } else {
            Decision::Avoid
        }
    }
}

/// Weighted composite of probability, sample size, rate agreement and line fit
pub fn confidence_score(
    home: &TeamStats,
    away: &TeamStats,
    combined_expected_goals: f64,
    over15_probability: f64,
    goal_line: f64,
) -> f64 {
    let data_quality = if home.match_count.min(away.match_count) >= FULL_DATA_MATCHES {
        1.0
    } else {
        PARTIAL_DATA_QUALITY
    };
    let consistency = (100.0 - (home.over15_rate - away.over15_rate).abs()) / 100.0;
    let line_alignment = if (combined_expected_goals - goal_line).abs() < LINE_ALIGNMENT_BAND {
        1.0
    } else {
        MISALIGNED_LINE
    };

    ((over15_probability / 100.0) * 0.4
        + data_quality * 0.3
        + consistency * 0.2
        + line_alignment * 0.1)
        * 100.0
}

/// Run the model on already aggregated stats. Never fails.
pub fn predict(
    home_team: &str,
    away_team: &str,
    home: &TeamStats,
    away: &TeamStats,
    goal_line: f64,
) -> AnalysisResult {
    let combined = ExpectedGoals::from_stats(home, away).combined();
    let over15 = over15_probability(home, away, combined);
    let over25 = over25_probability(home, away, combined);
    let decision = Decision::from_model(combined, over15);
    let confidence = confidence_score(home, away, combined, over15, goal_line);

    AnalysisResult {
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        combined_expected_goals: round2(combined),
        over15_probability: round2(over15),
        over25_probability: round2(over25),
        decision,
        confidence_score: round2(confidence),
    }
}

/// Looks up both teams' history and runs the model
pub struct MatchAnalyzer<R: Repository> {
    stats: StatsAggregator<R>,
}

impl<R: Repository> MatchAnalyzer<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            stats: StatsAggregator::new(repo),
        }
    }

    pub async fn analyze_match(
        &self,
        home_team: &str,
        away_team: &str,
        goal_line: f64,
    ) -> Result<AnalysisResult> {
        let home = self.stats.team_stats(home_team).await?;
        let away = self.stats.team_stats(away_team).await?;
        let analysis = predict(home_team, away_team, &home, &away, goal_line);

        tracing::debug!(
            "{} vs {}: xG={:.2} o1.5={:.2} o2.5={:.2} -> {} ({:.2})",
            home_team,
            away_team,
            analysis.combined_expected_goals,
            analysis.over15_probability,
            analysis.over25_probability,
            analysis.decision,
            analysis.confidence_score
        );
        Ok(analysis)
    }
}

//! Team statistics
//!
//! Summarises every stored appearance of a team into scoring, conceding and
//! over-rate averages. Home and away appearances are pooled, no recency
//! weighting.


use crate::error::Result;
use crate::storage::Repository;
use crate::types::{ParsedResult, TeamStats};
use std::sync::Arc;

/// League-average stand-in used when a team has no history
pub const COLD_START: TeamStats = TeamStats {
    avg_goals_scored: 1.5,
    avg_goals_conceded: 1.5,
    over15_rate: 50.0,
    over25_rate: 40.0,
    match_count: 0,
};

impl TeamStats {
    pub fn cold_start() -> Self {
        COLD_START
    }

    /// Aggregate `team`'s appearances in `results`.
    ///
    /// A record counts once as a home appearance when the team is the home
    /// side and once as an away appearance when it is the away side; records
    /// the team did not play in are ignored.
    pub fn from_results(team: &str, results: &[ParsedResult]) -> Self {
        let mut appearances = 0usize;
        let mut scored = 0u64;
        let mut conceded = 0u64;
        let mut over15 = 0usize;
        let mut over25 = 0usize;

        for r in results {
            let sides = [
                (r.home_team == team, r.home_goals, r.away_goals),
                (r.away_team == team, r.away_goals, r.home_goals),
            ];
            for (played, goals_for, goals_against) in sides {
                if !played {
                    continue;
                }
                appearances += 1;
                scored += u64::from(goals_for);
                conceded += u64::from(goals_against);
                over15 += usize::from(r.over15);
                over25 += usize::from(r.over25);
            }
        }

        if appearances == 0 {
            return Self::cold_start();
        }

        let n = appearances as f64;
        Self {
            avg_goals_scored: scored as f64 / n,
            avg_goals_conceded: conceded as f64 / n,
            over15_rate: over15 as f64 / n * 100.0,
            over25_rate: over25 as f64 / n * 100.0,
            match_count: appearances,
        }
    }
}

/// Computes [`TeamStats`] from the historical results in a repository
pub struct StatsAggregator<R: Repository> {
    repo: Arc<R>,
}

impl<R: Repository> Clone for StatsAggregator<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: Repository> StatsAggregator<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn team_stats(&self, team: &str) -> Result<TeamStats> {
        let results = self.repo.find_results_by_team(team).await?;
        let stats = TeamStats::from_results(team, &results);
        if stats.match_count == 0 {
            tracing::debug!("No history for {}, using cold-start prior", team);
        }
        Ok(stats)
    }
}

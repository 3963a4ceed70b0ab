//! Feed ingestion pipeline
//!
//! ```text
//! results text → parse → store batch
//! odds text    → parse → for each fixture: store odd → analyze → store prediction
//! ```
//!
//! Fixtures are handled strictly one after another. A fixture whose analysis
//! fails is recorded as skipped and the loop moves on.


use crate::error::{FeedError, Result};
use crate::ingester::{parse_odds, parse_results};
use crate::model::MatchAnalyzer;
use crate::storage::Repository;
use crate::types::{FixtureSummary, ParsedOdd, PredictionView, StoredOdd, StoredResult};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of a results upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsIngest {
    pub count: usize,
}

/// What happened to one fixture of an odds upload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum FixtureOutcome {
    Analyzed(PredictionView),
    Skipped { odd_id: i64, reason: String },
}

/// Outcome of an odds upload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsIngest {
    pub odds_count: usize,
    pub outcomes: Vec<FixtureOutcome>,
}

impl OddsIngest {
    pub fn predictions(&self) -> Vec<&PredictionView> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                FixtureOutcome::Analyzed(view) => Some(view),
                FixtureOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    pub fn predictions_count(&self) -> usize {
        self.predictions().len()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.predictions_count()
    }
}

/// Parses feeds, stores them and runs the model over new fixtures
pub struct FeedService<R: Repository> {
    repo: Arc<R>,
    analyzer: MatchAnalyzer<R>,
}

impl<R: Repository> FeedService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            analyzer: MatchAnalyzer::new(Arc::clone(&repo)),
            repo,
        }
    }

    pub fn analyzer(&self) -> &MatchAnalyzer<R> {
        &self.analyzer
    }

    /// Parse and store a historical results feed
    pub async fn ingest_results(&self, input: &str) -> Result<ResultsIngest> {
        let parsed = parse_results(input);
        if parsed.is_empty() {
            return Err(FeedError::NoValidRecords("results"));
        }

        let count = self.repo.store_results(&parsed).await?;
        tracing::info!("Stored {} results", count);
        Ok(ResultsIngest { count })
    }

    /// Parse an odds feed, store every fixture and analyze each in turn.
    ///
    /// Failing to store an odd aborts the batch; failing to analyze one only
    /// skips that fixture.
    pub async fn ingest_odds(&self, input: &str) -> Result<OddsIngest> {
        let parsed = parse_odds(input);
        if parsed.is_empty() {
            return Err(FeedError::NoValidRecords("odds"));
        }

        let mut outcomes = Vec::with_capacity(parsed.len());
        for odd in &parsed {
            let odd_id = self.repo.store_odd(odd).await?;

            let outcome = match self.predict_fixture(odd_id, odd).await {
                Ok(view) => FixtureOutcome::Analyzed(view),
                Err(e) => {
                    tracing::warn!(
                        "Failed to analyze {} vs {}: {}",
                        odd.home_team,
                        odd.away_team,
                        e
                    );
                    FixtureOutcome::Skipped {
                        odd_id,
                        reason: e.to_string(),
                    }
                }
            };
            outcomes.push(outcome);
        }

        let ingest = OddsIngest {
            odds_count: parsed.len(),
            outcomes,
        };
        tracing::info!(
            "Stored {} odds, generated {} predictions ({} skipped)",
            ingest.odds_count,
            ingest.predictions_count(),
            ingest.skipped_count()
        );
        Ok(ingest)
    }

    async fn predict_fixture(&self, odd_id: i64, odd: &ParsedOdd) -> Result<PredictionView> {
        let analysis = self
            .analyzer
            .analyze_match(&odd.home_team, &odd.away_team, odd.goal_line)
            .await?;
        let prediction = self.repo.store_prediction(&analysis, odd_id).await?;

        Ok(PredictionView {
            prediction,
            fixture: Some(FixtureSummary {
                time: odd.time.clone(),
                home_team: analysis.home_team,
                away_team: analysis.away_team,
            }),
        })
    }

    pub async fn recent_results(&self, limit: usize) -> Result<Vec<StoredResult>> {
        self.repo.list_recent_results(limit).await
    }

    pub async fn recent_odds(&self, limit: usize) -> Result<Vec<StoredOdd>> {
        self.repo.list_recent_odds(limit).await
    }

    pub async fn recent_predictions(&self, limit: usize) -> Result<Vec<PredictionView>> {
        self.repo.list_recent_predictions(limit).await
    }
}

//! In-memory repository

use super::Repository;
use crate::error::Result;
use crate::types::{
    AnalysisResult, ParsedOdd, ParsedResult, PredictionView, StoredOdd, StoredPrediction,
    StoredResult,
};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

#[derive(Default)]
struct Tables {
    results: Vec<StoredResult>,
    odds: Vec<StoredOdd>,
    predictions: Vec<StoredPrediction>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

/// Repository kept entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop an odds row, leaving any predictions that reference it dangling
    #[cfg(test)]
    pub fn remove_odd(&self, odd_id: i64) -> bool {
        let mut tables = self.tables.lock();
        let before = tables.odds.len();
        tables.odds.retain(|o| o.id != odd_id);
        tables.odds.len() != before
    }

    #[cfg(test)]
    pub fn result_count(&self) -> usize {
        self.tables.lock().results.len()
    }

    #[cfg(test)]
    pub fn odds_count(&self) -> usize {
        self.tables.lock().odds.len()
    }

    #[cfg(test)]
    pub fn prediction_count(&self) -> usize {
        self.tables.lock().predictions.len()
    }
}

#[async_trait]
impl Repository for MemoryStore {
    async fn store_result(&self, result: &ParsedResult) -> Result<i64> {
        let mut tables = self.tables.lock();
        let id = tables.next_id();
        tables.results.push(StoredResult {
            id,
            result: result.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn store_results(&self, results: &[ParsedResult]) -> Result<usize> {
        let mut tables = self.tables.lock();
        for result in results {
            let id = tables.next_id();
            tables.results.push(StoredResult {
                id,
                result: result.clone(),
                created_at: Utc::now(),
            });
        }
        Ok(results.len())
    }

    async fn store_odd(&self, odd: &ParsedOdd) -> Result<i64> {
        let mut tables = self.tables.lock();
        let id = tables.next_id();
        tables.odds.push(StoredOdd {
            id,
            odd: odd.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn store_prediction(
        &self,
        analysis: &AnalysisResult,
        odd_id: i64,
    ) -> Result<StoredPrediction> {
        let mut tables = self.tables.lock();
        let id = tables.next_id();
        let stored = StoredPrediction::new(id, odd_id, analysis, Utc::now());
        tables.predictions.push(stored.clone());
        Ok(stored)
    }

    async fn find_results_by_team(&self, team: &str) -> Result<Vec<ParsedResult>> {
        let tables = self.tables.lock();
        Ok(tables
            .results
            .iter()
            .filter(|r| r.result.home_team == team || r.result.away_team == team)
            .map(|r| r.result.clone())
            .collect())
    }

    async fn list_recent_results(&self, limit: usize) -> Result<Vec<StoredResult>> {
        let tables = self.tables.lock();
        Ok(tables.results.iter().rev().take(limit).cloned().collect())
    }

    async fn list_recent_odds(&self, limit: usize) -> Result<Vec<StoredOdd>> {
        let tables = self.tables.lock();
        Ok(tables.odds.iter().rev().take(limit).cloned().collect())
    }

    async fn list_recent_predictions(&self, limit: usize) -> Result<Vec<PredictionView>> {
        let tables = self.tables.lock();
        Ok(tables
            .predictions
            .iter()
            .rev()
            .take(limit)
            .map(|p| PredictionView {
                prediction: p.clone(),
                fixture: tables
                    .odds
                    .iter()
                    .find(|o| o.id == p.odd_id)
                    .map(|o| o.fixture()),
            })
            .collect())
    }
}

//! Persistence for parsed feeds and predictions
//!
//! Everything above this module talks to the [`Repository`] trait; the
//! SQLite [`Database`] backs the binary, [`MemoryStore`] backs tests and
//! throwaway runs.

mod memory;
mod sqlite;

#[cfg(test)]
mod tests;

pub use memory::MemoryStore;
pub use sqlite::Database;

use crate::error::Result;
use crate::types::{
    AnalysisResult, ParsedOdd, ParsedResult, PredictionView, StoredOdd, StoredPrediction,
    StoredResult,
};
use async_trait::async_trait;

/// Storage capabilities the pipeline relies on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Repository: Send + Sync {
    async fn store_result(&self, result: &ParsedResult) -> Result<i64>;

    /// Store a whole parsed batch, returning how many rows were written
    async fn store_results(&self, results: &[ParsedResult]) -> Result<usize>;

    async fn store_odd(&self, odd: &ParsedOdd) -> Result<i64>;

    /// Returns the row as written, timestamp included
    async fn store_prediction(
        &self,
        analysis: &AnalysisResult,
        odd_id: i64,
    ) -> Result<StoredPrediction>;

    /// Every stored result the team took part in, home or away
    async fn find_results_by_team(&self, team: &str) -> Result<Vec<ParsedResult>>;

    /// Newest first
    async fn list_recent_results(&self, limit: usize) -> Result<Vec<StoredResult>>;

    /// Newest first
    async fn list_recent_odds(&self, limit: usize) -> Result<Vec<StoredOdd>>;

    /// Newest first, each joined with its fixture when the odds row exists
    async fn list_recent_predictions(&self, limit: usize) -> Result<Vec<PredictionView>>;
}

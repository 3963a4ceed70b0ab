//! SQLite repository via sqlx

use super::Repository;
use crate::error::{FeedError, Result};
use crate::types::{
    AnalysisResult, Decision, FixtureSummary, ParsedOdd, ParsedResult, PredictionView,
    StoredOdd, StoredPrediction, StoredResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteArguments, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, Sqlite};

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS results (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        time TEXT NOT NULL,
        home_team TEXT NOT NULL,
        away_team TEXT NOT NULL,
        home_goals INTEGER NOT NULL,
        away_goals INTEGER NOT NULL,
        total_goals INTEGER NOT NULL,
        over15 INTEGER NOT NULL,
        over25 INTEGER NOT NULL,
        created_at TEXT NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_results_home_team ON results (home_team)",
    "CREATE INDEX IF NOT EXISTS idx_results_away_team ON results (away_team)",
    r#"CREATE TABLE IF NOT EXISTS odds (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        time TEXT NOT NULL,
        home_team TEXT NOT NULL,
        away_team TEXT NOT NULL,
        odd1 REAL NOT NULL,
        odd_x REAL NOT NULL,
        odd2 REAL NOT NULL,
        goal_line REAL NOT NULL,
        over_odd REAL NOT NULL,
        under_odd REAL NOT NULL,
        created_at TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS predictions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        odd_id INTEGER NOT NULL,
        combined_expected_goals REAL NOT NULL,
        over15_probability REAL NOT NULL,
        over25_probability REAL NOT NULL,
        decision TEXT NOT NULL,
        confidence_score REAL NOT NULL,
        created_at TEXT NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_predictions_odd_id ON predictions (odd_id)",
];

const INSERT_RESULT: &str = "INSERT INTO results \
    (time, home_team, away_team, home_goals, away_goals, total_goals, over15, over25, created_at) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// SQLite-backed repository
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to `url` (e.g. `sqlite://betfeed.db?mode=rwc`) and create the schema
    pub async fn connect(url: &str) -> Result<Self> {
        let in_memory = url.contains(":memory:");
        let mut options = SqlitePoolOptions::new();
        if in_memory {
            // Each connection would otherwise see its own empty database.
            options = options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            options = options.max_connections(5);
        }

        let pool = options.connect(url).await?;
        let db = Self { pool };
        db.migrate().await?;
        tracing::info!("Database ready at {}", url);
        Ok(db)
    }

    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:").await
    }

    async fn migrate(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Repository for Database {
    async fn store_result(&self, result: &ParsedResult) -> Result<i64> {
        let done = insert_result(result).execute(&self.pool).await?;
        Ok(done.last_insert_rowid())
    }

    async fn store_results(&self, results: &[ParsedResult]) -> Result<usize> {
        let mut tx = self.pool.begin().await?;
        for result in results {
            insert_result(result).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        tracing::debug!("Stored {} results", results.len());
        Ok(results.len())
    }

    async fn store_odd(&self, odd: &ParsedOdd) -> Result<i64> {
        let done = sqlx::query(
            "INSERT INTO odds \
             (time, home_team, away_team, odd1, odd_x, odd2, goal_line, over_odd, under_odd, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&odd.time)
        .bind(&odd.home_team)
        .bind(&odd.away_team)
        .bind(odd.odd1)
        .bind(odd.odd_x)
        .bind(odd.odd2)
        .bind(odd.goal_line)
        .bind(odd.over_odd)
        .bind(odd.under_odd)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;
        Ok(done.last_insert_rowid())
    }

    async fn store_prediction(
        &self,
        analysis: &AnalysisResult,
        odd_id: i64,
    ) -> Result<StoredPrediction> {
        let created_at = Utc::now();
        let done = sqlx::query(
            "INSERT INTO predictions \
             (odd_id, combined_expected_goals, over15_probability, over25_probability, decision, confidence_score, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(odd_id)
        .bind(analysis.combined_expected_goals)
        .bind(analysis.over15_probability)
        .bind(analysis.over25_probability)
        .bind(analysis.decision.as_str())
        .bind(analysis.confidence_score)
        .bind(created_at)
        .execute(&self.pool)
        .await?;
        Ok(StoredPrediction::new(
            done.last_insert_rowid(),
            odd_id,
            analysis,
            created_at,
        ))
    }

    async fn find_results_by_team(&self, team: &str) -> Result<Vec<ParsedResult>> {
        let rows = sqlx::query(
            "SELECT * FROM results WHERE home_team = ?1 OR away_team = ?1 ORDER BY id",
        )
        .bind(team)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| result_from_row(row).map(|stored| stored.result))
            .collect()
    }

    async fn list_recent_results(&self, limit: usize) -> Result<Vec<StoredResult>> {
        let rows = sqlx::query("SELECT * FROM results ORDER BY id DESC LIMIT ?")
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(result_from_row).collect()
    }

    async fn list_recent_odds(&self, limit: usize) -> Result<Vec<StoredOdd>> {
        let rows = sqlx::query("SELECT * FROM odds ORDER BY id DESC LIMIT ?")
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(odd_from_row).collect()
    }

    async fn list_recent_predictions(&self, limit: usize) -> Result<Vec<PredictionView>> {
        let rows = sqlx::query(
            "SELECT p.*, o.time AS fixture_time, o.home_team AS fixture_home, o.away_team AS fixture_away \
             FROM predictions p LEFT JOIN odds o ON o.id = p.odd_id \
             ORDER BY p.id DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(prediction_from_row).collect()
    }
}

fn insert_result(
    result: &ParsedResult,
) -> sqlx::query::Query<'static, Sqlite, SqliteArguments<'static>> {
    sqlx::query(INSERT_RESULT)
        .bind(result.time.clone())
        .bind(result.home_team.clone())
        .bind(result.away_team.clone())
        .bind(i64::from(result.home_goals))
        .bind(i64::from(result.away_goals))
        .bind(i64::from(result.total_goals))
        .bind(result.over15)
        .bind(result.over25)
        .bind(Utc::now())
}

fn goals(row: &SqliteRow, column: &str) -> Result<u32> {
    let value: i64 = row.try_get(column)?;
    u32::try_from(value)
        .map_err(|_| FeedError::Storage(format!("{} out of range: {}", column, value)))
}

fn result_from_row(row: &SqliteRow) -> Result<StoredResult> {
    Ok(StoredResult {
        id: row.try_get("id")?,
        result: ParsedResult {
            time: row.try_get("time")?,
            home_team: row.try_get("home_team")?,
            away_team: row.try_get("away_team")?,
            home_goals: goals(row, "home_goals")?,
            away_goals: goals(row, "away_goals")?,
            total_goals: goals(row, "total_goals")?,
            over15: row.try_get("over15")?,
            over25: row.try_get("over25")?,
        },
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

fn odd_from_row(row: &SqliteRow) -> Result<StoredOdd> {
    Ok(StoredOdd {
        id: row.try_get("id")?,
        odd: ParsedOdd {
            time: row.try_get("time")?,
            home_team: row.try_get("home_team")?,
            away_team: row.try_get("away_team")?,
            odd1: row.try_get("odd1")?,
            odd_x: row.try_get("odd_x")?,
            odd2: row.try_get("odd2")?,
            goal_line: row.try_get("goal_line")?,
            over_odd: row.try_get("over_odd")?,
            under_odd: row.try_get("under_odd")?,
        },
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

fn prediction_from_row(row: &SqliteRow) -> Result<PredictionView> {
    let decision: String = row.try_get("decision")?;
    let decision: Decision = decision.parse().map_err(FeedError::Storage)?;

    let prediction = StoredPrediction {
        id: row.try_get("id")?,
        odd_id: row.try_get("odd_id")?,
        combined_expected_goals: row.try_get("combined_expected_goals")?,
        over15_probability: row.try_get("over15_probability")?,
        over25_probability: row.try_get("over25_probability")?,
        decision,
        confidence_score: row.try_get("confidence_score")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    };

    let time: Option<String> = row.try_get("fixture_time")?;
    let home: Option<String> = row.try_get("fixture_home")?;
    let away: Option<String> = row.try_get("fixture_away")?;
    let fixture = match (time, home, away) {
        (Some(time), Some(home_team), Some(away_team)) => Some(FixtureSummary {
            time,
            home_team,
            away_team,
        }),
        _ => None,
    };

    Ok(PredictionView { prediction, fixture })
}

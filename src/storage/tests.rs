//! Tests for storage backends

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::types::{AnalysisResult, Decision, ParsedOdd, ParsedResult};

    fn sample_odd(home: &str, away: &str) -> ParsedOdd {
        ParsedOdd {
            time: "05:36".to_string(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            odd1: 2.51,
            odd_x: 3.46,
            odd2: 2.93,
            goal_line: 2.5,
            over_odd: 2.32,
            under_odd: 1.64,
        }
    }

    fn sample_analysis(home: &str, away: &str) -> AnalysisResult {
        AnalysisResult {
            home_team: home.to_string(),
            away_team: away.to_string(),
            combined_expected_goals: 3.0,
            over15_probability: 42.0,
            over25_probability: 36.0,
            decision: Decision::SafeOver15,
            confidence_score: 65.8,
        }
    }

    fn sample_results() -> Vec<ParsedResult> {
        vec![
            ParsedResult::new("08:24", "LEV", "HSV", 0, 2),
            ParsedResult::new("08:27", "BAY", "LEV", 3, 1),
            ParsedResult::new("08:30", "FCA", "HDH", 1, 1),
        ]
    }

    async fn exercise_round_trip<R: Repository>(repo: &R) {
        assert_eq!(repo.store_results(&sample_results()).await.unwrap(), 3);
        repo.store_result(&ParsedResult::new("09:00", "HSV", "BAY", 2, 2))
            .await
            .unwrap();

        let lev = repo.find_results_by_team("LEV").await.unwrap();
        assert_eq!(lev.len(), 2);
        assert_eq!(lev[0], ParsedResult::new("08:24", "LEV", "HSV", 0, 2));
        assert_eq!(lev[1].home_team, "BAY");

        assert!(repo.find_results_by_team("NOBODY").await.unwrap().is_empty());

        let recent = repo.list_recent_results(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].result.home_team, "HSV");
        assert_eq!(recent[1].result.home_team, "FCA");

        let odd_id = repo.store_odd(&sample_odd("FCA", "HDH")).await.unwrap();
        let odds = repo.list_recent_odds(10).await.unwrap();
        assert_eq!(odds.len(), 1);
        assert_eq!(odds[0].id, odd_id);
        assert_eq!(odds[0].odd, sample_odd("FCA", "HDH"));

        let stored = repo
            .store_prediction(&sample_analysis("FCA", "HDH"), odd_id)
            .await
            .unwrap();
        assert_eq!(stored.odd_id, odd_id);
        assert_eq!(stored.decision, Decision::SafeOver15);
        let predictions = repo.list_recent_predictions(10).await.unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].prediction.id, stored.id);
        assert_eq!(predictions[0].prediction.odd_id, odd_id);
        assert_eq!(predictions[0].prediction.decision, Decision::SafeOver15);
        assert_eq!(predictions[0].prediction.confidence_score, 65.8);
        let fixture = predictions[0].fixture.as_ref().expect("odd exists");
        assert_eq!(fixture.home_team, "FCA");
        assert_eq!(fixture.away_team, "HDH");
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        exercise_round_trip(&store).await;
        assert_eq!(store.result_count(), 4);
        assert_eq!(store.odds_count(), 1);
        assert_eq!(store.prediction_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_prediction_returns_stored_row() {
        let store = MemoryStore::new();
        let odd_id = store.store_odd(&sample_odd("FCA", "HDH")).await.unwrap();
        let stored = store
            .store_prediction(&sample_analysis("FCA", "HDH"), odd_id)
            .await
            .unwrap();

        let listed = store.list_recent_predictions(1).await.unwrap();
        assert_eq!(listed[0].prediction, stored);
    }

    #[tokio::test]
    async fn test_sqlite_round_trip() {
        let db = Database::in_memory().await.unwrap();
        exercise_round_trip(&db).await;
    }

    #[tokio::test]
    async fn test_sqlite_file_database_persists() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("feed.db").display());

        {
            let db = Database::connect(&url).await.unwrap();
            db.store_results(&sample_results()).await.unwrap();
            db.pool().close().await;
        }

        let db = Database::connect(&url).await.unwrap();
        assert_eq!(db.find_results_by_team("FCA").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_memory_prediction_without_odd_has_no_fixture() {
        let store = MemoryStore::new();
        let odd_id = store.store_odd(&sample_odd("FCA", "HDH")).await.unwrap();
        store
            .store_prediction(&sample_analysis("FCA", "HDH"), odd_id)
            .await
            .unwrap();
        assert!(store.remove_odd(odd_id));
        assert!(!store.remove_odd(odd_id));

        let predictions = store.list_recent_predictions(10).await.unwrap();
        assert_eq!(predictions.len(), 1);
        assert!(predictions[0].fixture.is_none());
    }

    #[tokio::test]
    async fn test_sqlite_prediction_without_odd_has_no_fixture() {
        let db = Database::in_memory().await.unwrap();
        db.store_prediction(&sample_analysis("FCA", "HDH"), 999)
            .await
            .unwrap();

        let predictions = db.list_recent_predictions(10).await.unwrap();
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].prediction.odd_id, 999);
        assert!(predictions[0].fixture.is_none());
    }

    #[tokio::test]
    async fn test_self_match_is_returned_once() {
        let store = MemoryStore::new();
        store
            .store_result(&ParsedResult::new("10:00", "LEV", "LEV", 1, 0))
            .await
            .unwrap();
        assert_eq!(store.find_results_by_team("LEV").await.unwrap().len(), 1);

        let db = Database::in_memory().await.unwrap();
        db.store_result(&ParsedResult::new("10:00", "LEV", "LEV", 1, 0))
            .await
            .unwrap();
        assert_eq!(db.find_results_by_team("LEV").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recent_limit_is_respected() {
        let db = Database::in_memory().await.unwrap();
        for i in 0..5 {
            db.store_odd(&sample_odd(&format!("H{}", i), "AWY"))
                .await
                .unwrap();
        }
        let odds = db.list_recent_odds(3).await.unwrap();
        assert_eq!(odds.len(), 3);
        assert_eq!(odds[0].odd.home_team, "H4");
    }
}

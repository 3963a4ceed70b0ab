//! HTTP API
//!
//! - `POST /api/results`, `POST /api/odds`: body `{"input": "<feed text>"}`
//! - `GET /api/results`, `GET /api/odds`, `GET /api/predictions`: newest rows first


use crate::error::FeedError;
use crate::pipeline::{FeedService, FixtureOutcome};
use crate::storage::Repository;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// State shared across handlers
pub struct AppState<R: Repository> {
    pub service: Arc<FeedService<R>>,
    pub list_limit: usize,
}

impl<R: Repository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            list_limit: self.list_limit,
        }
    }
}

impl<R: Repository> AppState<R> {
    pub fn new(service: Arc<FeedService<R>>, list_limit: usize) -> Self {
        Self { service, list_limit }
    }
}

/// Error body `{"error": "..."}` with a status code
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn processing(kind: &'static str, err: FeedError) -> Self {
        match err {
            FeedError::InvalidInput(kind) => Self {
                status: StatusCode::BAD_REQUEST,
                message: format!("Invalid input. Please provide {} data as a string.", kind),
            },
            FeedError::NoValidRecords(kind) => Self {
                status: StatusCode::BAD_REQUEST,
                message: format!("No valid {} found in input.", kind),
            },
            other => {
                tracing::error!("Error processing {}: {}", kind, other);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: format!("Failed to process {}.", kind),
                }
            }
        }
    }

    fn fetching(kind: &'static str, err: FeedError) -> Self {
        tracing::error!("Error fetching {}: {}", kind, err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Failed to fetch {}.", kind),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Pull the feed text out of `{"input": "..."}`; anything else is an input-shape error
fn feed_input(
    kind: &'static str,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<String, FeedError> {
    let Ok(Json(body)) = body else {
        return Err(FeedError::InvalidInput(kind));
    };
    match body.get("input").and_then(Value::as_str) {
        Some(input) if !input.is_empty() => Ok(input.to_string()),
        _ => Err(FeedError::InvalidInput(kind)),
    }
}

#[derive(Serialize)]
struct Listing<T> {
    success: bool,
    count: usize,
    data: Vec<T>,
}

impl<T> Listing<T> {
    fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

async fn post_results<R: Repository + 'static>(
    State(state): State<AppState<R>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = feed_input("results", body).map_err(|e| ApiError::processing("results", e))?;
    let ingest = state
        .service
        .ingest_results(&input)
        .await
        .map_err(|e| ApiError::processing("results", e))?;

    Ok(Json(json!({
        "success": true,
        "count": ingest.count,
        "message": format!("Successfully stored {} results.", ingest.count),
    })))
}

async fn get_results<R: Repository + 'static>(
    State(state): State<AppState<R>>,
) -> Result<Json<Listing<crate::types::StoredResult>>, ApiError> {
    let rows = state
        .service
        .recent_results(state.list_limit)
        .await
        .map_err(|e| ApiError::fetching("results", e))?;
    Ok(Json(Listing::new(rows)))
}

async fn post_odds<R: Repository + 'static>(
    State(state): State<AppState<R>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let input = feed_input("odds", body).map_err(|e| ApiError::processing("odds", e))?;
    let ingest = state
        .service
        .ingest_odds(&input)
        .await
        .map_err(|e| ApiError::processing("odds", e))?;

    let skipped: Vec<&FixtureOutcome> = ingest
        .outcomes
        .iter()
        .filter(|o| matches!(o, FixtureOutcome::Skipped { .. }))
        .collect();

    Ok(Json(json!({
        "success": true,
        "oddsCount": ingest.odds_count,
        "predictionsCount": ingest.predictions_count(),
        "predictions": ingest.predictions(),
        "skipped": skipped,
        "message": format!(
            "Successfully stored {} odds and generated {} predictions.",
            ingest.odds_count,
            ingest.predictions_count()
        ),
    })))
}

async fn get_odds<R: Repository + 'static>(
    State(state): State<AppState<R>>,
) -> Result<Json<Listing<crate::types::StoredOdd>>, ApiError> {
    let rows = state
        .service
        .recent_odds(state.list_limit)
        .await
        .map_err(|e| ApiError::fetching("odds", e))?;
    Ok(Json(Listing::new(rows)))
}

async fn get_predictions<R: Repository + 'static>(
    State(state): State<AppState<R>>,
) -> Result<Json<Listing<crate::types::PredictionView>>, ApiError> {
    let rows = state
        .service
        .recent_predictions(state.list_limit)
        .await
        .map_err(|e| ApiError::fetching("predictions", e))?;
    Ok(Json(Listing::new(rows)))
}

async fn health_check() -> &'static str {
    "OK"
}

/// Build the API router
pub fn create_router<R: Repository + 'static>(state: AppState<R>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/results", get(get_results::<R>).post(post_results::<R>))
        .route("/api/odds", get(get_odds::<R>).post(post_odds::<R>))
        .route("/api/predictions", get(get_predictions::<R>))
        .with_state(state)
}

/// Bind `addr` and serve until the process exits
pub async fn serve<R: Repository + 'static>(
    state: AppState<R>,
    addr: &str,
) -> Result<(), FeedError> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

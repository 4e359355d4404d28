//! Scoring results, CSV export and store maintenance endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::csv_io;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::{StoreStats, StoredResult};

#[derive(Debug, Serialize)]
pub struct ResultsResponse {
    pub message: &'static str,
    pub count: usize,
    pub results: Vec<StoredResult>,
}

async fn stored_results(state: &AppState) -> ApiResult<Vec<StoredResult>> {
    let results = state.store.results().await;
    if results.is_empty() {
        return Err(ApiError::NotFound(
            "no results yet; run POST /api/v1/score first".into(),
        ));
    }
    Ok(results)
}

/// GET /api/v1/results
pub async fn list_results(State(state): State<AppState>) -> ApiResult<Json<ResultsResponse>> {
    let results = stored_results(&state).await?;
    Ok(Json(ResultsResponse {
        message: "Results found",
        count: results.len(),
        results,
    }))
}

/// GET /api/v1/results/export/csv: results as a dated CSV attachment.
pub async fn export_csv(State(state): State<AppState>) -> ApiResult<Response> {
    let results = stored_results(&state).await?;
    let body = csv_io::write_results(results.iter().map(|s| &s.result))
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let filename = csv_io::export_filename(chrono::Utc::now().date_naive());

    tracing::info!(rows = results.len(), filename = %filename, "results exported");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}

/// GET /api/v1/stats
pub async fn stats(State(state): State<AppState>) -> Json<StoreStats> {
    Json(state.store.stats().await)
}

/// DELETE /api/v1/data: drop the offer, leads and results.
pub async fn clear_data(State(state): State<AppState>) -> StatusCode {
    state.store.clear().await;
    StatusCode::NO_CONTENT
}

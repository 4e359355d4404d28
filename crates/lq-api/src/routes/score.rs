//! Batch scoring endpoint.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use lq_protocol::BatchSummary;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::StoredResult;

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub message: &'static str,
    pub summary: BatchSummary,
    pub results: Vec<StoredResult>,
}

/// POST /api/v1/score: score every stored lead against the stored offer.
///
/// Replaces any previous results. The response arrives after the whole
/// batch is done.
pub async fn run_scoring(State(state): State<AppState>) -> ApiResult<Json<ScoreResponse>> {
    let offer = state.store.profile().await.ok_or_else(|| {
        ApiError::Precondition("no offer found; save an offer first with POST /api/v1/offer".into())
    })?;

    let leads: Vec<_> = state
        .store
        .leads()
        .await
        .into_iter()
        .map(|stored| stored.lead)
        .collect();
    if leads.is_empty() {
        return Err(ApiError::Precondition(
            "no leads found; upload leads first with POST /api/v1/leads/upload".into(),
        ));
    }

    tracing::info!(leads = leads.len(), offer = %offer.profile.name, "scoring requested");
    let results = state.scorer.score_batch(&leads, &offer.profile).await;
    let stored = state.store.set_results(results).await;
    let summary = BatchSummary::from_results(stored.iter().map(|s| &s.result));

    Ok(Json(ScoreResponse {
        message: "Scoring completed",
        summary,
        results: stored,
    }))
}

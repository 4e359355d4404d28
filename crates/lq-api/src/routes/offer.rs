//! Product offer endpoints.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use lq_protocol::ProductProfile;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::StoredProfile;

/// Request body for POST /api/v1/offer.
#[derive(Debug, Deserialize)]
pub struct OfferRequest {
    pub name: Option<String>,
    pub value_props: Option<Vec<String>>,
    pub ideal_use_cases: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct OfferResponse {
    pub message: &'static str,
    pub offer: StoredProfile,
}

/// POST /api/v1/offer: validate and store the offer, replacing any previous one.
pub async fn save_offer(
    State(state): State<AppState>,
    payload: Result<Json<OfferRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OfferResponse>)> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let (Some(name), Some(value_props), Some(ideal_use_cases)) =
        (req.name, req.value_props, req.ideal_use_cases)
    else {
        return Err(ApiError::BadRequest(
            "missing required fields: provide name, value_props and ideal_use_cases".into(),
        ));
    };

    let profile = ProductProfile::new(name, value_props, ideal_use_cases)?;
    let offer = state.store.set_profile(profile).await;

    Ok((
        StatusCode::CREATED,
        Json(OfferResponse {
            message: "Offer saved",
            offer,
        }),
    ))
}

/// GET /api/v1/offer: the stored offer.
pub async fn get_offer(State(state): State<AppState>) -> ApiResult<Json<OfferResponse>> {
    let offer = state.store.profile().await.ok_or_else(|| {
        ApiError::NotFound("no offer saved; POST /api/v1/offer first".into())
    })?;
    Ok(Json(OfferResponse {
        message: "Offer found",
        offer,
    }))
}

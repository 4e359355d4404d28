//! Health check and service index.

use axum::Json;
use serde_json::{Value, json};

/// GET /health: liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
    }))
}

/// GET /: service name, version and the endpoint list.
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "LeadQual lead scoring API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /api/v1/offer - save the product offer",
            "GET /api/v1/offer - current offer",
            "POST /api/v1/leads/upload - upload a lead CSV (multipart field 'leads')",
            "GET /api/v1/leads - uploaded leads",
            "GET /api/v1/leads/sample - expected CSV format",
            "POST /api/v1/score - score all leads against the offer",
            "GET /api/v1/results - latest scoring results",
            "GET /api/v1/results/export/csv - results as CSV",
            "GET /api/v1/stats - store counters",
            "DELETE /api/v1/data - clear all data",
        ],
    }))
}

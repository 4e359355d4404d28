//! API route definitions and router builder.

pub mod health;
pub mod leads;
pub mod offer;
pub mod results;
pub mod score;

use axum::Router;
use axum::extract::{DefaultBodyLimit, OriginalUri};
use axum::routing::{delete, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Offer
        .route("/offer", get(offer::get_offer).post(offer::save_offer))
        // Leads
        .route("/leads", get(leads::list_leads))
        .route(
            "/leads/upload",
            post(leads::upload_leads).layer(DefaultBodyLimit::max(state.max_upload_bytes)),
        )
        .route("/leads/sample", get(leads::sample_format))
        // Scoring
        .route("/score", post(score::run_scoring))
        // Results
        .route("/results", get(results::list_results))
        .route("/results/export/csv", get(results::export_csv))
        // Store maintenance
        .route("/stats", get(results::stats))
        .route("/data", delete(results::clear_data));

    Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use lq_protocol::IntentLabel;
    use lq_scoring::{IntentScorer, MockOracle, ScorerConfig};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::config::DEFAULT_MAX_UPLOAD_BYTES;

    const BOUNDARY: &str = "leadqual-test-boundary";

    const LEADS_CSV: &str = "\
name,role,company,industry,location,linkedin_bio
John Doe,CEO,TechCorp,Technology,San Francisco,Tech leader with 10+ years
Jane Smith,Marketing Manager,GrowthCo,B2B SaaS,New York,Growth marketer
,Intern,NoName Inc,Retail,Boston,
";

    fn app_with(oracle: MockOracle) -> Router {
        let scorer = IntentScorer::with_config(
            Arc::new(oracle),
            ScorerConfig {
                pacing: Duration::ZERO,
            },
        );
        build_router(AppState::new(scorer, DEFAULT_MAX_UPLOAD_BYTES))
    }

    fn app() -> Router {
        app_with(MockOracle::fixed(IntentLabel::High))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(body).unwrap()))
            .unwrap()
    }

    fn upload(field: &str, csv: &str) -> Request<Body> {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"leads.csv\"\r\n\
             Content-Type: text/csv\r\n\
             \r\n\
             {csv}\r\n\
             --{BOUNDARY}--\r\n"
        );
        Request::post("/api/v1/leads/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn offer() -> Value {
        json!({
            "name": " AI Outreach Automation ",
            "value_props": ["24/7 outreach", "6x more meetings"],
            "ideal_use_cases": ["B2B SaaS mid-market", "Technology companies"]
        })
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let (status, json) = send(&app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn index_lists_endpoints() {
        let (status, json) = send(&app(), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!json["endpoints"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_path_is_json_404() {
        let (status, json) = send(&app(), get("/api/v1/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "not found: /api/v1/nope");
        assert_eq!(json["status"], 404);
    }

    #[tokio::test]
    async fn offer_roundtrip_trims_fields() {
        let app = app();
        let (status, json) = send(&app, post_json("/api/v1/offer", &offer())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["offer"]["name"], "AI Outreach Automation");
        assert!(json["offer"]["id"].is_string());
        assert!(json["offer"]["created_at"].is_string());

        let (status, json) = send(&app, get("/api/v1/offer")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["offer"]["value_props"][1], "6x more meetings");
    }

    #[tokio::test]
    async fn offer_validation() {
        let app = app();

        let (status, json) = send(&app, post_json("/api/v1/offer", &json!({"name": "X"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("missing required fields"));

        let blank = json!({"name": "  ", "value_props": ["a"], "ideal_use_cases": ["b"]});
        let (status, _) = send(&app, post_json("/api/v1/offer", &blank)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let empty = json!({"name": "X", "value_props": [], "ideal_use_cases": ["b"]});
        let (status, json) = send(&app, post_json("/api/v1/offer", &empty)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("value_props"));

        let wrong_type = json!({"name": 5, "value_props": ["a"], "ideal_use_cases": ["b"]});
        let (status, _) = send(&app, post_json("/api/v1/offer", &wrong_type)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_offer_is_404() {
        let (status, _) = send(&app(), get("/api/v1/offer")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upload_skips_incomplete_rows() {
        let app = app();
        let (status, json) = send(&app, upload("leads", LEADS_CSV)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["count"], 2);
        assert_eq!(json["leads"][0]["name"], "John Doe");
        assert_eq!(json["leads"][1]["role"], "Marketing Manager");

        let (status, json) = send(&app, get("/api/v1/leads")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 2);
    }

    #[tokio::test]
    async fn upload_accepts_rows_shorter_than_header() {
        let csv = "name,company,industry,linkedin_bio\nAva Patel,FlowMetrics\nLee,Acme,Retail,Buyer\n";
        let app = app();
        let (status, json) = send(&app, upload("leads", csv)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["count"], 2);
        assert_eq!(json["leads"][0]["name"], "Ava Patel");
        assert_eq!(json["leads"][0]["industry"], "");
        assert_eq!(json["leads"][1]["industry"], "Retail");
    }

    #[tokio::test]
    async fn upload_without_leads_field_is_rejected() {
        let (status, json) = send(&app(), upload("file", LEADS_CSV)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("no file uploaded"));
    }

    #[tokio::test]
    async fn upload_with_no_valid_rows_is_rejected() {
        let (status, json) = send(&app(), upload("leads", "name,company\n,Acme\n")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("no valid leads"));
    }

    #[tokio::test]
    async fn sample_format_lists_columns() {
        let (status, json) = send(&app(), get("/api/v1/leads/sample")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["columns"][5], "linkedin_bio");
    }

    #[tokio::test]
    async fn score_requires_offer_then_leads() {
        let app = app();
        let (status, json) = send(&app, Request::post("/api/v1/score").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("no offer"));

        send(&app, post_json("/api/v1/offer", &offer())).await;
        let (status, json) = send(&app, Request::post("/api/v1/score").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("no leads"));
    }

    #[tokio::test]
    async fn full_workflow() {
        let app = app();
        send(&app, post_json("/api/v1/offer", &offer())).await;
        send(&app, upload("leads", LEADS_CSV)).await;

        let (status, json) = send(&app, Request::post("/api/v1/score").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["summary"]["total_leads"], 2);
        assert_eq!(json["summary"]["high_intent"], 2);
        let results = json["results"].as_array().unwrap();
        assert_eq!(results[0]["name"], "John Doe");
        assert_eq!(results[0]["final_score"], 100);
        assert!(results[0]["scored_at"].is_string());

        let (status, json) = send(&app, get("/api/v1/results")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 2);

        let (_, stats) = send(&app, get("/api/v1/stats")).await;
        assert_eq!(stats["has_offer"], true);
        assert_eq!(stats["leads_count"], 2);
        assert_eq!(stats["results_count"], 2);

        let (status, _) = send(
            &app,
            Request::delete("/api/v1/data").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, stats) = send(&app, get("/api/v1/stats")).await;
        assert_eq!(stats["has_offer"], false);
        assert_eq!(stats["results_count"], 0);
    }

    #[tokio::test]
    async fn csv_export() {
        let app = app();
        let (status, _) = send(&app, get("/api/v1/results/export/csv")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app, post_json("/api/v1/offer", &offer())).await;
        send(&app, upload("leads", LEADS_CSV)).await;
        send(&app, Request::post("/api/v1/score").body(Body::empty()).unwrap()).await;

        let response = app
            .clone()
            .oneshot(get("/api/v1/results/export/csv"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/csv"));
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"lead-results-"));
        assert!(disposition.ends_with(".csv\""));

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Role,Company,Industry,Location,Intent,Score,Reasoning")
        );
        assert!(lines.next().unwrap().starts_with("John Doe,CEO,TechCorp,Technology,San Francisco,High,100,"));
        assert_eq!(lines.count(), 1);
    }

    #[tokio::test]
    async fn oracle_failure_still_returns_every_result() {
        let app = app_with(MockOracle::fixed(IntentLabel::Medium).failing_for(["Jane Smith"]));
        send(&app, post_json("/api/v1/offer", &offer())).await;
        send(&app, upload("leads", LEADS_CSV)).await;

        let (status, json) = send(&app, Request::post("/api/v1/score").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1]["final_score"], 10);
        assert_eq!(results[1]["intent"], "Low");
        assert_eq!(json["summary"]["low_intent"], 1);
    }
}

//! Shared test harness for E2E integration tests.
//!
//! Builds the real router and store around a chosen intent oracle and drives
//! the offer, upload, score, export workflow over `tower::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use lq_api::config::DEFAULT_MAX_UPLOAD_BYTES;
use lq_api::routes::build_router;
use lq_api::state::AppState;
use lq_protocol::IntentLabel;
use lq_scoring::llm::build_generator;
use lq_scoring::{
    IntentOracle, IntentScorer, LlmConfig, LlmOracle, MockOracle, ScorerConfig, TextGenerator,
};

const BOUNDARY: &str = "lq-e2e-boundary";

/// Three eligible leads and one row without a name.
pub const SAMPLE_CSV: &str = "\
name,role,company,industry,location,linkedin_bio
John Doe,CEO,TechCorp,Technology,San Francisco,Tech leader with 10+ years in SaaS
Jane Smith,Senior Developer,CodeWorks,Software,Berlin,
Sam Green,Intern,Farmstead,Agriculture,,Learning the ropes
,CTO,Ghost Inc,Technology,Nowhere,
";

/// End-to-end harness: real router, real store, pluggable oracle.
pub struct TestHarness {
    pub state: AppState,
    pub router: Router,
}

impl TestHarness {
    /// Harness around any oracle, with pacing disabled.
    pub fn with_oracle(oracle: Arc<dyn IntentOracle>) -> Self {
        let scorer = IntentScorer::with_config(
            oracle,
            ScorerConfig {
                pacing: Duration::ZERO,
            },
        );
        let state = AppState::new(scorer, DEFAULT_MAX_UPLOAD_BYTES);
        let router = build_router(state.clone());
        Self { state, router }
    }

    /// Harness whose oracle always answers `intent`.
    pub fn with_fixed_intent(intent: IntentLabel) -> Self {
        Self::with_oracle(Arc::new(MockOracle::fixed(intent)))
    }

    /// Harness whose oracle prompts `generator`.
    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self::with_oracle(Arc::new(LlmOracle::new(generator)))
    }

    /// Harness backed by a Gemini client pointed at `base_url`.
    pub fn with_gemini(base_url: &str) -> Self {
        let config = LlmConfig {
            api_key: Some("test-key".into()),
            base_url: Some(base_url.into()),
            timeout_secs: 5,
            ..LlmConfig::default()
        };
        Self::with_generator(build_generator(&config).unwrap())
    }

    /// Send a request, returning (status, headers, raw body).
    pub async fn raw(&self, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// Send a request, returning (status, JSON body or `Null`).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, _, body) = self.raw(request).await;
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    /// POST /api/v1/offer
    pub async fn save_offer(&self, offer: &Value) -> (StatusCode, Value) {
        self.send(
            Request::post("/api/v1/offer")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(offer).unwrap()))
                .unwrap(),
        )
        .await
    }

    /// POST /api/v1/leads/upload with `csv` in the `leads` field.
    pub async fn upload_csv(&self, csv: &str) -> (StatusCode, Value) {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"leads\"; filename=\"leads.csv\"\r\n\
             Content-Type: text/csv\r\n\
             \r\n\
             {csv}\r\n\
             --{BOUNDARY}--\r\n"
        );
        self.send(
            Request::post("/api/v1/leads/upload")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// POST /api/v1/score
    pub async fn score(&self) -> (StatusCode, Value) {
        self.send(Request::post("/api/v1/score").body(Body::empty()).unwrap())
            .await
    }

    /// Save the default offer and upload `SAMPLE_CSV`.
    pub async fn seed(&self) {
        let (status, _) = self.save_offer(&default_offer()).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = self.upload_csv(SAMPLE_CSV).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

pub fn default_offer() -> Value {
    json!({
        "name": "AI Outreach Automation",
        "value_props": ["24/7 outreach", "6x more meetings"],
        "ideal_use_cases": ["B2B SaaS mid-market", "Technology companies"]
    })
}

//! LeadQual API: lead scoring REST server.
//!
//! Stores one product offer and one uploaded lead list in memory, scores the
//! leads on request (rules plus an LLM verdict) and serves the results as
//! JSON or CSV.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use lq_api::config::ApiConfig;
use lq_api::routes::build_router;
use lq_api::state::AppState;
use lq_scoring::llm::build_generator;
use lq_scoring::{LlmConfig, LlmOracle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real env vars still apply.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    if let Ok(path) = &dotenv {
        tracing::debug!(path = %path.display(), "loaded .env");
    }
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "lq-api starting");

    let config = ApiConfig::from_env()?;
    let llm_config = LlmConfig::from_env()?;

    // Gemini without an API key fails here, before the listener binds.
    let generator = build_generator(&llm_config)?;
    let oracle = Arc::new(LlmOracle::new(generator));
    let state = AppState::from_config(&config, oracle);

    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        pacing_ms = config.scoring_pacing_ms,
        "listening"
    );

    axum::serve(listener, app).await?;

    Ok(())
}

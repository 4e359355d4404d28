//! Shared application state for the Axum server.

use std::sync::Arc;

use lq_scoring::{IntentOracle, IntentScorer, ScorerConfig};

use crate::config::ApiConfig;
use crate::store::MemoryStore;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Offer, leads and results of the current session.
    pub store: Arc<MemoryStore>,
    /// Scoring engine (rules + AI oracle).
    pub scorer: Arc<IntentScorer>,
    /// Upload size cap in bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(scorer: IntentScorer, max_upload_bytes: usize) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            scorer: Arc::new(scorer),
            max_upload_bytes,
        }
    }

    /// Wire a scorer around `oracle` using the server config.
    pub fn from_config(config: &ApiConfig, oracle: Arc<dyn IntentOracle>) -> Self {
        let scorer = IntentScorer::with_config(
            oracle,
            ScorerConfig {
                pacing: config.scoring_pacing(),
            },
        );
        Self::new(scorer, config.max_upload_bytes)
    }
}

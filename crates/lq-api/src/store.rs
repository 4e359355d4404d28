//! In-memory store for the current offer, lead list and scoring results.
//!
//! Each collection is replaced wholesale: uploading leads swaps out the old
//! list, scoring swaps out the old results. Entries are stamped with a
//! UUIDv7 id and the time they were stored.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use lq_protocol::{LeadRecord, ProductProfile, ScoringResult};

#[derive(Debug, Clone, Serialize)]
pub struct StoredProfile {
    pub id: Uuid,
    #[serde(flatten)]
    pub profile: ProductProfile,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredLead {
    pub id: Uuid,
    #[serde(flatten)]
    pub lead: LeadRecord,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredResult {
    pub id: Uuid,
    #[serde(flatten)]
    pub result: ScoringResult,
    pub scored_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub has_offer: bool,
    pub leads_count: usize,
    pub results_count: usize,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Inner {
    profile: Option<StoredProfile>,
    leads: Vec<StoredLead>,
    results: Vec<StoredResult>,
}

/// Process-wide state behind a single lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_profile(&self, profile: ProductProfile) -> StoredProfile {
        let stored = StoredProfile {
            id: Uuid::now_v7(),
            profile,
            created_at: Utc::now(),
        };
        tracing::info!(offer = %stored.profile.name, "offer saved");
        self.inner.write().await.profile = Some(stored.clone());
        stored
    }

    pub async fn profile(&self) -> Option<StoredProfile> {
        self.inner.read().await.profile.clone()
    }

    pub async fn set_leads(&self, leads: Vec<LeadRecord>) -> Vec<StoredLead> {
        let now = Utc::now();
        let stored: Vec<StoredLead> = leads
            .into_iter()
            .map(|lead| StoredLead {
                id: Uuid::now_v7(),
                lead,
                uploaded_at: now,
            })
            .collect();
        tracing::info!(count = stored.len(), "leads saved");
        self.inner.write().await.leads = stored.clone();
        stored
    }

    pub async fn leads(&self) -> Vec<StoredLead> {
        self.inner.read().await.leads.clone()
    }

    pub async fn set_results(&self, results: Vec<ScoringResult>) -> Vec<StoredResult> {
        let now = Utc::now();
        let stored: Vec<StoredResult> = results
            .into_iter()
            .map(|result| StoredResult {
                id: Uuid::now_v7(),
                result,
                scored_at: now,
            })
            .collect();
        tracing::info!(count = stored.len(), "results saved");
        self.inner.write().await.results = stored.clone();
        stored
    }

    pub async fn results(&self) -> Vec<StoredResult> {
        self.inner.read().await.results.clone()
    }

    /// Drop the offer, leads and results.
    pub async fn clear(&self) {
        *self.inner.write().await = Inner::default();
        tracing::info!("store cleared");
    }

    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        StoreStats {
            has_offer: inner.profile.is_some(),
            leads_count: inner.leads.len(),
            results_count: inner.results.len(),
            last_updated: Utc::now(),
        }
    }
}

//! AI buying-intent oracle.
//!
//! Wraps a [`TextGenerator`] with the classification contract: build the
//! prompt, call the model once, parse the reply. Transport failures and
//! malformed replies never escape; they degrade into a fallback
//! [`AiOutcome`].

pub mod parse;
pub mod prompt;

use std::sync::Arc;

use async_trait::async_trait;

use lq_protocol::{AiOutcome, LeadRecord, ProductProfile};

use crate::error::ScoringError;
use crate::llm::TextGenerator;

pub use parse::Verdict;
pub use prompt::build_prompt;

/// Trait for engines that classify a lead's buying intent.
#[async_trait]
pub trait IntentOracle: Send + Sync {
    /// Classify one lead against the product profile.
    ///
    /// Implementations absorb transport and parse failures into a fallback
    /// outcome. An `Err` means the oracle itself is broken; the scorer turns
    /// it into a terminal fallback result.
    async fn assess(
        &self,
        lead: &LeadRecord,
        profile: &ProductProfile,
    ) -> Result<AiOutcome, ScoringError>;

    /// Name of this oracle (for logging).
    fn name(&self) -> &str;
}

/// Oracle backed by an LLM text-generation backend.
pub struct LlmOracle {
    generator: Arc<dyn TextGenerator>,
}

impl LlmOracle {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Call the model once and interpret the reply.
    pub async fn verdict(&self, lead: &LeadRecord, profile: &ProductProfile) -> Verdict {
        let prompt = build_prompt(lead, profile);
        match self.generator.generate(&prompt).await {
            Ok(reply) => Verdict::from_reply(&reply),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    backend = self.generator.backend_name(),
                    lead = %lead.name,
                    "ai request failed"
                );
                Verdict::Unavailable
            }
        }
    }
}

#[async_trait]
impl IntentOracle for LlmOracle {
    async fn assess(
        &self,
        lead: &LeadRecord,
        profile: &ProductProfile,
    ) -> Result<AiOutcome, ScoringError> {
        let outcome = self.verdict(lead, profile).await.into_outcome();
        tracing::debug!(
            lead = %lead.name,
            intent = %outcome.intent,
            source = ?outcome.source,
            "ai assessed lead"
        );
        Ok(outcome)
    }

    fn name(&self) -> &str {
        self.generator.backend_name()
    }
}

//! Intent scorer: combines rule and AI scores per lead.
//!
//! Leads are scored strictly one after another with a short pause between
//! AI calls, so a batch never has more than one request in flight. A lead
//! whose scoring fails still gets a (fallback) result; the batch always
//! returns one result per input, in input order.

use std::sync::Arc;
use std::time::Duration;

use lq_protocol::{
    AiOutcome, AiSource, IntentLabel, LeadRecord, MAX_RULE_SCORE, ProductProfile, ScoringResult,
};

use crate::oracle::IntentOracle;
use crate::rules::RuleEvaluator;

/// Default pause between successive AI calls in a batch.
pub const DEFAULT_PACING: Duration = Duration::from_millis(100);

/// Explanation on a result whose scoring failed outright.
pub const FAILED_EXPLANATION: &str = "Scoring failed due to technical error";
/// AI explanation on a result whose scoring failed outright.
pub const FAILED_AI_EXPLANATION: &str = "Scoring service error";

/// Tunables for batch scoring.
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// Pause between consecutive leads (not after the last).
    pub pacing: Duration,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            pacing: DEFAULT_PACING,
        }
    }
}

/// Scores leads against a product profile.
pub struct IntentScorer {
    rules: RuleEvaluator,
    oracle: Arc<dyn IntentOracle>,
    config: ScorerConfig,
}

impl IntentScorer {
    pub fn new(oracle: Arc<dyn IntentOracle>) -> Self {
        Self::with_config(oracle, ScorerConfig::default())
    }

    pub fn with_config(oracle: Arc<dyn IntentOracle>, config: ScorerConfig) -> Self {
        Self {
            rules: RuleEvaluator::new(),
            oracle,
            config,
        }
    }

    /// Replace the rule evaluator (e.g. with a custom vocabulary).
    pub fn with_rules(mut self, rules: RuleEvaluator) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Score a single lead. Never fails: an oracle error yields the
    /// terminal fallback result.
    pub async fn score_one(&self, lead: &LeadRecord, profile: &ProductProfile) -> ScoringResult {
        let breakdown = self.rules.evaluate(lead, profile);
        let rule_score = breakdown.total().min(MAX_RULE_SCORE);

        let ai = match self.oracle.assess(lead, profile).await {
            Ok(ai) => ai,
            Err(e) => {
                tracing::error!(
                    lead = %lead.name,
                    oracle = self.oracle.name(),
                    error = %e,
                    "lead scoring failed, using fallback result"
                );
                return fallback_result(lead);
            }
        };

        let explanation = format!("{}AI Analysis: {}", breakdown.summary(), ai.explanation);
        let result = ScoringResult::combine(lead, rule_score, ai, explanation);

        tracing::info!(
            lead = %lead.name,
            rule_score = result.breakdown.rule_score,
            ai_score = result.breakdown.ai_score,
            score = result.final_score,
            intent = %result.intent,
            "lead scored"
        );
        result
    }

    /// Score leads sequentially, preserving order and length.
    pub async fn score_batch(
        &self,
        leads: &[LeadRecord],
        profile: &ProductProfile,
    ) -> Vec<ScoringResult> {
        let total = leads.len();
        tracing::info!(total, oracle = self.oracle.name(), "starting batch scoring");

        let mut results = Vec::with_capacity(total);
        for (index, lead) in leads.iter().enumerate() {
            tracing::debug!(position = index + 1, total, lead = %lead.name, "scoring lead");
            results.push(self.score_one(lead, profile).await);

            if index + 1 < total && !self.config.pacing.is_zero() {
                tokio::time::sleep(self.config.pacing).await;
            }
        }

        tracing::info!(scored = results.len(), "batch scoring completed");
        results
    }
}

/// Terminal fallback: rule 0, AI Low (10), final 10.
pub fn fallback_result(lead: &LeadRecord) -> ScoringResult {
    ScoringResult::combine(
        lead,
        0,
        AiOutcome::new(IntentLabel::Low, FAILED_AI_EXPLANATION, AiSource::Unavailable),
        FAILED_EXPLANATION,
    )
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lead::LeadRecord;

/// Final scores at or above this are High intent.
pub const HIGH_INTENT_THRESHOLD: u8 = 70;
/// Final scores at or above this (and below High) are Medium intent.
pub const MEDIUM_INTENT_THRESHOLD: u8 = 40;
/// Upper bound of the rule-based component.
pub const MAX_RULE_SCORE: u8 = 50;
/// Upper bound of the AI component.
pub const MAX_AI_SCORE: u8 = 50;

/// Categorical buying-readiness of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntentLabel {
    High,
    Medium,
    Low,
}

impl IntentLabel {
    pub const ALL: [IntentLabel; 3] = [IntentLabel::High, IntentLabel::Medium, IntentLabel::Low];

    /// Classify a final score (0-100).
    pub fn classify(score: u8) -> Self {
        if score >= HIGH_INTENT_THRESHOLD {
            IntentLabel::High
        } else if score >= MEDIUM_INTENT_THRESHOLD {
            IntentLabel::Medium
        } else {
            IntentLabel::Low
        }
    }

    /// Fixed AI score for an LLM-assigned label.
    pub fn ai_score(self) -> u8 {
        match self {
            IntentLabel::High => 50,
            IntentLabel::Medium => 30,
            IntentLabel::Low => 10,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntentLabel::High => "High",
            IntentLabel::Medium => "Medium",
            IntentLabel::Low => "Low",
        }
    }
}

impl fmt::Display for IntentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A label string outside High/Medium/Low.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown intent label: {0:?}")]
pub struct UnknownIntent(pub String);

impl FromStr for IntentLabel {
    type Err = UnknownIntent;

    /// Exact, case-sensitive match: the LLM is asked for these spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(IntentLabel::High),
            "Medium" => Ok(IntentLabel::Medium),
            "Low" => Ok(IntentLabel::Low),
            other => Err(UnknownIntent(other.to_string())),
        }
    }
}

/// Where an [`AiOutcome`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiSource {
    /// The model answered with a well-formed JSON verdict.
    Model,
    /// The reply was malformed; the label was guessed from keywords.
    KeywordFallback,
    /// The model could not be reached.
    Unavailable,
}

/// The AI half of a lead's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiOutcome {
    pub intent: IntentLabel,
    pub explanation: String,
    /// Always `intent.ai_score()`.
    pub ai_score: u8,
    pub source: AiSource,
}

impl AiOutcome {
    pub fn new(intent: IntentLabel, explanation: impl Into<String>, source: AiSource) -> Self {
        Self {
            intent,
            explanation: explanation.into(),
            ai_score: intent.ai_score(),
            source,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source != AiSource::Model
    }
}

/// Per-component detail kept alongside a final score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub rule_score: u8,
    pub ai_score: u8,
    pub ai_intent: IntentLabel,
    pub ai_explanation: String,
}

/// Scored lead. Created once per lead per scoring run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
    pub intent: IntentLabel,
    pub final_score: u8,
    pub explanation: String,
    pub breakdown: ScoreBreakdown,
}

impl ScoringResult {
    /// Combine a rule score and an AI outcome.
    ///
    /// Both components are clamped to their bounds, so `final_score` never
    /// exceeds 100 and always equals `rule_score + ai_score`.
    pub fn combine(
        lead: &LeadRecord,
        rule_score: u8,
        ai: AiOutcome,
        explanation: impl Into<String>,
    ) -> Self {
        let rule_score = rule_score.min(MAX_RULE_SCORE);
        let ai_score = ai.ai_score.min(MAX_AI_SCORE);
        let final_score = rule_score + ai_score;

        Self {
            name: lead.name.clone(),
            role: lead.role.clone(),
            company: lead.company.clone(),
            industry: lead.industry.clone(),
            location: lead.location.clone(),
            intent: IntentLabel::classify(final_score),
            final_score,
            explanation: explanation.into(),
            breakdown: ScoreBreakdown {
                rule_score,
                ai_score,
                ai_intent: ai.intent,
                ai_explanation: ai.explanation,
            },
        }
    }
}

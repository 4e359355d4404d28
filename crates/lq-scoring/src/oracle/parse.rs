//! Reply parsing for the intent oracle.
//!
//! The model is asked for `{"intent": ..., "reasoning": ...}` but replies are
//! free text: the JSON may be wrapped in prose or markdown fences, or missing.
//! A reply that cannot be validated falls back to a keyword scan.

use serde::Deserialize;
use thiserror::Error;

use lq_protocol::{AiOutcome, AiSource, IntentLabel, UnknownIntent};

/// Explanation attached when the label was guessed from keywords.
pub const KEYWORD_FALLBACK_EXPLANATION: &str =
    "AI response could not be parsed; intent inferred from keywords in the reply.";

/// Explanation attached when the model could not be reached.
pub const UNAVAILABLE_EXPLANATION: &str = "AI service unavailable; defaulting to low intent.";

/// What the oracle learned from one model call, before collapsing into an
/// [`AiOutcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Well-formed JSON with a valid label.
    Parsed {
        intent: IntentLabel,
        reasoning: String,
    },
    /// Malformed reply; label from the keyword scan.
    Keywords { intent: IntentLabel },
    /// Transport failure; no reply at all.
    Unavailable,
}

impl Verdict {
    /// Interpret raw reply text.
    pub fn from_reply(raw: &str) -> Self {
        match parse_reply(raw) {
            Ok((intent, reasoning)) => Verdict::Parsed { intent, reasoning },
            Err(e) => {
                let intent = scan_keywords(raw);
                tracing::warn!(error = %e, fallback_intent = %intent, "unparseable AI reply, using keyword fallback");
                Verdict::Keywords { intent }
            }
        }
    }

    pub fn into_outcome(self) -> AiOutcome {
        match self {
            Verdict::Parsed { intent, reasoning } => AiOutcome::new(intent, reasoning, AiSource::Model),
            Verdict::Keywords { intent } => {
                AiOutcome::new(intent, KEYWORD_FALLBACK_EXPLANATION, AiSource::KeywordFallback)
            }
            Verdict::Unavailable => {
                AiOutcome::new(IntentLabel::Low, UNAVAILABLE_EXPLANATION, AiSource::Unavailable)
            }
        }
    }
}

/// Why a reply failed validation.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("no JSON object found in reply")]
    NoObject,

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Intent(#[from] UnknownIntent),
}

/// Expected JSON shape from the LLM.
#[derive(Debug, Deserialize)]
struct RawVerdict {
    intent: Option<String>,
    reasoning: Option<String>,
}

/// Extract and validate the JSON verdict.
pub fn parse_reply(raw: &str) -> Result<(IntentLabel, String), ReplyError> {
    let object = extract_json_object(raw).ok_or(ReplyError::NoObject)?;
    let verdict: RawVerdict = serde_json::from_str(object)?;

    let intent = verdict
        .intent
        .filter(|s| !s.trim().is_empty())
        .ok_or(ReplyError::MissingField("intent"))?;
    let reasoning = verdict
        .reasoning
        .filter(|s| !s.trim().is_empty())
        .ok_or(ReplyError::MissingField("reasoning"))?;

    Ok((intent.trim().parse()?, reasoning.trim().to_string()))
}

/// Return the first balanced `{...}` in `text`.
///
/// Braces inside JSON string literals do not count towards nesting.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Guess a label from free text: high/strong, then medium/moderate, else Low.
pub fn scan_keywords(raw: &str) -> IntentLabel {
    let lower = raw.to_lowercase();
    if lower.contains("high") || lower.contains("strong") {
        IntentLabel::High
    } else if lower.contains("medium") || lower.contains("moderate") {
        IntentLabel::Medium
    } else {
        IntentLabel::Low
    }
}

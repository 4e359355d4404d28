//! Scoring engine error types.

use thiserror::Error;

/// Errors from an LLM text-generation backend.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Required credential absent at client construction. Fatal at startup.
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),

    #[error("invalid LLM configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM returned no text")]
    EmptyResponse,
}

impl LlmError {
    /// Configuration problems are surfaced; everything else is absorbed by the oracle.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LlmError::MissingApiKey(_) | LlmError::InvalidConfig(_) | LlmError::Client(_)
        )
    }
}

/// An intent oracle broke its contract while scoring a single lead.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("intent oracle failed: {0}")]
    Oracle(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_names_the_variable() {
        let err = LlmError::MissingApiKey("GEMINI_API_KEY");
        assert!(err.to_string().contains("GEMINI_API_KEY"));
        assert!(err.is_configuration());
    }

    #[test]
    fn transport_errors_are_not_configuration() {
        assert!(!LlmError::EmptyResponse.is_configuration());
        let err = LlmError::Status {
            status: 503,
            body: "overloaded".into(),
        };
        assert!(!err.is_configuration());
        assert!(err.to_string().contains("503"));
    }
}

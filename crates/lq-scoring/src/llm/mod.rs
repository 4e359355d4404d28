//! Text-generation backends for the intent oracle.
//!
//! Each backend turns one prompt into the model's raw reply text. Parsing
//! that text is the oracle's job, not the backend's.

pub mod gemini;
pub mod ollama;

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::LlmError;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Trait for single-shot text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt and return the raw reply text.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// Backend name (for logging).
    fn backend_name(&self) -> &str;
}

/// Which backend serves the oracle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Gemini,
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(LlmProvider::Gemini),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(LlmError::InvalidConfig(format!(
                "unknown LLM provider '{other}' (expected gemini or ollama)"
            ))),
        }
    }
}

/// LLM backend settings, loadable from TOML or environment.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,
    /// API key (required for Gemini).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Model name; provider default when absent.
    #[serde(default)]
    pub model: Option<String>,
    /// Base URL override (tests, proxies, remote Ollama hosts).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            api_key: None,
            model: None,
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Load config from environment variables.
    ///
    /// `LLM_PROVIDER`, `GEMINI_API_KEY`, `LLM_MODEL` (or `GEMINI_MODEL`),
    /// `LLM_BASE_URL`, `LLM_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load config through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match non_blank("LLM_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => LlmProvider::default(),
        };

        let timeout_secs = match non_blank("LLM_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                LlmError::InvalidConfig(format!("LLM_TIMEOUT_SECS must be an integer, got '{raw}'"))
            })?,
            None => default_timeout_secs(),
        };

        Ok(Self {
            provider,
            api_key: non_blank("GEMINI_API_KEY"),
            model: non_blank("LLM_MODEL").or_else(|| non_blank("GEMINI_MODEL")),
            base_url: non_blank("LLM_BASE_URL"),
            timeout_secs,
        })
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(match self.provider {
            LlmProvider::Gemini => DEFAULT_GEMINI_MODEL,
            LlmProvider::Ollama => DEFAULT_OLLAMA_MODEL,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(match self.provider {
                LlmProvider::Gemini => DEFAULT_GEMINI_BASE_URL,
                LlmProvider::Ollama => DEFAULT_OLLAMA_BASE_URL,
            })
            .trim_end_matches('/')
    }

    fn http_client(&self) -> Result<reqwest::Client, LlmError> {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| LlmError::Client(e.to_string()))
    }
}

/// Build the configured backend. Fails fast on missing credentials.
pub fn build_generator(config: &LlmConfig) -> Result<Arc<dyn TextGenerator>, LlmError> {
    let generator: Arc<dyn TextGenerator> = match config.provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::new(config)?),
        LlmProvider::Ollama => Arc::new(OllamaClient::new(config)?),
    };
    tracing::info!(
        backend = generator.backend_name(),
        model = config.model(),
        "llm backend ready"
    );
    Ok(generator)
}

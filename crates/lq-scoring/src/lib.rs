//! LeadQual scoring engine.
//!
//! Combines a deterministic rule evaluation (role, industry, profile
//! completeness) with a buying-intent verdict from an external LLM into a
//! single bounded score per lead.
//!
//! - [`rules`]: pure rule evaluation over static vocabularies.
//! - [`llm`]: HTTP text-generation backends (Gemini, Ollama).
//! - [`oracle`]: prompt building and reply parsing with keyword fallback.
//! - [`scorer`]: per-lead combination and sequential batch scoring.

pub mod error;
pub mod llm;
pub mod mock;
pub mod oracle;
pub mod rules;
pub mod scorer;

pub use error::{LlmError, ScoringError};
pub use llm::{LlmConfig, LlmProvider, TextGenerator};
pub use mock::{MockGenerator, MockOracle};
pub use oracle::{IntentOracle, LlmOracle};
pub use rules::{RuleBreakdown, RuleEvaluator, Vocabulary};
pub use scorer::{IntentScorer, ScorerConfig};

//! Mock generator and oracle for testing without a real LLM.

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use lq_protocol::{AiOutcome, AiSource, IntentLabel, LeadRecord, ProductProfile};

use crate::error::{LlmError, ScoringError};
use crate::llm::TextGenerator;
use crate::oracle::IntentOracle;

/// Text generator that replays scripted replies in order.
///
/// Records every prompt for assertions. When the script runs out it
/// returns `LlmError::EmptyResponse`.
pub struct MockGenerator {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_replies(replies: impl IntoIterator<Item = Result<String, LlmError>>) -> Self {
        let mock = Self::new();
        mock.replies.lock().unwrap().extend(replies);
        mock
    }

    /// Queue a successful reply.
    pub fn push_reply(&self, text: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a transport failure.
    pub fn push_failure(&self, error: LlmError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// All prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

/// Oracle that returns a fixed label, and breaks for selected leads.
pub struct MockOracle {
    intent: IntentLabel,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl MockOracle {
    /// Always answer `intent`.
    pub fn fixed(intent: IntentLabel) -> Self {
        Self {
            intent,
            failing: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Return `Err` for leads with any of these names.
    pub fn failing_for<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failing.extend(names.into_iter().map(Into::into));
        self
    }

    /// Number of `assess` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntentOracle for MockOracle {
    async fn assess(
        &self,
        lead: &LeadRecord,
        _profile: &ProductProfile,
    ) -> Result<AiOutcome, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(&lead.name) {
            return Err(ScoringError::Oracle(format!(
                "mock oracle failure for '{}'",
                lead.name
            )));
        }
        Ok(AiOutcome::new(
            self.intent,
            format!("Mock assessment: {} intent", self.intent),
            AiSource::Model,
        ))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

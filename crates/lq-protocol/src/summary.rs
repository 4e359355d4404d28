use serde::{Deserialize, Serialize};

use crate::scoring::{IntentLabel, ScoringResult};

/// Aggregate view of a finished scoring run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_leads: usize,
    pub high_intent: usize,
    pub medium_intent: usize,
    pub low_intent: usize,
    /// Mean final score, rounded half-up. Zero for an empty run.
    pub average_score: u8,
}

impl BatchSummary {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a ScoringResult>) -> Self {
        let mut summary = Self::default();
        let mut total_score: u64 = 0;

        for result in results {
            summary.total_leads += 1;
            total_score += u64::from(result.final_score);
            match result.intent {
                IntentLabel::High => summary.high_intent += 1,
                IntentLabel::Medium => summary.medium_intent += 1,
                IntentLabel::Low => summary.low_intent += 1,
            }
        }

        if summary.total_leads > 0 {
            let n = summary.total_leads as u64;
            // Integer half-up rounding; the mean of 0..=100 values fits in u8.
            summary.average_score = ((total_score * 2 + n) / (n * 2)) as u8;
        }

        summary
    }
}

//! Rule-based lead evaluation: pattern matching over fixed vocabularies.
//!
//! Scores three signals with no external calls and no state:
//! - **Role relevance** (0-20): decision makers over influencers.
//! - **Industry match** (0-20): direct match with an ideal use case, or
//!   membership in a shared industry group.
//! - **Completeness** (0-10): how much of the lead record is filled in.

use serde::Serialize;

use lq_protocol::{LeadRecord, ProductProfile};

pub const DECISION_MAKER_SCORE: u8 = 20;
pub const INFLUENCER_SCORE: u8 = 10;
pub const INDUSTRY_MATCH_SCORE: u8 = 20;
pub const RELATED_INDUSTRY_SCORE: u8 = 10;
pub const MAX_COMPLETENESS_SCORE: u8 = 10;
/// Completeness at or above this counts as "complete profile data".
pub const COMPLETE_PROFILE_THRESHOLD: u8 = 8;

/// Titles that carry purchasing authority. Checked before influencers.
pub const DECISION_MAKER_ROLES: &[&str] = &[
    "ceo",
    "cto",
    "cfo",
    "cmo",
    "president",
    "founder",
    "head of",
    "director",
    "vp",
    "manager",
    "lead",
];

/// Titles that shape a purchase without owning it.
pub const INFLUENCER_ROLES: &[&str] = &["senior", "specialist", "analyst", "coordinator"];

/// Industry groups: two industries are related when one group has a keyword
/// in each of them.
pub const INDUSTRY_GROUPS: &[(&str, &[&str])] = &[
    (
        "tech",
        &["software", "saas", "technology", "it", "digital", "tech"],
    ),
    (
        "saas",
        &["software", "technology", "tech", "cloud", "platform"],
    ),
    ("b2b", &["enterprise", "business", "corporate", "commercial"]),
    ("ecommerce", &["retail", "online", "marketplace", "shopping"]),
    ("finance", &["fintech", "banking", "financial", "payments"]),
    ("healthcare", &["medical", "health", "pharma", "biotech"]),
    ("education", &["edtech", "learning", "training", "academic"]),
];

/// Lead fields counted towards completeness.
const COMPLETENESS_FIELD_COUNT: u8 = 5;

/// The keyword tables a [`RuleEvaluator`] matches against.
#[derive(Debug, Clone, Copy)]
pub struct Vocabulary {
    pub decision_makers: &'static [&'static str],
    pub influencers: &'static [&'static str],
    pub industry_groups: &'static [(&'static str, &'static [&'static str])],
}

impl Vocabulary {
    pub const DEFAULT: Vocabulary = Vocabulary {
        decision_makers: DECISION_MAKER_ROLES,
        influencers: INFLUENCER_ROLES,
        industry_groups: INDUSTRY_GROUPS,
    };
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rule sub-scores for one lead. Always recomputed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RuleBreakdown {
    pub role_score: u8,
    pub industry_score: u8,
    pub completeness_score: u8,
}

impl RuleBreakdown {
    /// Unclamped sum of the three sub-scores; the scorer applies the cap.
    pub fn total(&self) -> u8 {
        self.role_score + self.industry_score + self.completeness_score
    }

    /// Human-readable list of the rules that fired, e.g.
    /// `"Profile analysis: Decision maker role, Related industry. "`.
    pub fn summary(&self) -> String {
        let mut reasons = Vec::new();

        match self.role_score {
            DECISION_MAKER_SCORE => reasons.push("Decision maker role"),
            INFLUENCER_SCORE => reasons.push("Influencer role"),
            _ => {}
        }

        match self.industry_score {
            INDUSTRY_MATCH_SCORE => reasons.push("Industry matches profile"),
            RELATED_INDUSTRY_SCORE => reasons.push("Related industry"),
            _ => {}
        }

        if self.completeness_score >= COMPLETE_PROFILE_THRESHOLD {
            reasons.push("Complete profile data");
        }

        if reasons.is_empty() {
            return "Limited profile information available. ".to_string();
        }

        format!("Profile analysis: {}. ", reasons.join(", "))
    }
}

/// Deterministic evaluator for the rule half of a lead's score.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEvaluator {
    vocabulary: Vocabulary,
}

impl RuleEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn evaluate(&self, lead: &LeadRecord, profile: &ProductProfile) -> RuleBreakdown {
        RuleBreakdown {
            role_score: self.role_score(&lead.role),
            industry_score: self.industry_score(&lead.industry, &profile.ideal_use_cases),
            completeness_score: completeness_score(lead),
        }
    }

    pub fn role_score(&self, role: &str) -> u8 {
        let role = role.trim().to_lowercase();
        if role.is_empty() {
            return 0;
        }

        if matches_any(&role, self.vocabulary.decision_makers) {
            DECISION_MAKER_SCORE
        } else if matches_any(&role, self.vocabulary.influencers) {
            INFLUENCER_SCORE
        } else {
            0
        }
    }

    /// Direct substring matches against every use case win over related
    /// matches, regardless of use-case order.
    pub fn industry_score(&self, industry: &str, use_cases: &[String]) -> u8 {
        let industry = industry.trim().to_lowercase();
        if industry.is_empty() {
            return 0;
        }

        let use_cases: Vec<String> = use_cases
            .iter()
            .map(|use_case| use_case.trim().to_lowercase())
            .filter(|use_case| !use_case.is_empty())
            .collect();

        // Direct match first, across all use cases in order.
        if use_cases
            .iter()
            .any(|use_case| use_case.contains(&industry) || industry.contains(use_case.as_str()))
        {
            return INDUSTRY_MATCH_SCORE;
        }

        if use_cases
            .iter()
            .any(|use_case| self.is_related(&industry, use_case))
        {
            return RELATED_INDUSTRY_SCORE;
        }

        0
    }

    /// Both (lower-case) strings hit a keyword from the same group.
    pub fn is_related(&self, industry: &str, use_case: &str) -> bool {
        self.vocabulary
            .industry_groups
            .iter()
            .any(|(_, keywords)| matches_any(industry, keywords) && matches_any(use_case, keywords))
    }
}

/// Filled-in share of the five core fields scaled to 0-10, plus one for a bio.
pub fn completeness_score(lead: &LeadRecord) -> u8 {
    let filled = [
        &lead.name,
        &lead.role,
        &lead.company,
        &lead.industry,
        &lead.location,
    ]
    .iter()
    .filter(|field| !field.trim().is_empty())
    .count() as u8;

    let base = (f64::from(filled) / f64::from(COMPLETENESS_FIELD_COUNT)
        * f64::from(MAX_COMPLETENESS_SCORE))
    .round() as u8;

    if lead.bio_text().is_some() {
        (base + 1).min(MAX_COMPLETENESS_SCORE)
    } else {
        base
    }
}

/// Check if the text contains any of the given patterns.
fn matches_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

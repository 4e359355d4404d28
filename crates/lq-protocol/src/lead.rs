use serde::{Deserialize, Serialize};

/// A prospective customer, as uploaded by the operator.
///
/// Only `name` and `company` are required for a lead to be scored; every
/// other field defaults to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    /// Free-text profile bio (the `linkedin_bio` CSV column).
    #[serde(default, alias = "linkedin_bio", skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl LeadRecord {
    pub fn new(name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            company: company.into(),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = industry.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// A lead needs both a name and a company to be scored.
    pub fn is_eligible(&self) -> bool {
        !self.name.trim().is_empty() && !self.company.trim().is_empty()
    }

    /// The bio, if present and not blank.
    pub fn bio_text(&self) -> Option<&str> {
        self.bio.as_deref().filter(|bio| !bio.trim().is_empty())
    }
}

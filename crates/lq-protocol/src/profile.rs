use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The product ("offer") that leads are scored against.
///
/// Immutable for the duration of a scoring run. Build it through
/// [`ProductProfile::new`] so the non-empty invariants hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductProfile {
    /// Product name shown to the LLM.
    pub name: String,
    /// Selling points, in the order the operator entered them.
    pub value_props: Vec<String>,
    /// Target-customer categories matched against a lead's industry.
    pub ideal_use_cases: Vec<String>,
}

/// Why a product profile was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("name must be a non-empty string")]
    EmptyName,

    #[error("value_props must be an array with at least one item")]
    NoValueProps,

    #[error("ideal_use_cases must be an array with at least one item")]
    NoUseCases,
}

impl ProductProfile {
    /// Validate and normalize a profile. Every string is trimmed and blank
    /// list entries are dropped before the emptiness checks run.
    pub fn new(
        name: impl Into<String>,
        value_props: Vec<String>,
        ideal_use_cases: Vec<String>,
    ) -> Result<Self, ProfileError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }

        let value_props = trimmed_non_blank(value_props);
        if value_props.is_empty() {
            return Err(ProfileError::NoValueProps);
        }

        let ideal_use_cases = trimmed_non_blank(ideal_use_cases);
        if ideal_use_cases.is_empty() {
            return Err(ProfileError::NoUseCases);
        }

        Ok(Self {
            name,
            value_props,
            ideal_use_cases,
        })
    }
}

fn trimmed_non_blank(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

//! End-to-end tests for LeadQual live under `tests/`.

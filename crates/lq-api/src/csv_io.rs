//! CSV import of leads and export of scoring results.

use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use lq_protocol::{LeadRecord, ScoringResult};

/// Columns read from an uploaded lead file.
pub const LEAD_COLUMNS: [&str; 6] = ["name", "role", "company", "industry", "location", "linkedin_bio"];

/// Header row of the results export.
pub const EXPORT_HEADER: [&str; 8] = [
    "Name", "Role", "Company", "Industry", "Location", "Intent", "Score", "Reasoning",
];

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct LeadRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    role: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    industry: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    linkedin_bio: String,
}

impl From<LeadRow> for LeadRecord {
    fn from(row: LeadRow) -> Self {
        let lead = LeadRecord::new(row.name, row.company)
            .with_role(row.role)
            .with_industry(row.industry)
            .with_location(row.location);
        if row.linkedin_bio.is_empty() {
            lead
        } else {
            lead.with_bio(row.linkedin_bio)
        }
    }
}

/// Parse a lead CSV with a header row.
///
/// Values are trimmed, absent columns read as empty, and rows without a
/// name or company are dropped.
pub fn parse_leads<R: Read>(reader: R) -> Result<Vec<LeadRecord>, CsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut leads = Vec::new();
    let mut skipped = 0usize;
    for record in csv_reader.records() {
        let mut record = record?;
        // Short rows read as empty trailing columns; extra cells are ignored.
        record.truncate(headers.len());
        while record.len() < headers.len() {
            record.push_field("");
        }
        let row: LeadRow = record.deserialize(Some(&headers))?;
        let lead = LeadRecord::from(row);
        if lead.is_eligible() {
            leads.push(lead);
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, kept = leads.len(), "dropped lead rows without name or company");
    }
    Ok(leads)
}

/// Render results as CSV, header first, one row per result.
pub fn write_results<'a>(
    results: impl IntoIterator<Item = &'a ScoringResult>,
) -> Result<Vec<u8>, CsvError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;

    for result in results {
        let score = result.final_score.to_string();
        writer.write_record([
            result.name.as_str(),
            result.role.as_str(),
            result.company.as_str(),
            result.industry.as_str(),
            result.location.as_str(),
            result.intent.as_str(),
            score.as_str(),
            result.explanation.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| CsvError::Io(e.into_error()))
}

/// `lead-results-YYYY-MM-DD.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("lead-results-{}.csv", date.format("%Y-%m-%d"))
}

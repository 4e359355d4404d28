//! Lead upload and listing endpoints.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};

use crate::csv_io::{self, LEAD_COLUMNS};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::store::StoredLead;

/// Multipart field carrying the CSV file.
pub const UPLOAD_FIELD: &str = "leads";

/// Lead view returned by the API (bio omitted).
#[derive(Debug, Serialize)]
pub struct LeadSummary {
    pub name: String,
    pub role: String,
    pub company: String,
    pub industry: String,
    pub location: String,
}

impl From<StoredLead> for LeadSummary {
    fn from(stored: StoredLead) -> Self {
        let lead = stored.lead;
        Self {
            name: lead.name,
            role: lead.role,
            company: lead.company,
            industry: lead.industry,
            location: lead.location,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeadsResponse {
    pub message: &'static str,
    pub count: usize,
    pub leads: Vec<LeadSummary>,
}

impl LeadsResponse {
    fn new(message: &'static str, leads: Vec<StoredLead>) -> Self {
        Self {
            message,
            count: leads.len(),
            leads: leads.into_iter().map(LeadSummary::from).collect(),
        }
    }
}

/// POST /api/v1/leads/upload: parse the CSV in field `leads` and replace
/// the stored lead list.
pub async fn upload_leads(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<LeadsResponse>)> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("could not read upload: {e}")))?;
            file = Some(bytes);
            break;
        }
    }

    let Some(bytes) = file else {
        return Err(ApiError::BadRequest(format!(
            "no file uploaded; send a CSV in the '{UPLOAD_FIELD}' field with columns {}",
            LEAD_COLUMNS.join(",")
        )));
    };

    let leads = csv_io::parse_leads(&bytes[..])
        .map_err(|e| ApiError::BadRequest(format!("could not parse CSV: {e}")))?;
    if leads.is_empty() {
        return Err(ApiError::BadRequest(
            "no valid leads found; rows need both name and company".into(),
        ));
    }

    let stored = state.store.set_leads(leads).await;
    tracing::info!(count = stored.len(), bytes = bytes.len(), "lead file uploaded");

    Ok((
        StatusCode::CREATED,
        Json(LeadsResponse::new("Leads uploaded", stored)),
    ))
}

/// GET /api/v1/leads: the stored leads.
pub async fn list_leads(State(state): State<AppState>) -> ApiResult<Json<LeadsResponse>> {
    let leads = state.store.leads().await;
    if leads.is_empty() {
        return Err(ApiError::NotFound(
            "no leads uploaded; POST /api/v1/leads/upload first".into(),
        ));
    }
    Ok(Json(LeadsResponse::new("Leads found", leads)))
}

/// GET /api/v1/leads/sample: expected CSV layout.
pub async fn sample_format() -> Json<Value> {
    Json(json!({
        "message": "Sample CSV format",
        "field": UPLOAD_FIELD,
        "columns": LEAD_COLUMNS,
        "sample_data": [
            {
                "name": "John Doe",
                "role": "CEO",
                "company": "TechCorp",
                "industry": "Technology",
                "location": "San Francisco",
                "linkedin_bio": "Tech leader with 10+ years experience",
            },
            {
                "name": "Jane Smith",
                "role": "Marketing Manager",
                "company": "GrowthCo",
                "industry": "B2B SaaS",
                "location": "New York",
                "linkedin_bio": "Marketing expert focused on growth",
            },
        ],
        "csv_example": format!(
            "{}\nJohn Doe,CEO,TechCorp,Technology,San Francisco,Tech leader with 10+ years experience",
            LEAD_COLUMNS.join(",")
        ),
    }))
}

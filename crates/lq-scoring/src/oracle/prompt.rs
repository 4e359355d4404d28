//! Prompt construction for buying-intent classification.

use lq_protocol::{LeadRecord, ProductProfile};

/// Output contract appended to every prompt.
const RESPONSE_FORMAT: &str = r#"Classify the lead's buying intent for this product as High, Medium, or Low.

Reply with a single JSON object and nothing else:
{"intent": "High" | "Medium" | "Low", "reasoning": "<one or two sentences>"}"#;

/// Build the classification prompt for one lead.
pub fn build_prompt(lead: &LeadRecord, profile: &ProductProfile) -> String {
    format!(
        "You qualify sales leads for a B2B product.\n\
         \n\
         PRODUCT: {product}\n\
         Value propositions: {value_props}\n\
         Ideal customers: {use_cases}\n\
         \n\
         LEAD:\n\
         Name: {name}\n\
         Role: {role}\n\
         Company: {company}\n\
         Industry: {industry}\n\
         Location: {location}\n\
         Bio: {bio}\n\
         \n\
         {RESPONSE_FORMAT}",
        product = profile.name,
        value_props = profile.value_props.join(", "),
        use_cases = profile.ideal_use_cases.join(", "),
        name = lead.name,
        role = lead.role,
        company = lead.company,
        industry = lead.industry,
        location = lead.location,
        bio = lead.bio_text().unwrap_or("Not provided"),
    )
}

//! Generative extraction backend.
//!
//! Sends the arrivals report to the Gemini `generateContent` API with a
//! constrained JSON response schema and parses the reply into the shared
//! record shape. Interchangeable with the rule engine behind
//! [`GuestExtractor`]; a deployment runs one backend or the other, never
//! both. Unlike the rule engine, the model also reports arrival and
//! departure dates.

use async_trait::async_trait;
use base64::Engine as _;
use reqwest::Client;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use regan_core::models::config::GenAiConfig;
use regan_core::models::guest::GuestRecord;
use regan_core::report::{GuestExtractor, ReportSource};
use regan_core::ExtractionError;

/// Errors from the generative backend.
#[derive(Error, Debug)]
pub enum GenAiError {
    /// Transport-level failure.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success API response.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The model returned no usable candidate text.
    #[error("no data returned from model")]
    EmptyResponse,

    /// The candidate text was not valid record JSON.
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<GenAiError> for ExtractionError {
    fn from(err: GenAiError) -> Self {
        ExtractionError::Backend(err.to_string())
    }
}

/// Extraction instruction given to the model. Encodes the same decision
/// rules the rule engine applies: two detection signals, positive
/// amounts, and the "None"/"N/A" sentinels.
const INSTRUCTION: &str = r#"You are an intelligent document-analysis assistant.
Your task is to identify all returning guests from the provided hotel "Arrivals Detailed" report.

PRIMARY GOAL
Identify guests who are returning guests using either:
1) A Fixed Charge that explicitly indicates a return guest (e.g. "Return Guest", "Return Guest Credit", "RG").
2) A Previous Stays / Number of Stays value of 1 or greater.

If either is true, the guest is a Returning Guest.

DATA TO EXTRACT (for each returning guest):
- Primary Guest Name (preserve exact spelling, Last, First)
- Confirmation Number
- Arrival Date (e.g. MM/DD/YY)
- Departure Date (e.g. MM/DD/YY)
- Returning Guest Identified By: "Fixed Charge", "Previous Stays", or "Both"
- Number of Previous Stays: numeric value or "0"
- Fixed Charge Description:
  STRICT FILTER: only include the description if it contains "Return Guest", "RG", or "Return Guest Credit".
  If the description is "1185 Return Guest Thank", extract it as "Return Guest Credit".
  If the fixed charge is NOT related to Return Guest (e.g. "Amenity", "Package", "Parking"), set this to "None".
- Fixed Charge Amount: amount or "N/A".
  IMPORTANT RULE: always extract as a positive number (convert -100.00 to 100.00). Remove any negative signs.
  If Fixed Charge Description is "None" (due to filtering), set Amount to "N/A".
- Accompanying Guest(s): full name(s) or "None"

INTERPRETATION RULES:
- Do not infer missing data.
- Treat each reservation independently.
- If "Prev. Stays" is blank/missing, assume 0 unless a Fixed Charge is present."#;

/// Gemini-backed report analyzer.
pub struct GenAiExtractor {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GenAiExtractor {
    /// Create an extractor with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        let config = GenAiConfig::default();
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: config.model,
            endpoint: config.endpoint,
        }
    }

    /// Override model and endpoint from configuration.
    pub fn with_config(mut self, config: GenAiConfig) -> Self {
        self.model = config.model;
        self.endpoint = config.endpoint;
        self
    }

    /// Analyze a PDF report, sent to the model as inline data.
    pub async fn analyze_pdf(&self, data: &[u8]) -> Result<Vec<GuestRecord>, GenAiError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(data);
        self.generate(json!({
            "inlineData": { "mimeType": "application/pdf", "data": encoded }
        }))
        .await
    }

    /// Analyze already-extracted report text.
    pub async fn analyze_text(&self, text: &str) -> Result<Vec<GuestRecord>, GenAiError> {
        self.generate(json!({ "text": text })).await
    }

    async fn generate(&self, document_part: Value) -> Result<Vec<GuestRecord>, GenAiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let body = json!({
            "contents": [{
                "parts": [ { "text": INSTRUCTION }, document_part ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        debug!("Requesting extraction from model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Api { status, body });
        }

        let reply: Value = response.json().await?;
        let text = reply["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or(GenAiError::EmptyResponse)?;

        let records: Vec<GuestRecord> = serde_json::from_str(text)?;
        debug!("Model returned {} returning guests", records.len());
        Ok(records)
    }
}

/// JSON schema constraining the model reply to the shared record shape.
fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "guestName": { "type": "STRING" },
                "confirmationNumber": { "type": "STRING" },
                "arrivalDate": { "type": "STRING" },
                "departureDate": { "type": "STRING" },
                "identifiedBy": {
                    "type": "STRING",
                    "enum": ["Fixed Charge", "Previous Stays", "Both"]
                },
                "numberOfPreviousStays": { "type": "STRING" },
                "fixedChargeDescription": { "type": "STRING" },
                "fixedChargeAmount": { "type": "STRING" },
                "accompanyingGuests": { "type": "STRING" }
            },
            "required": [
                "guestName", "confirmationNumber", "arrivalDate", "departureDate",
                "identifiedBy", "numberOfPreviousStays", "fixedChargeDescription",
                "fixedChargeAmount", "accompanyingGuests"
            ]
        }
    })
}

#[async_trait]
impl GuestExtractor for GenAiExtractor {
    async fn extract(
        &self,
        source: &ReportSource,
    ) -> Result<Vec<GuestRecord>, ExtractionError> {
        let records = match source {
            ReportSource::Pdf(data) => self.analyze_pdf(data).await?,
            ReportSource::Text(text) => self.analyze_text(text).await?,
        };
        Ok(records)
    }
}

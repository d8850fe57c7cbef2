//! Wire types for the customization backend

use chrono::{DateTime, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /customize-resume`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomizeRequest {
    pub resume_text: String,
    pub job_description: String,
    pub session_id: Option<String>,
}

/// Structured output of the backend. Never mutated after it is received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationResult {
    pub customized_resume: String,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub keywords_added: Vec<String>,
    #[serde(rename = "processing_time", default)]
    pub processing_time_seconds: Option<f64>,
    /// Session the backend filed this run under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Response of `POST /extract-pdf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfExtraction {
    pub extracted_text: String,
    pub page_count: u32,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Response of `GET /history/{session_id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingHistory {
    pub session_id: String,
    pub processing_count: usize,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_processed: Option<NaiveDateTime>,
    pub recent_customizations: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    pub job_title: String,
    pub processing_time: Option<f64>,
    pub keywords_added: Vec<String>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<NaiveDateTime>,
}

/// Response of `GET /`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BannerResponse {
    pub message: String,
}

/// Accepts both RFC 3339 timestamps and the offset-less ISO form the backend
/// emits for naive datetimes. Offsets are normalised to UTC. Anything else
/// decodes as `None` rather than failing the whole record.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.naive_utc()));
    }

    match raw.parse::<NaiveDateTime>() {
        Ok(dt) => Ok(Some(dt)),
        Err(e) => {
            debug!("Ignoring unparseable timestamp '{}': {}", raw, e);
            Ok(None)
        }
    }
}

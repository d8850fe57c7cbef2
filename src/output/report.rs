//! Report structure handed to the formatters

use crate::api::CustomizationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customization result as the user currently sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultReport {
    /// Current text, including local edits
    pub customized_resume: String,

    pub improvements: Vec<String>,

    pub keywords_added: Vec<String>,

    /// Backend-reported processing time in seconds
    pub processing_time_seconds: Option<f64>,

    pub session_id: Option<String>,

    /// Whether `customized_resume` differs from what the backend returned
    pub edited: bool,

    pub generated_at: DateTime<Utc>,
}

impl ResultReport {
    pub fn new(result: &CustomizationResult, current_text: &str) -> Self {
        Self {
            customized_resume: current_text.to_string(),
            improvements: result.improvements.clone(),
            keywords_added: result.keywords_added.clone(),
            processing_time_seconds: result.processing_time_seconds,
            session_id: result.session_id.clone(),
            edited: current_text != result.customized_resume,
            generated_at: Utc::now(),
        }
    }

    pub fn word_count(&self) -> usize {
        self.customized_resume.split_whitespace().count()
    }
}

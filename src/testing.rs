//! Test doubles shared by the unit tests

use crate::api::{CustomizationBackend, CustomizationResult, CustomizeRequest, PdfExtraction, ProcessingHistory};
use crate::error::{Result, ResumeTailorError};
use crate::input::UploadedFile;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn sample_result() -> CustomizationResult {
    CustomizationResult {
        customized_resume: "JANE DOE\nSenior Rust Engineer\n\nSKILLS\nRust, Tokio, AWS".to_string(),
        improvements: vec![
            "Enhanced professional summary to align with job requirements".to_string(),
            "Added industry-specific keywords for ATS optimization".to_string(),
        ],
        keywords_added: vec!["rust".to_string(), "aws".to_string(), "docker".to_string()],
        processing_time_seconds: Some(3.42),
        session_id: None,
    }
}

/// Backend that answers from canned values and fails when none is set.
/// History lookups always fail.
#[derive(Default)]
pub struct FakeBackend {
    result: Option<CustomizationResult>,
    extraction: Option<PdfExtraction>,
    customize_calls: AtomicUsize,
    extract_calls: AtomicUsize,
    last_request: Mutex<Option<CustomizeRequest>>,
}

impl FakeBackend {
    pub fn with_result(mut self, result: CustomizationResult) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_extraction(mut self, text: &str, page_count: u32) -> Self {
        self.extraction = Some(PdfExtraction {
            extracted_text: text.to_string(),
            page_count,
            filename: None,
        });
        self
    }

    pub fn customize_calls(&self) -> usize {
        self.customize_calls.load(Ordering::SeqCst)
    }

    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CustomizeRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl CustomizationBackend for FakeBackend {
    async fn customize(&self, request: &CustomizeRequest) -> Result<CustomizationResult> {
        self.customize_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.result
            .clone()
            .ok_or_else(|| ResumeTailorError::CustomizationRequest("Failed to customize resume".to_string()))
    }

    async fn extract_pdf(&self, _file: &UploadedFile) -> Result<PdfExtraction> {
        self.extract_calls.fetch_add(1, Ordering::SeqCst);
        self.extraction
            .clone()
            .ok_or_else(|| ResumeTailorError::FileExtraction("No text could be extracted from the PDF".to_string()))
    }

    async fn history(&self, _session_id: &str) -> Result<ProcessingHistory> {
        Err(ResumeTailorError::HistoryLookup("Failed to get processing history".to_string()))
    }
}

//! Customization backend client
//! All network traffic of the application goes through this module

pub mod client;
pub mod types;

use crate::error::Result;
use crate::input::UploadedFile;
use std::future::Future;

pub use client::CustomizationClient;
pub use types::{CustomizationResult, CustomizeRequest, HistoryEntry, PdfExtraction, ProcessingHistory};

/// The remote service the wizard talks to.
pub trait CustomizationBackend {
    fn customize(&self, request: &CustomizeRequest) -> impl Future<Output = Result<CustomizationResult>> + Send;

    fn extract_pdf(&self, file: &UploadedFile) -> impl Future<Output = Result<PdfExtraction>> + Send;

    fn history(&self, session_id: &str) -> impl Future<Output = Result<ProcessingHistory>> + Send;
}

//! HTTP client for the customization backend

use crate::api::types::{BannerResponse, CustomizationResult, CustomizeRequest, PdfExtraction, ProcessingHistory};
use crate::api::CustomizationBackend;
use crate::config::Config;
use crate::error::{Result, ResumeTailorError};
use crate::input::{FileType, UploadedFile};
use log::{debug, error, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default request timeout; AI rewrites routinely take longer than a minute.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    ExtractPdf,
    Customize,
    History,
    Banner,
}

impl Operation {
    fn fallback_message(self) -> &'static str {
        match self {
            Operation::ExtractPdf => "Failed to extract PDF text",
            Operation::Customize => "Failed to customize resume",
            Operation::History => "Failed to get processing history",
            Operation::Banner => "Failed to reach backend",
        }
    }

    fn error(self, message: String) -> ResumeTailorError {
        match self {
            Operation::ExtractPdf => ResumeTailorError::FileExtraction(message),
            Operation::Customize => ResumeTailorError::CustomizationRequest(message),
            Operation::History => ResumeTailorError::HistoryLookup(message),
            Operation::Banner => ResumeTailorError::Network(message),
        }
    }
}

/// Single attempt per call, no retries.
#[derive(Clone)]
pub struct CustomizationClient {
    http: Client,
    api_base: Url,
    timeout: Duration,
}

impl CustomizationClient {
    pub fn new(backend_url: &str, timeout: Duration) -> Result<Self> {
        let backend_url = backend_url.trim().trim_end_matches('/');
        let api_base = Url::parse(&format!("{}/api", backend_url)).map_err(|e| {
            ResumeTailorError::Configuration(format!("Invalid backend URL '{}': {}", backend_url, e))
        })?;

        if api_base.cannot_be_a_base() {
            return Err(ResumeTailorError::Configuration(format!(
                "Backend URL cannot be used as a base: {}",
                backend_url
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ResumeTailorError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, api_base, timeout })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.backend_url(), config.timeout())
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_str()
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Banner message of the backend root, used as a reachability check.
    pub async fn health(&self) -> Result<String> {
        let url = self.endpoint(&[""]);
        let banner: BannerResponse = self.send(Operation::Banner, "GET", self.http.get(url)).await?;
        Ok(banner.message)
    }

    async fn send<T: DeserializeOwned>(&self, op: Operation, method: &str, request: RequestBuilder) -> Result<T> {
        let request = request
            .build()
            .map_err(|e| op.error(format!("{}: {}", op.fallback_message(), e)))?;
        let path = request.url().path().to_string();
        info!("API Request: {} {}", method, path);

        let response = self.http.execute(request).await.map_err(|e| {
            error!("API Request Error: {}", e);
            let reason = if e.is_timeout() {
                format!("no response within {}s", self.timeout.as_secs())
            } else {
                e.to_string()
            };
            op.error(format!("{}: {}", op.fallback_message(), reason))
        })?;

        let status = response.status();
        info!("API Response: {} {}", status.as_u16(), path);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("API Response Error: {} {}", status.as_u16(), body);
            let message = backend_detail(&body).unwrap_or_else(|| op.fallback_message().to_string());
            return Err(op.error(message));
        }

        response.json::<T>().await.map_err(|e| {
            debug!("Undecodable response body from {}: {}", path, e);
            op.error(format!("{}: unexpected response from backend", op.fallback_message()))
        })
    }
}

impl CustomizationBackend for CustomizationClient {
    async fn customize(&self, request: &CustomizeRequest) -> Result<CustomizationResult> {
        let url = self.endpoint(&["customize-resume"]);
        self.send(Operation::Customize, "POST", self.http.post(url).json(request))
            .await
    }

    async fn extract_pdf(&self, file: &UploadedFile) -> Result<PdfExtraction> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(upload_name(file))
            .mime_str(file.file_type.media_type())
            .map_err(|e| ResumeTailorError::FileExtraction(format!("Invalid upload: {}", e)))?;
        let form = Form::new().part("file", part);

        let url = self.endpoint(&["extract-pdf"]);
        self.send(Operation::ExtractPdf, "POST", self.http.post(url).multipart(form))
            .await
    }

    async fn history(&self, session_id: &str) -> Result<ProcessingHistory> {
        if session_id.trim().is_empty() {
            return Err(ResumeTailorError::InvalidInput(
                "A session id is required to look up history".to_string(),
            ));
        }

        let url = self.endpoint(&["history", session_id]);
        self.send(Operation::History, "GET", self.http.get(url)).await
    }
}

/// The backend only accepts PDF uploads named `*.pdf`, so files detected by
/// signature get the extension appended.
fn upload_name(file: &UploadedFile) -> String {
    if file.file_type == FileType::Pdf && !file.name.to_lowercase().ends_with(".pdf") {
        format!("{}.pdf", file.name)
    } else {
        file.name.clone()
    }
}

/// The backend reports failures as `{"detail": "..."}`.
fn backend_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .map(str::trim)
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_detail_extraction() {
        assert_eq!(
            backend_detail(r#"{"detail": "Resume text cannot be empty"}"#),
            Some("Resume text cannot be empty".to_string())
        );
        assert_eq!(backend_detail(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#), None);
        assert_eq!(backend_detail(r#"{"detail": "  "}"#), None);
        assert_eq!(backend_detail("<html>Bad Gateway</html>"), None);
    }

    #[test]
    fn test_endpoint_building() {
        let client = CustomizationClient::new("https://tailor.example.com/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(client.api_base(), "https://tailor.example.com/api");
        assert_eq!(
            client.endpoint(&["customize-resume"]).as_str(),
            "https://tailor.example.com/api/customize-resume"
        );
        assert_eq!(client.endpoint(&[""]).as_str(), "https://tailor.example.com/api/");
    }

    #[test]
    fn test_session_id_is_escaped() {
        let client = CustomizationClient::new("http://localhost:8001", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.endpoint(&["history", "a b/c"]).as_str(),
            "http://localhost:8001/api/history/a%20b%2Fc"
        );
    }

    #[test]
    fn test_upload_name_for_pdf_without_extension() {
        let sniffed = UploadedFile::new("RESUME", b"%PDF-1.7".to_vec());
        assert_eq!(upload_name(&sniffed), "RESUME.pdf");

        let named = UploadedFile::new("cv.PDF", b"%PDF-1.7".to_vec());
        assert_eq!(upload_name(&named), "cv.PDF");

        let text = UploadedFile::new("notes", b"plain".to_vec());
        assert_eq!(upload_name(&text), "notes");
    }

    #[test]
    fn test_invalid_backend_url() {
        assert!(matches!(
            CustomizationClient::new("not a url", DEFAULT_TIMEOUT),
            Err(ResumeTailorError::Configuration(_))
        ));
    }

    #[test]
    fn test_fallback_messages_map_to_taxonomy() {
        assert!(matches!(
            Operation::Customize.error("x".into()),
            ResumeTailorError::CustomizationRequest(_)
        ));
        assert!(matches!(
            Operation::ExtractPdf.error("x".into()),
            ResumeTailorError::FileExtraction(_)
        ));
        assert!(matches!(
            Operation::History.error("x".into()),
            ResumeTailorError::HistoryLookup(_)
        ));
    }
}

//! Text extraction from uploaded files

use crate::api::CustomizationBackend;
use crate::error::{Result, ResumeTailorError};
use crate::input::file_detector::FileType;
use std::path::Path;
use tokio::fs;

/// A file selected by the user, held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub file_type: FileType,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let file_type = FileType::detect(Path::new(&name), &bytes);
        Self { name, file_type, bytes }
    }

    pub async fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ResumeTailorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    /// Only known for PDFs.
    pub page_count: Option<u32>,
}

pub trait TextExtractor {
    fn extract(&self, file: &UploadedFile) -> impl std::future::Future<Output = Result<ExtractedText>> + Send;
}

/// Hands the document to the backend's extraction endpoint.
pub struct PdfExtractor<'a, B> {
    backend: &'a B,
}

impl<'a, B: CustomizationBackend + Sync> PdfExtractor<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }
}

impl<B: CustomizationBackend + Sync> TextExtractor for PdfExtractor<'_, B> {
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedText> {
        let extraction = self.backend.extract_pdf(file).await?;
        Ok(ExtractedText {
            text: extraction.extracted_text,
            page_count: Some(extraction.page_count),
        })
    }
}

/// Reads the bytes as text, untouched.
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, file: &UploadedFile) -> Result<ExtractedText> {
        let text = match std::str::from_utf8(&file.bytes) {
            Ok(text) => text.to_string(),
            Err(_) => {
                log::warn!("{} is not valid UTF-8, passing it through lossily", file.name);
                String::from_utf8_lossy(&file.bytes).into_owned()
            }
        };
        Ok(ExtractedText { text, page_count: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_plain_text_is_not_transformed() {
        let file = UploadedFile::new("resume.txt", b"  Hello world\n\n".to_vec());
        let extracted = PlainTextExtractor.extract(&file).await.unwrap();
        assert_eq!(extracted.text, "  Hello world\n\n");
        assert_eq!(extracted.page_count, None);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_passed_through() {
        let file = UploadedFile::new("resume.doc", vec![0x4a, 0x61, 0xff, 0x6e]);
        let extracted = PlainTextExtractor.extract(&file).await.unwrap();
        assert_eq!(extracted.text, "Ja\u{fffd}n");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let result = UploadedFile::read(Path::new("does/not/exist.txt")).await;
        assert!(matches!(result, Err(ResumeTailorError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_read_uses_file_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("resume.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let file = UploadedFile::read(&path).await.unwrap();
        assert_eq!(file.name, "resume.pdf");
        assert_eq!(file.file_type, FileType::Pdf);
        assert_eq!(file.size(), 8);
    }
}

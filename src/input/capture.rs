//! One input slot of the wizard: either an uploaded file or pasted text

use crate::api::CustomizationBackend;
use crate::error::Result;
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{ExtractedText, PdfExtractor, PlainTextExtractor, TextExtractor, UploadedFile};
use log::{info, warn};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Resume,
    JobDescription,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Resume => write!(f, "resume"),
            Slot::JobDescription => write!(f, "job description"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputSource {
    #[default]
    Empty,
    Upload {
        file: UploadedFile,
        extracted_text: String,
        page_count: Option<u32>,
    },
    Paste {
        text: String,
    },
}

#[derive(Debug, Clone)]
pub struct InputCapture {
    slot: Slot,
    source: InputSource,
}

impl InputCapture {
    pub fn new(slot: Slot) -> Self {
        Self {
            slot,
            source: InputSource::Empty,
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn source(&self) -> &InputSource {
        &self.source
    }

    /// Current text of the slot; empty when nothing was captured.
    pub fn text(&self) -> &str {
        match &self.source {
            InputSource::Empty => "",
            InputSource::Upload { extracted_text, .. } => extracted_text,
            InputSource::Paste { text } => text,
        }
    }

    pub fn file(&self) -> Option<&UploadedFile> {
        match &self.source {
            InputSource::Upload { file, .. } => Some(file),
            _ => None,
        }
    }

    pub fn page_count(&self) -> Option<u32> {
        match &self.source {
            InputSource::Upload { page_count, .. } => *page_count,
            _ => None,
        }
    }

    pub async fn upload_path<B>(&mut self, path: &Path, backend: &B) -> Result<&str>
    where
        B: CustomizationBackend + Sync,
    {
        let file = match UploadedFile::read(path).await {
            Ok(file) => file,
            Err(e) => {
                self.source = InputSource::Empty;
                return Err(e);
            }
        };
        self.upload(file, backend).await
    }

    /// PDFs go to the backend extractor, everything else is read verbatim.
    /// On failure the slot is left empty.
    pub async fn upload<B>(&mut self, file: UploadedFile, backend: &B) -> Result<&str>
    where
        B: CustomizationBackend + Sync,
    {
        let extracted = match file.file_type {
            FileType::Pdf => {
                info!("Extracting {} text from PDF: {}", self.slot, file.name);
                PdfExtractor::new(backend).extract(&file).await
            }
            FileType::Text => {
                info!("Reading {} text file: {}", self.slot, file.name);
                PlainTextExtractor.extract(&file).await
            }
        };

        match extracted {
            Ok(ExtractedText { text, page_count }) => {
                self.source = InputSource::Upload {
                    file,
                    extracted_text: text,
                    page_count,
                };
                Ok(self.text())
            }
            Err(e) => {
                warn!("Extraction of {} failed: {}", file.name, e);
                self.source = InputSource::Empty;
                Err(e)
            }
        }
    }

    /// Accepts the trimmed text, or returns `None` and leaves the slot alone when it is blank.
    pub fn paste(&mut self, text: &str) -> Option<&str> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.source = InputSource::Paste {
            text: trimmed.to_string(),
        };
        Some(self.text())
    }

    pub fn remove(&mut self) {
        self.source = InputSource::Empty;
    }
}

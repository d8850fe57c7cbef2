//! File type detection

use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extensions offered by the upload prompt.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "doc", "docx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    /// Anything that is not a PDF is read verbatim.
    Text,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            _ => FileType::Text,
        }
    }

    /// Extension first, then the `%PDF-` signature for misnamed files.
    pub fn detect(path: &Path, contents: &[u8]) -> Self {
        let by_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(FileType::from_extension);

        match by_extension {
            Some(FileType::Pdf) => FileType::Pdf,
            _ if contents.starts_with(PDF_MAGIC) => FileType::Pdf,
            _ => FileType::Text,
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            FileType::Pdf => "application/pdf",
            FileType::Text => "text/plain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(FileType::from_extension("PDF"), FileType::Pdf);
        assert_eq!(FileType::from_extension("txt"), FileType::Text);
        assert_eq!(FileType::from_extension("docx"), FileType::Text);
    }

    #[test]
    fn test_magic_bytes_override_extension() {
        let detected = FileType::detect(Path::new("resume.txt"), b"%PDF-1.7\n...");
        assert_eq!(detected, FileType::Pdf);
    }

    #[test]
    fn test_plain_file_without_extension() {
        let detected = FileType::detect(Path::new("RESUME"), b"Jane Doe");
        assert_eq!(detected, FileType::Text);
        assert_eq!(detected.media_type(), "text/plain");
    }
}

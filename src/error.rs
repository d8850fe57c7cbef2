//! Error handling for the resume tailor client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeTailorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File extraction error: {0}")]
    FileExtraction(String),

    #[error("Customization request failed: {0}")]
    CustomizationRequest(String),

    #[error("History lookup failed: {0}")]
    HistoryLookup(String),

    #[error("Clipboard write failed: {0}")]
    ClipboardWrite(String),

    #[error("Backend unreachable: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid wizard transition: {0}")]
    InvalidTransition(String),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeTailorError>;

impl ResumeTailorError {
    /// Message suitable for a one-line status notification.
    pub fn user_message(&self) -> String {
        match self {
            ResumeTailorError::FileExtraction(msg)
            | ResumeTailorError::CustomizationRequest(msg)
            | ResumeTailorError::HistoryLookup(msg)
            | ResumeTailorError::ClipboardWrite(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeTailorError {
    fn from(err: anyhow::Error) -> Self {
        ResumeTailorError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_strips_category_prefix() {
        let err = ResumeTailorError::CustomizationRequest("Resume text cannot be empty".to_string());
        assert_eq!(err.user_message(), "Resume text cannot be empty");
        assert_eq!(
            err.to_string(),
            "Customization request failed: Resume text cannot be empty"
        );
    }

    #[test]
    fn test_prompt_failures_convert_with_question_mark() {
        fn interact() -> std::result::Result<(), dialoguer::Error> {
            Err(dialoguer::Error::IO(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "not a terminal",
            )))
        }
        fn run() -> Result<()> {
            interact()?;
            Ok(())
        }

        let err = run().unwrap_err();
        assert!(matches!(err, ResumeTailorError::Prompt(_)));
        assert!(err.user_message().starts_with("Prompt error:"));
        assert!(err.user_message().contains("not a terminal"));
    }

    #[test]
    fn test_user_message_for_other_errors() {
        let err = ResumeTailorError::InvalidTransition("not ready".to_string());
        assert_eq!(err.user_message(), "Invalid wizard transition: not ready");
    }
}

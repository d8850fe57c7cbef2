//! Result presenter: view state, local editing, copy and download

use crate::api::CustomizationResult;
use crate::error::{Result, ResumeTailorError};
use crate::output::clipboard::ClipboardSink;
use crate::output::formatter::save_report_to_file;
use crate::output::report::ResultReport;
use crate::wizard::{CustomizationState, Session};
use log::info;
use std::path::{Path, PathBuf};

pub const DOWNLOAD_FILE_NAME: &str = "customized-resume.txt";

/// What the result area should show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView<'a> {
    Busy,
    Empty,
    Failed(&'a str),
    Ready {
        improvements: &'a [String],
        keywords_added: &'a [String],
        text: &'a str,
        editing: bool,
        processing_time_seconds: Option<f64>,
    },
}

/// Holds a copy of the result plus a locally editable text. Edits never
/// reach the result or the session.
#[derive(Debug, Clone, Default)]
pub struct ResultPresenter {
    result: Option<CustomizationResult>,
    failure: Option<String>,
    edited_text: String,
    editing: bool,
}

impl ResultPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_session(session: &Session) -> Self {
        let mut presenter = Self::new();
        presenter.sync(session);
        presenter
    }

    /// Picks up a new result from the session. Local edits are kept as long
    /// as the session still carries the same result.
    pub fn sync(&mut self, session: &Session) {
        match &session.customization {
            CustomizationState::Completed(result) => {
                if self.result.as_ref() != Some(result) {
                    self.edited_text = result.customized_resume.clone();
                    self.result = Some(result.clone());
                    self.editing = false;
                }
                self.failure = None;
            }
            CustomizationState::Failed { message } => {
                *self = Self {
                    failure: Some(message.clone()),
                    ..Self::default()
                };
            }
            CustomizationState::NotRequested | CustomizationState::InFlight { .. } => {
                *self = Self::default();
            }
        }
    }

    pub fn result(&self) -> Option<&CustomizationResult> {
        self.result.as_ref()
    }

    pub fn view(&self, is_processing: bool) -> ResultView<'_> {
        if is_processing {
            return ResultView::Busy;
        }
        if let Some(message) = &self.failure {
            return ResultView::Failed(message);
        }
        match &self.result {
            Some(result) => ResultView::Ready {
                improvements: &result.improvements,
                keywords_added: &result.keywords_added,
                text: &self.edited_text,
                editing: self.editing,
                processing_time_seconds: result.processing_time_seconds,
            },
            None => ResultView::Empty,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Flips between viewing and editing; returns the new mode.
    pub fn toggle_edit(&mut self) -> bool {
        if self.result.is_some() {
            self.editing = !self.editing;
        }
        self.editing
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> Result<()> {
        if self.result.is_none() {
            return Err(ResumeTailorError::InvalidInput("There is no result to edit".to_string()));
        }
        self.edited_text = text.into();
        Ok(())
    }

    /// The text as currently edited; empty when there is no result.
    pub fn current_text(&self) -> &str {
        &self.edited_text
    }

    pub fn is_edited(&self) -> bool {
        self.result
            .as_ref()
            .is_some_and(|result| result.customized_resume != self.edited_text)
    }

    pub fn report(&self) -> Option<ResultReport> {
        self.result
            .as_ref()
            .map(|result| ResultReport::new(result, &self.edited_text))
    }

    pub fn copy_to_clipboard<C: ClipboardSink>(&self, clipboard: &mut C) -> Result<()> {
        self.require_result()?;
        clipboard.write_text(&self.edited_text)?;
        info!("Copied {} characters to clipboard", self.edited_text.len());
        Ok(())
    }

    /// Writes the current text verbatim to `customized-resume.txt` in `dir`.
    pub fn download(&self, dir: &Path) -> Result<PathBuf> {
        self.require_result()?;
        let path = dir.join(DOWNLOAD_FILE_NAME);
        save_report_to_file(&self.edited_text, &path)?;
        info!("Saved customized resume to {}", path.display());
        Ok(path)
    }

    fn require_result(&self) -> Result<&CustomizationResult> {
        self.result
            .as_ref()
            .ok_or_else(|| ResumeTailorError::InvalidInput("No customized resume available yet".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::clipboard::MemoryClipboard;
    use crate::testing::sample_result;
    use tempfile::TempDir;

    fn completed_session() -> Session {
        Session {
            resume_text: "resume".into(),
            job_description_text: "job".into(),
            customization: CustomizationState::Completed(sample_result()),
            session_id: None,
        }
    }

    #[test]
    fn test_busy_while_processing() {
        let presenter = ResultPresenter::from_session(&completed_session());
        assert_eq!(presenter.view(true), ResultView::Busy);
    }

    #[test]
    fn test_absent_result_renders_empty() {
        let presenter = ResultPresenter::from_session(&Session::default());
        assert_eq!(presenter.view(false), ResultView::Empty);
        assert_eq!(presenter.current_text(), "");
        assert!(presenter.report().is_none());
    }

    #[test]
    fn test_failure_renders_failed_view() {
        let session = Session {
            customization: CustomizationState::Failed {
                message: "Failed to customize resume".into(),
            },
            ..completed_session()
        };
        let presenter = ResultPresenter::from_session(&session);
        assert_eq!(presenter.view(false), ResultView::Failed("Failed to customize resume"));
    }

    #[test]
    fn test_ready_view_shows_exact_arrays() {
        let presenter = ResultPresenter::from_session(&completed_session());
        let expected = sample_result();

        match presenter.view(false) {
            ResultView::Ready {
                improvements,
                keywords_added,
                text,
                editing,
                processing_time_seconds,
            } => {
                assert_eq!(improvements, expected.improvements.as_slice());
                assert_eq!(keywords_added, expected.keywords_added.as_slice());
                assert_eq!(text, expected.customized_resume);
                assert!(!editing);
                assert_eq!(processing_time_seconds, Some(3.42));
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_edits_stay_local() {
        let session = completed_session();
        let mut presenter = ResultPresenter::from_session(&session);

        assert!(presenter.toggle_edit());
        assert!(presenter.is_editing());
        presenter.set_text("JANE DOE (edited)").unwrap();
        assert!(!presenter.toggle_edit());

        assert!(presenter.is_edited());
        assert_eq!(presenter.current_text(), "JANE DOE (edited)");
        assert_eq!(
            presenter.result().map(|r| r.customized_resume.as_str()),
            Some(sample_result().customized_resume.as_str())
        );
        assert_eq!(session.customization_result(), Some(&sample_result()));

        presenter.sync(&session);
        assert_eq!(presenter.current_text(), "JANE DOE (edited)");
    }

    #[test]
    fn test_edit_without_result_is_rejected() {
        let mut presenter = ResultPresenter::new();
        assert!(!presenter.toggle_edit());
        assert!(presenter.set_text("text").is_err());
    }

    #[test]
    fn test_download_writes_edited_text_verbatim() {
        let dir = TempDir::new().unwrap();
        let mut presenter = ResultPresenter::from_session(&completed_session());
        presenter.set_text("Edited line one\n  indented line two\n").unwrap();

        let path = presenter.download(dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), DOWNLOAD_FILE_NAME);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Edited line one\n  indented line two\n");
    }

    #[test]
    fn test_download_without_result_fails() {
        let dir = TempDir::new().unwrap();
        let presenter = ResultPresenter::new();
        assert!(presenter.download(dir.path()).is_err());
        assert!(!dir.path().join(DOWNLOAD_FILE_NAME).exists());
    }

    #[test]
    fn test_copy_uses_current_text() {
        let mut presenter = ResultPresenter::from_session(&completed_session());
        presenter.set_text("copied text").unwrap();

        let mut clipboard = MemoryClipboard::default();
        presenter.copy_to_clipboard(&mut clipboard).unwrap();
        assert_eq!(clipboard.contents(), Some("copied text"));
    }

    #[test]
    fn test_copy_failure_is_reported() {
        let presenter = ResultPresenter::from_session(&completed_session());
        let mut clipboard = MemoryClipboard::unavailable();
        let err = presenter.copy_to_clipboard(&mut clipboard).unwrap_err();
        assert!(matches!(err, ResumeTailorError::ClipboardWrite(_)));
    }

    #[test]
    fn test_new_result_replaces_edits() {
        let mut presenter = ResultPresenter::from_session(&completed_session());
        presenter.set_text("local edit").unwrap();

        let mut next = sample_result();
        next.customized_resume = "SECOND RUN".to_string();
        let session = Session {
            customization: CustomizationState::Completed(next),
            ..completed_session()
        };
        presenter.sync(&session);

        assert_eq!(presenter.current_text(), "SECOND RUN");
        assert!(!presenter.is_edited());
    }
}

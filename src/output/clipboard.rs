//! Clipboard access

use crate::error::{Result, ResumeTailorError};

pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().map_err(|e| {
            ResumeTailorError::ClipboardWrite(format!(
                "Clipboard unavailable ({}). Please select and copy the text manually.",
                e
            ))
        })?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text.to_string()).map_err(|e| {
            ResumeTailorError::ClipboardWrite(format!(
                "Copy failed ({}). Please select and copy the text manually.",
                e
            ))
        })
    }
}

/// In-process clipboard for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    unavailable: bool,
}

#[cfg(test)]
impl MemoryClipboard {
    pub fn unavailable() -> Self {
        Self {
            contents: None,
            unavailable: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

#[cfg(test)]
impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.unavailable {
            return Err(ResumeTailorError::ClipboardWrite(
                "Copy failed. Please select and copy the text manually.".to_string(),
            ));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

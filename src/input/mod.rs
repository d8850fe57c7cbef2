//! Input capture module
//! Turns uploaded files or pasted text into the text payloads the wizard needs

pub mod capture;
pub mod file_detector;
pub mod text_extractor;

pub use capture::{InputCapture, InputSource, Slot};
pub use file_detector::FileType;
pub use text_extractor::{ExtractedText, UploadedFile};

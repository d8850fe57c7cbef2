//! Result presentation: view state, formatting, clipboard and download

pub mod clipboard;
pub mod formatter;
pub mod presenter;
pub mod report;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use formatter::{OutputFormatter, ReportGenerator};
pub use presenter::{ResultPresenter, ResultView, DOWNLOAD_FILE_NAME};
pub use report::ResultReport;

//! CLI interface for the resume tailor

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-tailor")]
#[command(about = "AI-powered resume customization for a specific job description")]
#[command(long_about = "Upload a resume and a job description, let the customization backend rewrite the resume for ATS systems, then review, edit, copy or download the result")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides config and environment)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk through the four-step wizard interactively (default)
    Wizard,

    /// Customize a resume in one shot
    Customize {
        /// Path to resume file (PDF, TXT, MD, DOC, DOCX)
        #[arg(short, long, conflicts_with = "resume_text", required_unless_present = "resume_text")]
        resume: Option<PathBuf>,

        /// Resume text, instead of a file
        #[arg(long)]
        resume_text: Option<String>,

        /// Path to job description file
        #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
        job: Option<PathBuf>,

        /// Job description text, instead of a file
        #[arg(long)]
        job_text: Option<String>,

        /// Session id to file this run under
        #[arg(short, long)]
        session: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Open the customized resume in $EDITOR before saving
        #[arg(short, long)]
        edit: bool,

        /// Directory to download customized-resume.txt into
        #[arg(short, long)]
        download: Option<PathBuf>,

        /// Save the formatted report into this directory
        #[arg(long)]
        report: Option<PathBuf>,

        /// Copy the customized resume to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Extract text from a PDF through the backend
    ExtractPdf {
        /// PDF file to extract
        file: PathBuf,

        /// Write the extracted text to this file instead of stdout
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show past customizations for a session
    History {
        /// Session id (defaults to the configured one)
        session: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check that the backend is reachable
    Ping,

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "api.backend_url")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

/// Like `validate_file_extension`, but a file without an extension is let
/// through so its contents can decide the type.
pub fn validate_upload_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    if path.extension().is_none() {
        return Ok(());
    }
    validate_file_extension(path, allowed_extensions)
}

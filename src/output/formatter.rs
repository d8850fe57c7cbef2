//! Output formatters for customization results and history

use crate::api::ProcessingHistory;
use crate::config::OutputFormat;
use crate::error::{Result, ResumeTailorError};
use crate::output::presenter::ResultView;
use crate::output::report::ResultReport;
use crate::wizard::WizardStep;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting results and history records
pub trait OutputFormatter {
    fn format_result(&self, report: &ResultReport) -> Result<String>;
    fn format_history(&self, history: &ProcessingHistory) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for notes and documentation
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// HTML formatter with embedded styling
pub struct HtmlFormatter {
    include_styles: bool,
}

/// Coordinates the different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Customized Resume</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; color: #333; }
        h2 { color: #2563eb; border-bottom: 2px solid #e9ecef; padding-bottom: 8px; }
        .keyword { display: inline-block; background: #dbeafe; color: #1e40af; padding: 2px 10px; margin: 2px; border-radius: 12px; font-size: 0.85em; }
        pre { background: #f8f9fa; padding: 20px; border-radius: 6px; white-space: pre-wrap; font-size: 0.9em; }
        .metadata { color: #6c757d; font-size: 0.85em; }
    </style>
    {% endif %}
</head>
<body>
    <h1>Your Customized Resume</h1>
    <p class="metadata">Generated: {{ generated_at }}{% if has_processing_time %} | Processing time: {{ processing_time }}s{% endif %}{% if edited %} | Edited locally{% endif %}</p>
    <h2>Key Improvements</h2>
    <ul>
    {% for improvement in improvements %}
        <li>{{ improvement }}</li>
    {% endfor %}
    </ul>
    <h2>Added Keywords</h2>
    <p>
    {% for keyword in keywords_added %}
        <span class="keyword">{{ keyword }}</span>
    {% endfor %}
    </p>
    <h2>Resume</h2>
    <pre>{{ customized_resume }}</pre>
</body>
</html>"#, ext = "html")]
struct HtmlResultTemplate<'a> {
    include_styles: bool,
    generated_at: String,
    has_processing_time: bool,
    processing_time: String,
    edited: bool,
    improvements: &'a [String],
    keywords_added: &'a [String],
    customized_resume: &'a str,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Processing History</title>
</head>
<body>
    <h1>Processing History for {{ session_id }}</h1>
    <p>{{ processing_count }} customization(s){% if has_last_processed %}, last on {{ last_processed }}{% endif %}</p>
    <table>
        <tr><th>Job title</th><th>Processing time</th><th>Keywords added</th><th>Created</th></tr>
        {% for row in rows %}
        <tr><td>{{ row.job_title }}</td><td>{{ row.processing_time }}</td><td>{{ row.keywords }}</td><td>{{ row.created_at }}</td></tr>
        {% endfor %}
    </table>
</body>
</html>"#, ext = "html")]
struct HtmlHistoryTemplate {
    session_id: String,
    processing_count: usize,
    has_last_processed: bool,
    last_processed: String,
    rows: Vec<HistoryRow>,
}

struct HistoryRow {
    job_title: String,
    processing_time: String,
    keywords: String,
    created_at: String,
}

fn format_seconds(seconds: Option<f64>) -> String {
    seconds
        .map(|s| format!("{:.2}s", s))
        .unwrap_or_else(|| "-".to_string())
}

fn format_timestamp(timestamp: Option<chrono::NaiveDateTime>) -> String {
    timestamp
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    /// Progress line of the wizard, e.g. `✔ Upload Resume → ● Add Job Description → ...`
    pub fn format_progress(&self, current: WizardStep) -> String {
        WizardStep::ALL
            .iter()
            .map(|step| {
                let (marker, color) = if *step < current {
                    ("✔", Color::Green)
                } else if *step == current {
                    ("●", Color::Blue)
                } else {
                    ("○", Color::BrightBlack)
                };
                self.colorize(&format!("{} {}", marker, step.label()), color)
            })
            .collect::<Vec<_>>()
            .join(" → ")
    }

    /// Renders whatever the presenter says should be on screen.
    pub fn format_view(&self, view: &ResultView<'_>) -> String {
        match view {
            ResultView::Busy => format!(
                "{}\n{}\n",
                self.colorize("Customizing your resume...", Color::Blue),
                self.colorize("Analyzing job requirements and optimizing content", Color::BrightBlack)
            ),
            ResultView::Empty => String::new(),
            ResultView::Failed(message) => format!(
                "{} {}\n{}\n",
                self.colorize("✗ Customization failed:", Color::Red),
                message,
                self.colorize("Start over to try again.", Color::BrightBlack)
            ),
            ResultView::Ready {
                improvements,
                keywords_added,
                text,
                editing,
                processing_time_seconds,
            } => {
                let mut output = self.format_summary(improvements, keywords_added, *processing_time_seconds);
                let title = if *editing {
                    "Your Customized Resume (editing)"
                } else {
                    "Your Customized Resume"
                };
                output.push_str(&self.format_header(title, 2));
                output.push_str(text);
                output.push('\n');
                output
            }
        }
    }

    fn format_summary(&self, improvements: &[String], keywords_added: &[String], processing_time: Option<f64>) -> String {
        let mut output = String::new();
        output.push_str(&self.format_header("✅ Optimization Summary", 1));

        if let Some(seconds) = processing_time {
            output.push_str(&format!("Processing time: {:.2}s\n", seconds));
        }

        output.push_str(&format!("\n{}\n", self.colorize("Key Improvements:", Color::Green)));
        if improvements.is_empty() {
            output.push_str("  (none reported)\n");
        }
        for improvement in improvements {
            output.push_str(&format!("  • {}\n", improvement));
        }

        output.push_str(&format!("\n{}\n", self.colorize("Added Keywords:", Color::Green)));
        if keywords_added.is_empty() {
            output.push_str("  (none reported)\n");
        } else {
            let badges: Vec<String> = keywords_added
                .iter()
                .map(|k| self.colorize(&format!("[{}]", k), Color::Cyan))
                .collect();
            output.push_str(&format!("  {}\n", badges.join(" ")));
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_result(&self, report: &ResultReport) -> Result<String> {
        let mut output = self.format_summary(
            &report.improvements,
            &report.keywords_added,
            report.processing_time_seconds,
        );

        if self.detailed {
            output.push_str(&format!(
                "\nGenerated: {} | Words: {}{}\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.word_count(),
                if report.edited { " | Edited locally" } else { "" }
            ));
            if let Some(session_id) = &report.session_id {
                output.push_str(&format!("Session: {}\n", session_id));
            }
        }

        output.push_str(&self.format_header("Your Customized Resume", 2));
        output.push_str(&report.customized_resume);
        output.push('\n');
        Ok(output)
    }

    fn format_history(&self, history: &ProcessingHistory) -> Result<String> {
        let mut output = String::new();
        output.push_str(&self.format_header(&format!("📜 Processing History: {}", history.session_id), 1));
        output.push_str(&format!(
            "Customizations: {} | Last processed: {}\n",
            history.processing_count,
            format_timestamp(history.last_processed)
        ));

        if history.recent_customizations.is_empty() {
            output.push_str(&format!("\n{}\n", self.colorize("No customizations yet.", Color::BrightBlack)));
        }

        for (index, entry) in history.recent_customizations.iter().enumerate() {
            output.push_str(&format!(
                "\n{}. {} ({})\n   Processing time: {}\n",
                index + 1,
                self.colorize(&entry.job_title, Color::Yellow),
                format_timestamp(entry.created_at),
                format_seconds(entry.processing_time)
            ));
            if !entry.keywords_added.is_empty() {
                output.push_str(&format!("   Keywords: {}\n", entry.keywords_added.join(", ")));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, report: &ResultReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_history(&self, history: &ProcessingHistory) -> Result<String> {
        self.to_json(history)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_result(&self, report: &ResultReport) -> Result<String> {
        let mut output = String::from("# Your Customized Resume\n\n");

        if self.include_metadata {
            output.push_str(&format!("*Generated: {}*", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")));
            if let Some(seconds) = report.processing_time_seconds {
                output.push_str(&format!(" | *Processing time: {:.2}s*", seconds));
            }
            if report.edited {
                output.push_str(" | *Edited locally*");
            }
            output.push_str("\n\n");
        }

        output.push_str("## Key Improvements\n\n");
        for improvement in &report.improvements {
            output.push_str(&format!("- {}\n", improvement));
        }

        output.push_str("\n## Added Keywords\n\n");
        let keywords: Vec<String> = report.keywords_added.iter().map(|k| format!("`{}`", k)).collect();
        output.push_str(&keywords.join(" "));
        output.push_str("\n\n## Resume\n\n```text\n");
        output.push_str(&report.customized_resume);
        if !report.customized_resume.ends_with('\n') {
            output.push('\n');
        }
        output.push_str("```\n");
        Ok(output)
    }

    fn format_history(&self, history: &ProcessingHistory) -> Result<String> {
        let mut output = format!("# Processing History: {}\n\n", history.session_id);
        output.push_str(&format!(
            "{} customization(s), last processed {}\n\n",
            history.processing_count,
            format_timestamp(history.last_processed)
        ));

        if !history.recent_customizations.is_empty() {
            output.push_str("| Job title | Processing time | Keywords added | Created |\n");
            output.push_str("|---|---|---|---|\n");
            for entry in &history.recent_customizations {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    entry.job_title.replace('|', "\\|"),
                    format_seconds(entry.processing_time),
                    entry.keywords_added.join(", "),
                    format_timestamp(entry.created_at)
                ));
            }
        }
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_result(&self, report: &ResultReport) -> Result<String> {
        let template = HtmlResultTemplate {
            include_styles: self.include_styles,
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            has_processing_time: report.processing_time_seconds.is_some(),
            processing_time: report
                .processing_time_seconds
                .map(|s| format!("{:.2}", s))
                .unwrap_or_default(),
            edited: report.edited,
            improvements: &report.improvements,
            keywords_added: &report.keywords_added,
            customized_resume: &report.customized_resume,
        };
        template
            .render()
            .map_err(|e| ResumeTailorError::OutputFormatting(e.to_string()))
    }

    fn format_history(&self, history: &ProcessingHistory) -> Result<String> {
        let template = HtmlHistoryTemplate {
            session_id: history.session_id.clone(),
            processing_count: history.processing_count,
            has_last_processed: history.last_processed.is_some(),
            last_processed: format_timestamp(history.last_processed),
            rows: history
                .recent_customizations
                .iter()
                .map(|entry| HistoryRow {
                    job_title: entry.job_title.clone(),
                    processing_time: format_seconds(entry.processing_time),
                    keywords: entry.keywords_added.join(", "),
                    created_at: format_timestamp(entry.created_at),
                })
                .collect(),
        };
        template
            .render()
            .map_err(|e| ResumeTailorError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn console(&self) -> &ConsoleFormatter {
        &self.console_formatter
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        }
    }

    pub fn generate_result(&self, report: &ResultReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_result(report)
    }

    pub fn generate_history(&self, history: &ProcessingHistory, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_history(history)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("customization_report{}.txt", timestamp_suffix),
        OutputFormat::Json => format!("customization_report{}.json", timestamp_suffix),
        OutputFormat::Markdown => format!("customization_report{}.md", timestamp_suffix),
        OutputFormat::Html => format!("customization_report{}.html", timestamp_suffix),
    }
}

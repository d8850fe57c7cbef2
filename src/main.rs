//! Resume tailor: AI-powered resume customization from the terminal

use clap::Parser;
use colored::Colorize;
use dialoguer::Editor;
use log::{error, info};
use resume_tailor::api::{CustomizationBackend, CustomizationClient};
use resume_tailor::cli::{self, Cli, Commands, ConfigAction};
use resume_tailor::config::Config;
use resume_tailor::error::{Result, ResumeTailorError};
use resume_tailor::input::{FileType, InputCapture, Slot, UploadedFile};
use resume_tailor::input::file_detector::ACCEPTED_EXTENSIONS;
use resume_tailor::interactive::{busy_indicator, InteractiveWizard};
use resume_tailor::output::formatter::{save_report_to_file, suggest_filename};
use resume_tailor::output::{ReportGenerator, ResultPresenter, SystemClipboard};
use resume_tailor::wizard::WizardController;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Some(url) = &cli.backend_url {
        if let Err(e) = config.override_backend_url(url) {
            error!("{}", e);
            process::exit(1);
        }
    }

    // Execute command
    let command = cli.command.unwrap_or(Commands::Wizard);
    if let Err(e) = run_command(command, config, &config_path).await {
        error!("Command failed: {}", e);
        eprintln!("{} {}", "✗".red(), e.user_message());
        process::exit(1);
    }
}

async fn run_command(command: Commands, mut config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Wizard => {
            let client = CustomizationClient::from_config(&config)?;
            InteractiveWizard::new(client, &config).run().await
        }

        Commands::Customize {
            resume,
            resume_text,
            job,
            job_text,
            session,
            output,
            edit,
            download,
            report,
            copy,
        } => {
            let format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeTailorError::InvalidInput)?,
                None => config.output.format,
            };
            let client = CustomizationClient::from_config(&config)?;
            info!("Using backend at {}", client.api_base());

            let session_id = session.or_else(|| config.session.session_id.clone());
            let mut wizard = WizardController::new(session_id);

            let text = capture_slot(Slot::Resume, resume.as_deref(), resume_text.as_deref(), &client).await?;
            wizard.set_text(Slot::Resume, text);
            let text = capture_slot(Slot::JobDescription, job.as_deref(), job_text.as_deref(), &client).await?;
            wizard.set_text(Slot::JobDescription, text);

            let spinner = busy_indicator("Customizing your resume...");
            let resolution = wizard.customize(&client).await;
            spinner.finish_and_clear();
            resolution?;

            let session = wizard.session();
            if let Some(message) = session.failure() {
                return Err(ResumeTailorError::CustomizationRequest(message.to_string()));
            }

            if config.session.session_id.is_none() {
                if let Some(id) = &session.session_id {
                    config.session.session_id = Some(id.clone());
                    config.save_to(config_path)?;
                    info!("Remembering session id {} for history lookups", id);
                }
            }

            let mut presenter = ResultPresenter::from_session(session);
            if edit {
                presenter.toggle_edit();
                let edited = Editor::new()
                    .extension(".txt")
                    .edit(presenter.current_text())
                    .map_err(ResumeTailorError::from)?;
                if let Some(text) = edited {
                    presenter.set_text(text)?;
                }
                presenter.toggle_edit();
            }

            let result_report = presenter
                .report()
                .ok_or_else(|| ResumeTailorError::CustomizationRequest("No result received".to_string()))?;
            let generator = ReportGenerator::with_options(config.output.color_output, true);
            println!("{}", generator.generate_result(&result_report, format)?);

            if let Some(dir) = report {
                let path = dir.join(suggest_filename(format, true));
                let plain = ReportGenerator::with_options(false, true).generate_result(&result_report, format)?;
                save_report_to_file(&plain, &path)?;
                eprintln!("{} Report saved to {}", "✔".green(), path.display());
            }

            if let Some(dir) = download {
                let path = presenter.download(&dir)?;
                eprintln!("{} Downloaded {}", "✔".green(), path.display());
            }

            if copy {
                match SystemClipboard::new().and_then(|mut clipboard| presenter.copy_to_clipboard(&mut clipboard)) {
                    Ok(()) => eprintln!("{} Copied to clipboard!", "✔".green()),
                    Err(e) => {
                        error!("{}", e);
                        eprintln!("{} {}", "✗".red(), e.user_message());
                    }
                }
            }

            Ok(())
        }

        Commands::ExtractPdf { file, save } => {
            let uploaded = UploadedFile::read(&file).await?;
            if uploaded.file_type != FileType::Pdf {
                return Err(ResumeTailorError::UnsupportedFormat(format!(
                    "{} is not a PDF",
                    file.display()
                )));
            }

            let client = CustomizationClient::from_config(&config)?;
            let spinner = busy_indicator("Extracting text...");
            let extraction = client.extract_pdf(&uploaded).await;
            spinner.finish_and_clear();
            let extraction = extraction?;

            match save {
                Some(path) => {
                    save_report_to_file(&extraction.extracted_text, &path)?;
                    eprintln!(
                        "{} Extracted {} page(s) to {}",
                        "✔".green(),
                        extraction.page_count,
                        path.display()
                    );
                }
                None => {
                    eprintln!("Extracted {} page(s)", extraction.page_count);
                    println!("{}", extraction.extracted_text);
                }
            }
            Ok(())
        }

        Commands::History { session, output } => {
            let format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeTailorError::InvalidInput)?,
                None => config.output.format,
            };
            let session_id = session
                .or_else(|| config.session.session_id.clone())
                .ok_or_else(|| {
                    ResumeTailorError::InvalidInput(
                        "No session id given and none configured (see `config set session.session_id`)".to_string(),
                    )
                })?;

            let client = CustomizationClient::from_config(&config)?;
            let history = client.history(&session_id).await?;
            let generator = ReportGenerator::with_options(config.output.color_output, false);
            println!("{}", generator.generate_history(&history, format)?);
            Ok(())
        }

        Commands::Ping => {
            let client = CustomizationClient::from_config(&config)?;
            let banner = client.health().await?;
            println!("{} {} ({})", "✔".green(), banner, client.api_base());
            Ok(())
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| ResumeTailorError::Configuration(e.to_string()))?;
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default().save_to(config_path)?;
                println!("{} Configuration reset to defaults", "✔".green());
                Ok(())
            }
            ConfigAction::Set { key, value } => {
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("{} {} = {}", "✔".green(), key, value);
                Ok(())
            }
        },
    }
}

/// Text for one slot from either a file or an inline argument.
async fn capture_slot<B>(slot: Slot, path: Option<&Path>, text: Option<&str>, backend: &B) -> Result<String>
where
    B: CustomizationBackend + Sync,
{
    let mut capture = InputCapture::new(slot);
    match (path, text) {
        (Some(path), _) => {
            cli::validate_upload_extension(path, ACCEPTED_EXTENSIONS)
                .map_err(|e| ResumeTailorError::InvalidInput(format!("{} file: {}", slot, e)))?;
            let text = capture.upload_path(path, backend).await?;
            if text.trim().is_empty() {
                return Err(ResumeTailorError::InvalidInput(format!(
                    "No text found in {} file {}",
                    slot,
                    path.display()
                )));
            }
            Ok(text.to_string())
        }
        (None, Some(text)) => capture
            .paste(text)
            .map(str::to_string)
            .ok_or_else(|| ResumeTailorError::InvalidInput(format!("The {} text is empty", slot))),
        (None, None) => Err(ResumeTailorError::InvalidInput(format!("No {} given", slot))),
    }
}

//! Interactive terminal front-end for the wizard

use crate::api::CustomizationBackend;
use crate::config::Config;
use crate::error::{Result, ResumeTailorError};
use crate::input::file_detector::ACCEPTED_EXTENSIONS;
use crate::input::{InputCapture, InputSource, Slot};
use crate::output::{ReportGenerator, ResultPresenter, SystemClipboard};
use crate::wizard::{WizardController, WizardStep};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Editor, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
enum Action {
    Upload(Slot),
    Paste(Slot),
    Remove(Slot),
    Customize,
    ToggleEdit,
    Copy,
    Download,
    StartOver,
    Quit,
}

impl Action {
    fn label(self) -> String {
        match self {
            Action::Upload(slot) => format!("Upload {} file", slot),
            Action::Paste(slot) => format!("Paste {} text", slot),
            Action::Remove(slot) => format!("Remove {}", slot),
            Action::Customize => "Customize my resume".to_string(),
            Action::ToggleEdit => "Edit resume text".to_string(),
            Action::Copy => "Copy to clipboard".to_string(),
            Action::Download => "Download as customized-resume.txt".to_string(),
            Action::StartOver => "Start over".to_string(),
            Action::Quit => "Quit".to_string(),
        }
    }
}

/// Spinner shown while a backend call is outstanding.
pub fn busy_indicator(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.blue} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub struct InteractiveWizard<B> {
    backend: B,
    download_dir: PathBuf,
    controller: WizardController,
    resume: InputCapture,
    job: InputCapture,
    presenter: ResultPresenter,
    reports: ReportGenerator,
    theme: ColorfulTheme,
}

impl<B: CustomizationBackend + Sync> InteractiveWizard<B> {
    pub fn new(backend: B, config: &Config) -> Self {
        Self {
            backend,
            download_dir: config.output.download_dir.clone(),
            controller: WizardController::new(config.session.session_id.clone()),
            resume: InputCapture::new(Slot::Resume),
            job: InputCapture::new(Slot::JobDescription),
            presenter: ResultPresenter::new(),
            reports: ReportGenerator::with_options(config.output.color_output, false),
            theme: ColorfulTheme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "ATS Resume Customization Agent".bold());
        println!("Upload your resume and a job description to get a tailored, ATS-friendly resume.");

        loop {
            let step = self.controller.step();
            println!("\n{}", self.reports.console().format_progress(step));

            if step == WizardStep::ResultShown {
                print!("{}", self.reports.console().format_view(&self.presenter.view(self.controller.is_processing())));
            } else {
                self.print_slot_status(Slot::Resume);
                self.print_slot_status(Slot::JobDescription);
            }

            let actions = self.available_actions(step);
            let labels: Vec<String> = actions.iter().map(|a| a.label()).collect();
            let choice = Select::with_theme(&self.theme)
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()
                .map_err(ResumeTailorError::from)?;

            let outcome = match actions[choice] {
                Action::Quit => return Ok(()),
                Action::Upload(slot) => self.upload(slot).await,
                Action::Paste(slot) => self.paste(slot),
                Action::Remove(slot) => {
                    self.capture_mut(slot).remove();
                    self.controller.set_text(slot, "");
                    self.presenter.sync(self.controller.session());
                    Ok(())
                }
                Action::Customize => self.customize().await,
                Action::ToggleEdit => self.edit(),
                Action::Copy => self.copy(),
                Action::Download => self.download(),
                Action::StartOver => {
                    self.controller.reset();
                    self.resume.remove();
                    self.job.remove();
                    self.presenter.sync(self.controller.session());
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                error!("{}", e);
                eprintln!("{} {}", "✗".red(), e.user_message().red());
            }
        }
    }

    fn available_actions(&self, step: WizardStep) -> Vec<Action> {
        if step == WizardStep::ResultShown {
            let mut actions = Vec::new();
            if self.presenter.result().is_some() {
                actions.extend([Action::ToggleEdit, Action::Copy, Action::Download]);
            }
            actions.extend([Action::StartOver, Action::Quit]);
            return actions;
        }

        let mut actions = Vec::new();
        if step == WizardStep::ReadyToCustomize {
            actions.push(Action::Customize);
        }
        for slot in [Slot::Resume, Slot::JobDescription] {
            actions.push(Action::Upload(slot));
            actions.push(Action::Paste(slot));
            if !self.capture(slot).text().is_empty() {
                actions.push(Action::Remove(slot));
            }
        }
        actions.push(Action::Quit);
        actions
    }

    fn capture(&self, slot: Slot) -> &InputCapture {
        match slot {
            Slot::Resume => &self.resume,
            Slot::JobDescription => &self.job,
        }
    }

    fn capture_mut(&mut self, slot: Slot) -> &mut InputCapture {
        match slot {
            Slot::Resume => &mut self.resume,
            Slot::JobDescription => &mut self.job,
        }
    }

    fn print_slot_status(&self, slot: Slot) {
        let capture = self.capture(slot);
        let status = match capture.source() {
            InputSource::Empty => "not provided".dimmed().to_string(),
            InputSource::Upload { file, extracted_text, page_count } => {
                let pages = page_count.map(|p| format!(", {} page(s)", p)).unwrap_or_default();
                format!(
                    "{} {} ({} characters{})",
                    "✔".green(),
                    file.name,
                    extracted_text.chars().count(),
                    pages
                )
            }
            InputSource::Paste { text } => {
                format!("{} pasted text ({} characters)", "✔".green(), text.chars().count())
            }
        };
        println!("  {:<16} {}", format!("{}:", slot), status);
    }

    async fn upload(&mut self, slot: Slot) -> Result<()> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt(format!("Path to {} file ({})", slot, ACCEPTED_EXTENSIONS.join(", ")))
            .interact_text()
            .map_err(ResumeTailorError::from)?;
        let path = PathBuf::from(raw.trim());

        let capture = match slot {
            Slot::Resume => &mut self.resume,
            Slot::JobDescription => &mut self.job,
        };
        let uploaded = capture.upload_path(&path, &self.backend).await.map(str::to_string);

        match uploaded {
            Ok(text) => {
                self.controller.set_text(slot, text);
                Ok(())
            }
            Err(e) => {
                self.controller.set_text(slot, "");
                Err(e)
            }
        }
    }

    fn paste(&mut self, slot: Slot) -> Result<()> {
        let Some(text) = Editor::new()
            .extension(".txt")
            .edit("")
            .map_err(ResumeTailorError::from)?
        else {
            return Ok(());
        };

        match self.capture_mut(slot).paste(&text).map(str::to_string) {
            Some(accepted) => {
                self.controller.set_text(slot, accepted);
                Ok(())
            }
            None => Err(ResumeTailorError::InvalidInput(format!("The pasted {} was empty", slot))),
        }
    }

    async fn customize(&mut self) -> Result<()> {
        let ticket = self.controller.begin_customization()?;
        self.presenter.sync(self.controller.session());

        let spinner = busy_indicator("Customizing your resume... analyzing job requirements and optimizing content");

        let outcome = self.backend.customize(ticket.request()).await;
        spinner.finish_and_clear();

        self.controller.complete_customization(ticket, outcome);
        self.presenter.sync(self.controller.session());
        Ok(())
    }

    fn edit(&mut self) -> Result<()> {
        self.presenter.toggle_edit();
        let edited = Editor::new()
            .extension(".txt")
            .edit(self.presenter.current_text())
            .map_err(ResumeTailorError::from)?;
        if let Some(text) = edited {
            self.presenter.set_text(text)?;
        }
        self.presenter.toggle_edit();
        Ok(())
    }

    fn copy(&mut self) -> Result<()> {
        let mut clipboard = SystemClipboard::new()?;
        self.presenter.copy_to_clipboard(&mut clipboard)?;
        println!("{} Copied to clipboard!", "✔".green());
        Ok(())
    }

    fn download(&mut self) -> Result<()> {
        let path = self.presenter.download(&self.download_dir)?;
        println!("{} Saved to {}", "✔".green(), path.display());
        Ok(())
    }
}

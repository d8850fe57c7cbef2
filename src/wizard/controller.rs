//! Wizard controller
//!
//! Owns the [`Session`] and is the only thing that mutates it. Input capture
//! hands it texts, the customization client hands it outcomes, and the
//! presenter only ever reads.
//!
//! A customization is started with [`WizardController::begin_customization`],
//! which returns a [`CustomizationTicket`]. The ticket is later handed back
//! together with the backend outcome. Every reset or input change bumps the
//! controller's generation, so a ticket issued before that point resolves as
//! [`Resolution::Stale`] and leaves the session untouched.

use crate::api::{CustomizationBackend, CustomizationResult, CustomizeRequest};
use crate::error::{Result, ResumeTailorError};
use crate::input::Slot;
use crate::wizard::session::{CustomizationState, Session, WizardStep};
use log::{debug, error, info};

/// Proof that a customization was started, and the payload to send.
#[derive(Debug)]
pub struct CustomizationTicket {
    generation: u64,
    request: CustomizeRequest,
}

impl CustomizationTicket {
    pub fn request(&self) -> &CustomizeRequest {
        &self.request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The session moved on before the call settled.
    Stale,
}

#[derive(Debug, Default)]
pub struct WizardController {
    session: Session,
    generation: u64,
}

impl WizardController {
    pub fn new(session_id: Option<String>) -> Self {
        Self {
            session: Session::with_session_id(session_id),
            generation: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn step(&self) -> WizardStep {
        self.session.step()
    }

    pub fn is_processing(&self) -> bool {
        self.session.is_processing()
    }

    pub fn set_text(&mut self, slot: Slot, text: impl Into<String>) {
        match slot {
            Slot::Resume => self.set_resume_text(text),
            Slot::JobDescription => self.set_job_description_text(text),
        }
    }

    pub fn set_resume_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.session.resume_text {
            self.session.resume_text = text;
            self.discard_customization();
        }
        debug!("Resume text updated, now at {}", self.step());
    }

    pub fn set_job_description_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.session.job_description_text {
            self.session.job_description_text = text;
            self.discard_customization();
        }
        debug!("Job description text updated, now at {}", self.step());
    }

    /// Only legal from [`WizardStep::ReadyToCustomize`]; moves to step 4 with
    /// the processing flag raised.
    pub fn begin_customization(&mut self) -> Result<CustomizationTicket> {
        let step = self.step();
        if step != WizardStep::ReadyToCustomize {
            let reason = if self.is_processing() {
                "a customization is already in progress".to_string()
            } else {
                format!("cannot customize from {}", step)
            };
            return Err(ResumeTailorError::InvalidTransition(reason));
        }

        self.generation += 1;
        self.session.customization = CustomizationState::InFlight {
            generation: self.generation,
        };
        info!("Starting customization (generation {})", self.generation);

        Ok(CustomizationTicket {
            generation: self.generation,
            request: CustomizeRequest {
                resume_text: self.session.resume_text.clone(),
                job_description: self.session.job_description_text.clone(),
                session_id: self.session.session_id.clone(),
            },
        })
    }

    /// Records the outcome of the call the ticket was issued for. The
    /// processing flag drops whatever the outcome.
    pub fn complete_customization(
        &mut self,
        ticket: CustomizationTicket,
        outcome: Result<CustomizationResult>,
    ) -> Resolution {
        let current = matches!(
            self.session.customization,
            CustomizationState::InFlight { generation } if generation == ticket.generation
        );
        if !current {
            debug!("Ignoring stale customization outcome (generation {})", ticket.generation);
            return Resolution::Stale;
        }

        self.session.customization = match outcome {
            Ok(result) => {
                if self.session.session_id.is_none() {
                    self.session.session_id = result.session_id.clone();
                }
                info!(
                    "Customization finished: {} improvements, {} keywords added",
                    result.improvements.len(),
                    result.keywords_added.len()
                );
                CustomizationState::Completed(result)
            }
            Err(e) => {
                error!("Processing error: {}", e);
                CustomizationState::Failed {
                    message: e.user_message(),
                }
            }
        };
        Resolution::Applied
    }

    /// Begin, call the backend once, complete.
    pub async fn customize<B>(&mut self, backend: &B) -> Result<Resolution>
    where
        B: CustomizationBackend + Sync,
    {
        let ticket = self.begin_customization()?;
        let outcome = backend.customize(ticket.request()).await;
        Ok(self.complete_customization(ticket, outcome))
    }

    /// Back to step 1. The session id survives; it identifies the user, not the run.
    pub fn reset(&mut self) {
        let session_id = self.session.session_id.take();
        self.session = Session::with_session_id(session_id);
        self.generation += 1;
        info!("Wizard reset");
    }

    fn discard_customization(&mut self) {
        if self.session.customization != CustomizationState::NotRequested {
            debug!("Inputs changed, discarding customization state");
            self.session.customization = CustomizationState::NotRequested;
            self.generation += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_result, FakeBackend};

    fn ready_controller() -> WizardController {
        let mut wizard = WizardController::default();
        wizard.set_resume_text("JANE DOE\nRust developer");
        wizard.set_job_description_text("Senior Rust Engineer");
        wizard
    }

    #[test]
    fn test_initial_state() {
        let wizard = WizardController::default();
        assert_eq!(wizard.step(), WizardStep::AwaitingResume);
        assert!(!wizard.is_processing());
        assert!(wizard.session().customization_result().is_none());
    }

    #[test]
    fn test_both_texts_reach_ready_in_either_order() {
        let mut wizard = WizardController::default();
        wizard.set_job_description_text("job");
        assert_eq!(wizard.step(), WizardStep::AwaitingResume);
        wizard.set_resume_text("resume");
        assert_eq!(wizard.step(), WizardStep::ReadyToCustomize);

        let mut wizard = WizardController::default();
        wizard.set_resume_text("resume");
        assert_eq!(wizard.step(), WizardStep::AwaitingJobDescription);
        wizard.set_job_description_text("job");
        assert_eq!(wizard.step(), WizardStep::ReadyToCustomize);
    }

    #[test]
    fn test_cannot_skip_to_result() {
        let mut wizard = WizardController::default();
        let err = wizard.begin_customization().unwrap_err();
        assert!(matches!(err, ResumeTailorError::InvalidTransition(_)));
        assert_eq!(wizard.step(), WizardStep::AwaitingResume);
    }

    #[test]
    fn test_processing_until_settled() {
        let mut wizard = ready_controller();
        let ticket = wizard.begin_customization().unwrap();

        assert_eq!(wizard.step(), WizardStep::ResultShown);
        assert!(wizard.is_processing());
        assert_eq!(ticket.request().job_description, "Senior Rust Engineer");

        let resolution = wizard.complete_customization(ticket, Ok(sample_result()));
        assert_eq!(resolution, Resolution::Applied);
        assert!(!wizard.is_processing());
        assert_eq!(wizard.session().customization_result(), Some(&sample_result()));
    }

    #[test]
    fn test_duplicate_submission_rejected() {
        let mut wizard = ready_controller();
        let _ticket = wizard.begin_customization().unwrap();
        let err = wizard.begin_customization().unwrap_err();
        assert!(err.to_string().contains("already in progress"));
    }

    #[test]
    fn test_failure_clears_processing_and_shows_no_result() {
        let mut wizard = ready_controller();
        let ticket = wizard.begin_customization().unwrap();
        wizard.complete_customization(
            ticket,
            Err(ResumeTailorError::CustomizationRequest("Failed to customize resume".into())),
        );

        assert!(!wizard.is_processing());
        assert!(wizard.session().customization_result().is_none());
        assert_eq!(wizard.session().failure(), Some("Failed to customize resume"));
        assert_eq!(wizard.step(), WizardStep::ResultShown);
    }

    #[test]
    fn test_clearing_text_regresses_from_result() {
        let mut wizard = ready_controller();
        let ticket = wizard.begin_customization().unwrap();
        wizard.complete_customization(ticket, Ok(sample_result()));

        wizard.set_job_description_text("");
        assert!(wizard.step() < WizardStep::ReadyToCustomize);
        assert!(wizard.session().customization_result().is_none());

        let mut wizard = ready_controller();
        wizard.set_text(Slot::Resume, "");
        assert_eq!(wizard.step(), WizardStep::AwaitingResume);
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut wizard = WizardController::new(Some("session-1".to_string()));
        wizard.set_resume_text("resume");
        wizard.set_job_description_text("job");
        let ticket = wizard.begin_customization().unwrap();
        wizard.complete_customization(ticket, Ok(sample_result()));

        wizard.reset();

        let session = wizard.session();
        assert_eq!(session.resume_text, "");
        assert_eq!(session.job_description_text, "");
        assert!(session.customization_result().is_none());
        assert!(!session.is_processing());
        assert_eq!(wizard.step(), WizardStep::AwaitingResume);
        assert_eq!(session.session_id.as_deref(), Some("session-1"));
    }

    #[test]
    fn test_resolution_after_reset_is_ignored() {
        let mut wizard = ready_controller();
        let ticket = wizard.begin_customization().unwrap();
        wizard.reset();
        wizard.set_resume_text("other resume");
        wizard.set_job_description_text("other job");

        let resolution = wizard.complete_customization(ticket, Ok(sample_result()));
        assert_eq!(resolution, Resolution::Stale);
        assert_eq!(wizard.step(), WizardStep::ReadyToCustomize);
        assert!(wizard.session().customization_result().is_none());
    }

    #[test]
    fn test_backend_session_id_is_adopted() {
        let mut wizard = ready_controller();
        let ticket = wizard.begin_customization().unwrap();
        assert_eq!(ticket.request().session_id, None);

        let mut result = sample_result();
        result.session_id = Some("generated-by-backend".to_string());
        wizard.complete_customization(ticket, Ok(result));

        assert_eq!(wizard.session().session_id.as_deref(), Some("generated-by-backend"));
    }

    #[tokio::test]
    async fn test_customize_against_backend() {
        let backend = FakeBackend::default().with_result(sample_result());
        let mut wizard = ready_controller();

        let resolution = wizard.customize(&backend).await.unwrap();
        assert_eq!(resolution, Resolution::Applied);
        assert_eq!(backend.customize_calls(), 1);
        assert_eq!(
            backend.last_request().map(|r| r.resume_text),
            Some("JANE DOE\nRust developer".to_string())
        );
        assert!(wizard.session().customization_result().is_some());
    }

    #[tokio::test]
    async fn test_customize_failure_is_recorded_not_returned() {
        let backend = FakeBackend::default();
        let mut wizard = ready_controller();

        let resolution = wizard.customize(&backend).await.unwrap();
        assert_eq!(resolution, Resolution::Applied);
        assert!(!wizard.is_processing());
        assert!(wizard.session().failure().is_some());
    }
}

//! Client-held state of one wizard run

use crate::api::CustomizationResult;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    AwaitingResume = 1,
    AwaitingJobDescription = 2,
    ReadyToCustomize = 3,
    ResultShown = 4,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::AwaitingResume,
        WizardStep::AwaitingJobDescription,
        WizardStep::ReadyToCustomize,
        WizardStep::ResultShown,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardStep::AwaitingResume => "Upload Resume",
            WizardStep::AwaitingJobDescription => "Add Job Description",
            WizardStep::ReadyToCustomize => "Customize",
            WizardStep::ResultShown => "Download",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: {}", self.number(), self.label())
    }
}

/// Where the customization of the current texts stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CustomizationState {
    #[default]
    NotRequested,
    InFlight {
        generation: u64,
    },
    Completed(CustomizationResult),
    /// The call settled with an error; distinct from "nothing yet".
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub resume_text: String,
    pub job_description_text: String,
    pub customization: CustomizationState,
    pub session_id: Option<String>,
}

impl Session {
    pub fn with_session_id(session_id: Option<String>) -> Self {
        Self {
            session_id,
            ..Self::default()
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.customization, CustomizationState::InFlight { .. })
    }

    pub fn customization_result(&self) -> Option<&CustomizationResult> {
        match &self.customization {
            CustomizationState::Completed(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.customization {
            CustomizationState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Derived from the texts and the customization state, never stored.
    pub fn step(&self) -> WizardStep {
        if self.resume_text.is_empty() {
            WizardStep::AwaitingResume
        } else if self.job_description_text.is_empty() {
            WizardStep::AwaitingJobDescription
        } else if self.customization == CustomizationState::NotRequested {
            WizardStep::ReadyToCustomize
        } else {
            WizardStep::ResultShown
        }
    }
}

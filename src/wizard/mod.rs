//! Four-step wizard: resume, job description, customize, result

pub mod controller;
pub mod session;

pub use controller::{CustomizationTicket, Resolution, WizardController};
pub use session::{CustomizationState, Session, WizardStep};

//! Session events and the side effects their transitions request.

use shared::{
    domain::{HealthStatus, ThemePreference},
    protocol::ReviewOutcome,
};

use crate::form::{DocumentUpload, Submission};

/// Identifies one submission. `epoch` is the scenario generation the request
/// was issued under; a completion from an older epoch is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    pub epoch: u64,
    pub sequence: u64,
}

#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub ticket: SubmissionTicket,
    pub submission: Submission,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    ScenarioSelected(String),
    StartupCompleted {
        status: HealthStatus,
        version: Option<String>,
    },
    ThemeToggled,
    SubmitRequested,
    SubmitSucceeded {
        ticket: SubmissionTicket,
        outcome: Box<ReviewOutcome>,
    },
    SubmitFailed {
        ticket: SubmissionTicket,
        message: String,
    },
    TitleEdited(String),
    DescriptionEdited(String),
    GithubUrlEdited(String),
    DocumentSelected(Vec<DocumentUpload>),
    SubmittedByEdited(String),
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::ScenarioSelected(_) => "scenario_selected",
            SessionEvent::StartupCompleted { .. } => "startup_completed",
            SessionEvent::ThemeToggled => "theme_toggled",
            SessionEvent::SubmitRequested => "submit_requested",
            SessionEvent::SubmitSucceeded { .. } => "submit_succeeded",
            SessionEvent::SubmitFailed { .. } => "submit_failed",
            SessionEvent::TitleEdited(_) => "title_edited",
            SessionEvent::DescriptionEdited(_) => "description_edited",
            SessionEvent::GithubUrlEdited(_) => "github_url_edited",
            SessionEvent::DocumentSelected(_) => "document_selected",
            SessionEvent::SubmittedByEdited(_) => "submitted_by_edited",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Effect {
    ProbeHealth,
    PersistTheme(ThemePreference),
    Submit(SubmissionRequest),
}

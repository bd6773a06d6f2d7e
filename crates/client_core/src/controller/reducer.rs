//! Session state and its transition table.

use shared::{
    domain::{HealthStatus, ThemePreference},
    protocol::ReviewOutcome,
};
use tracing::{debug, warn};

use crate::{
    controller::events::{Effect, SessionEvent, SubmissionRequest, SubmissionTicket},
    form::FormState,
    scenario::ScenarioCatalog,
};

/// Everything the presentation layer reads. Result and error are single
/// slots: at most one of them is set, and each submission replaces them
/// wholesale.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    catalog: ScenarioCatalog,
    form: FormState,
    result: Option<ReviewOutcome>,
    error: Option<String>,
    health: HealthStatus,
    backend_version: Option<String>,
    theme: ThemePreference,
    epoch: u64,
    next_sequence: u64,
    in_flight: Option<SubmissionTicket>,
}

impl ReviewSession {
    /// Seeds the default scenario and requests the one startup health probe.
    pub fn start(catalog: ScenarioCatalog, theme: ThemePreference) -> (Self, Vec<Effect>) {
        let session = Self {
            form: FormState::new(catalog.default_scenario()),
            catalog,
            result: None,
            error: None,
            health: HealthStatus::Checking,
            backend_version: None,
            theme,
            epoch: 0,
            next_sequence: 0,
            in_flight: None,
        };
        (session, vec![Effect::ProbeHealth])
    }

    pub fn apply(&mut self, event: SessionEvent) -> Vec<Effect> {
        debug!(event = event.name(), "applying session event");
        match event {
            SessionEvent::ScenarioSelected(name) => {
                let Some(scenario) = self.catalog.get(&name) else {
                    warn!(scenario = %name, "ignoring unknown scenario");
                    return Vec::new();
                };
                self.form.apply_scenario(scenario);
                self.result = None;
                self.error = None;
                self.epoch += 1;
                Vec::new()
            }
            SessionEvent::StartupCompleted { status, version } => {
                self.health = status;
                self.backend_version = version;
                Vec::new()
            }
            SessionEvent::ThemeToggled => {
                self.theme = self.theme.toggled();
                vec![Effect::PersistTheme(self.theme)]
            }
            SessionEvent::SubmitRequested => self.begin_submission(),
            SessionEvent::SubmitSucceeded { ticket, outcome } => {
                if self.settle(ticket) {
                    self.result = Some(*outcome);
                    self.error = None;
                }
                Vec::new()
            }
            SessionEvent::SubmitFailed { ticket, message } => {
                if self.settle(ticket) {
                    self.error = Some(message);
                    self.result = None;
                }
                Vec::new()
            }
            SessionEvent::TitleEdited(value) => {
                let accepted = self.form.set_title(value);
                self.log_rejected_edit("title", accepted);
                Vec::new()
            }
            SessionEvent::DescriptionEdited(value) => {
                let accepted = self.form.set_description(value);
                self.log_rejected_edit("description", accepted);
                Vec::new()
            }
            SessionEvent::GithubUrlEdited(value) => {
                let accepted = self.form.set_github_url(value);
                self.log_rejected_edit("github_url", accepted);
                Vec::new()
            }
            SessionEvent::DocumentSelected(files) => {
                let accepted = self.form.select_document(files);
                self.log_rejected_edit("document", accepted);
                Vec::new()
            }
            SessionEvent::SubmittedByEdited(value) => {
                self.form.set_submitted_by(value);
                Vec::new()
            }
        }
    }

    fn begin_submission(&mut self) -> Vec<Effect> {
        if let Some(ticket) = self.in_flight {
            debug!(sequence = ticket.sequence, "submission already in flight");
            return Vec::new();
        }
        let ticket = SubmissionTicket {
            epoch: self.epoch,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.in_flight = Some(ticket);
        self.result = None;
        self.error = None;
        vec![Effect::Submit(SubmissionRequest {
            ticket,
            submission: self.form.to_submission(),
        })]
    }

    /// Clears the in-flight flag for the outstanding ticket. Returns whether
    /// the completion may still write its outcome: a completion issued before
    /// the last scenario switch is dropped.
    fn settle(&mut self, ticket: SubmissionTicket) -> bool {
        if self.in_flight != Some(ticket) {
            warn!(sequence = ticket.sequence, "ignoring completion for unknown submission");
            return false;
        }
        self.in_flight = None;
        if ticket.epoch != self.epoch {
            debug!(sequence = ticket.sequence, "dropping completion from a previous scenario");
            return false;
        }
        true
    }

    fn log_rejected_edit(&self, field: &'static str, accepted: bool) {
        if !accepted {
            debug!(field, scenario = self.form.scenario(), "edit rejected");
        }
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn result(&self) -> Option<&ReviewOutcome> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn health(&self) -> HealthStatus {
        self.health
    }

    pub fn backend_version(&self) -> Option<&str> {
        self.backend_version.as_deref()
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;

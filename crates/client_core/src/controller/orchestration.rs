//! Effect execution: runs health probes and submissions in the background
//! and feeds their completions back into the session as events.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::HealthStatus, protocol::ReviewOutcome};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    controller::{
        events::{Effect, SessionEvent, SubmissionRequest},
        reducer::ReviewSession,
    },
    endpoint::Endpoints,
    error::SubmissionError,
    form::Submission,
    health::{HealthProbe, HealthReading},
    scenario::ScenarioCatalog,
    submission::SubmissionOrchestrator,
    theme::ThemePersistence,
};

/// The remote evaluation service as seen by the session.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    async fn check_health(&self) -> HealthReading;
    async fn submit(&self, submission: &Submission) -> Result<ReviewOutcome, SubmissionError>;
}

pub struct HttpReviewBackend {
    probe: HealthProbe,
    orchestrator: SubmissionOrchestrator,
}

impl HttpReviewBackend {
    pub fn new(probe: HealthProbe, orchestrator: SubmissionOrchestrator) -> Self {
        Self {
            probe,
            orchestrator,
        }
    }

    pub fn from_endpoints(http: Client, endpoints: &Endpoints) -> Self {
        Self::new(
            HealthProbe::new(http.clone(), endpoints.health.clone()),
            SubmissionOrchestrator::new(http, endpoints.review.clone()),
        )
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.probe = self.probe.with_timeout(timeout);
        self
    }
}

#[async_trait]
impl ReviewBackend for HttpReviewBackend {
    async fn check_health(&self) -> HealthReading {
        self.probe.check_report().await
    }

    async fn submit(&self, submission: &Submission) -> Result<ReviewOutcome, SubmissionError> {
        self.orchestrator.submit(submission).await
    }
}

/// Executes effects. Completions travel back over a channel; once the
/// receiving session is gone they are dropped instead of written.
pub struct SessionRuntime {
    backend: Arc<dyn ReviewBackend>,
    theme: ThemePersistence,
    events_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionRuntime {
    pub fn new(
        backend: Arc<dyn ReviewBackend>,
        theme: ThemePersistence,
        events_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            backend,
            theme,
            events_tx,
        }
    }

    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::ProbeHealth => self.spawn_health_probe(),
            Effect::PersistTheme(theme) => self.theme.persist(theme),
            Effect::Submit(request) => self.spawn_submission(request),
        }
    }

    fn spawn_health_probe(&self) {
        let backend = Arc::clone(&self.backend);
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let reading = backend.check_health().await;
            let event = SessionEvent::StartupCompleted {
                status: reading.status,
                version: reading.version,
            };
            if events_tx.send(event).is_err() {
                debug!("session closed; dropping health reading");
            }
        });
    }

    fn spawn_submission(&self, request: SubmissionRequest) {
        let backend = Arc::clone(&self.backend);
        let events_tx = self.events_tx.clone();
        let SubmissionRequest { ticket, submission } = request;
        info!(sequence = ticket.sequence, "submitting task for review");
        tokio::spawn(async move {
            let event = match backend.submit(&submission).await {
                Ok(outcome) => SessionEvent::SubmitSucceeded {
                    ticket,
                    outcome: Box::new(outcome),
                },
                Err(err) => SessionEvent::SubmitFailed {
                    ticket,
                    message: err.user_message(),
                },
            };
            if events_tx.send(event).is_err() {
                debug!(sequence = ticket.sequence, "session closed; dropping submission outcome");
            }
        });
    }
}

/// A session wired to its runtime. Must be created inside a tokio runtime.
pub struct ReviewController {
    session: ReviewSession,
    runtime: SessionRuntime,
    events_rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl ReviewController {
    pub fn start(
        catalog: ScenarioCatalog,
        backend: Arc<dyn ReviewBackend>,
        theme: ThemePersistence,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (session, effects) = ReviewSession::start(catalog, theme.load());
        let runtime = SessionRuntime::new(backend, theme, events_tx);
        for effect in effects {
            runtime.run(effect);
        }
        Self {
            session,
            runtime,
            events_rx,
        }
    }

    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    pub fn dispatch(&mut self, event: SessionEvent) {
        for effect in self.session.apply(event) {
            self.runtime.run(effect);
        }
    }

    /// Waits for the next background completion and applies it.
    pub async fn next_event(&mut self) -> bool {
        match self.events_rx.recv().await {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    /// Pumps completions until the health probe has reported and no
    /// submission is in flight.
    pub async fn settle(&mut self) {
        while self.session.is_in_flight()
            || self.session.health() == HealthStatus::Checking
        {
            if !self.next_event().await {
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;

//! Client-side orchestration for the task review service: scenario presets,
//! form state, backend probing, submission, and verdict presentation.

pub mod config;
pub mod controller;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod health;
pub mod presenter;
pub mod scenario;
pub mod submission;
pub mod theme;

pub use config::{load_settings, Settings};
pub use controller::{
    Effect, HttpReviewBackend, ReviewBackend, ReviewController, ReviewSession, SessionEvent,
};
pub use endpoint::{normalize_backend_url, Endpoints};
pub use error::SubmissionError;
pub use form::{DocumentUpload, FormState, Submission};
pub use health::{HealthProbe, HealthReading};
pub use presenter::{status_color, PresentedReview, StatusColor};
pub use scenario::{Scenario, ScenarioCatalog};
pub use submission::SubmissionOrchestrator;
pub use theme::{JsonThemeStore, ThemePersistence, ThemeStore};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

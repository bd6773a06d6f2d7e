//! Editable submission fields, gated by the active scenario's lock.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scenario::Scenario;

pub const DEFAULT_SUBMITTED_BY: &str = "Demo Professional";
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read document '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("document path '{0}' has no file name")]
    MissingFileName(PathBuf),
}

/// A selected document, already read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        let filename = filename.into();
        let mime_type = mime_guess::from_path(&filename)
            .first_raw()
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        Self {
            filename,
            mime_type,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| DocumentError::MissingFileName(path.to_path_buf()))?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| DocumentError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(filename, bytes))
    }
}

/// Outbound request fields. Empty text and a missing document are `None`,
/// so the service never receives an empty string as "provided".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub title: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub document: Option<DocumentUpload>,
    pub submitted_by: String,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    scenario: &'static str,
    locked: bool,
    title: String,
    description: String,
    github_url: String,
    document: Option<DocumentUpload>,
    submitted_by: String,
}

impl FormState {
    pub fn new(scenario: &'static Scenario) -> Self {
        let mut form = Self {
            scenario: scenario.name,
            locked: scenario.locked,
            title: String::new(),
            description: String::new(),
            github_url: String::new(),
            document: None,
            submitted_by: DEFAULT_SUBMITTED_BY.to_string(),
        };
        form.apply_scenario(scenario);
        form
    }

    /// Overwrites the preset fields and drops the document. Unsaved edits
    /// are discarded; `submitted_by` is kept.
    pub fn apply_scenario(&mut self, scenario: &'static Scenario) {
        self.scenario = scenario.name;
        self.locked = scenario.locked;
        self.title = scenario.title.to_string();
        self.description = scenario.description.to_string();
        self.github_url = scenario.github_url.to_string();
        self.document = None;
    }

    pub fn scenario(&self) -> &'static str {
        self.scenario
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn github_url(&self) -> &str {
        &self.github_url
    }

    pub fn document(&self) -> Option<&DocumentUpload> {
        self.document.as_ref()
    }

    pub fn submitted_by(&self) -> &str {
        &self.submitted_by
    }

    pub fn set_title(&mut self, value: impl Into<String>) -> bool {
        if self.locked {
            return false;
        }
        self.title = value.into();
        true
    }

    pub fn set_description(&mut self, value: impl Into<String>) -> bool {
        if self.locked {
            return false;
        }
        self.description = value.into();
        true
    }

    pub fn set_github_url(&mut self, value: impl Into<String>) -> bool {
        if self.locked {
            return false;
        }
        self.github_url = value.into();
        true
    }

    /// Takes the first file of a selection, replacing any earlier document.
    /// An empty selection leaves the current document in place.
    pub fn select_document(&mut self, files: impl IntoIterator<Item = DocumentUpload>) -> bool {
        if self.locked {
            return false;
        }
        match files.into_iter().next() {
            Some(file) => {
                self.document = Some(file);
                true
            }
            None => false,
        }
    }

    pub fn set_submitted_by(&mut self, value: impl Into<String>) {
        self.submitted_by = value.into();
    }

    pub fn to_submission(&self) -> Submission {
        Submission {
            title: non_empty(&self.title),
            description: non_empty(&self.description),
            github_url: non_empty(&self.github_url),
            document: self.document.clone(),
            submitted_by: self.submitted_by.clone(),
        }
    }
}

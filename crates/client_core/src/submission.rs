//! Review submission: multipart payload assembly, the single outbound call,
//! and normalization of its outcome.

use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::protocol::{ReviewOutcome, ReviewResult};
use tracing::{info, warn};

use crate::{
    error::{classify_error_response, SubmissionError},
    form::Submission,
};

pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_GITHUB_URL: &str = "github_url";
pub const FIELD_DOCUMENT: &str = "pdf_file";
pub const FIELD_SUBMITTED_BY: &str = "submitted_by";

pub fn build_review_form(submission: &Submission) -> Result<Form, SubmissionError> {
    let mut form = Form::new();
    if let Some(title) = &submission.title {
        form = form.text(FIELD_TITLE, title.clone());
    }
    if let Some(description) = &submission.description {
        form = form.text(FIELD_DESCRIPTION, description.clone());
    }
    if let Some(github_url) = &submission.github_url {
        form = form.text(FIELD_GITHUB_URL, github_url.clone());
    }
    if let Some(document) = &submission.document {
        let part = Part::bytes(document.bytes.clone())
            .file_name(document.filename.clone())
            .mime_str(&document.mime_type)
            .map_err(|err| SubmissionError::Unknown(Some(err.to_string())))?;
        form = form.part(FIELD_DOCUMENT, part);
    }
    Ok(form.text(FIELD_SUBMITTED_BY, submission.submitted_by.clone()))
}

#[derive(Debug, Clone)]
pub struct SubmissionOrchestrator {
    http: Client,
    review_url: String,
}

impl SubmissionOrchestrator {
    pub fn new(http: Client, review_url: impl Into<String>) -> Self {
        Self {
            http,
            review_url: review_url.into(),
        }
    }

    pub fn review_url(&self) -> &str {
        &self.review_url
    }

    /// Issues exactly one POST and maps the response to an outcome. A missing
    /// next task is replaced with the default one.
    pub async fn submit(&self, submission: &Submission) -> Result<ReviewOutcome, SubmissionError> {
        let form = build_review_form(submission)?;
        let response = self
            .http
            .post(&self.review_url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                warn!(url = %self.review_url, "review request failed: {err}");
                SubmissionError::Transport(err.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            warn!(url = %self.review_url, "failed to read review response: {err}");
            SubmissionError::Transport(err.to_string())
        })?;

        if !status.is_success() {
            let err = classify_error_response(status, &body);
            warn!(status = status.as_u16(), "review rejected: {err}");
            return Err(err);
        }

        let review: ReviewResult = serde_json::from_slice(&body).map_err(|err| {
            warn!("review response did not match the expected shape: {err}");
            SubmissionError::Unknown(None)
        })?;
        info!(
            status = %review.status,
            score = review.score,
            "review completed"
        );
        Ok(ReviewOutcome::from(review))
    }
}

//! Display-ready values derived from a review outcome.

use shared::{
    domain::{HealthStatus, ReviewStatus, ThemePreference},
    protocol::{NextTask, ReviewOutcome},
};

pub const NO_FAILURES_TEXT: &str = "No critical failure reasons detected.";
pub const NO_HINTS_TEXT: &str = "Task quality meets all optimization thresholds.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Green,
    Amber,
    Red,
    Neutral,
}

impl StatusColor {
    pub fn hex(self) -> &'static str {
        match self {
            StatusColor::Green => "#10b981",
            StatusColor::Amber => "#f59e0b",
            StatusColor::Red => "#ef4444",
            StatusColor::Neutral => "#3b82f6",
        }
    }
}

pub fn status_color(status: &ReviewStatus) -> StatusColor {
    match status {
        ReviewStatus::Pass => StatusColor::Green,
        ReviewStatus::Borderline => StatusColor::Amber,
        ReviewStatus::Fail => StatusColor::Red,
        ReviewStatus::Other(_) => StatusColor::Neutral,
    }
}

/// One analysis dimension. `percent` is the raw service value used as the
/// bar width; it is trusted to be 0..=100 and not clamped here.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBar {
    pub label: &'static str,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresentedReview {
    pub status_label: String,
    pub status_color: StatusColor,
    pub score_label: String,
    pub readiness_label: String,
    pub eval_time_label: String,
    pub progress: [ProgressBar; 3],
    pub failure_reasons: Vec<String>,
    pub improvement_hints: Vec<String>,
    pub next_task: NextTask,
    pub completion_note: String,
}

impl PresentedReview {
    pub fn from_outcome(outcome: &ReviewOutcome) -> Self {
        let review = &outcome.review;
        Self {
            status_label: review.status.as_str().to_uppercase(),
            status_color: status_color(&review.status),
            score_label: format!("{}/100", review.score),
            readiness_label: format!("{}%", review.readiness_percent),
            eval_time_label: format!("{}ms", review.meta.evaluation_time_ms),
            progress: [
                ProgressBar {
                    label: "Technical Quality (Repo)",
                    percent: review.analysis.technical_quality,
                },
                ProgressBar {
                    label: "Clarity (Desc)",
                    percent: review.analysis.clarity,
                },
                ProgressBar {
                    label: "Discipline Signals (PDF)",
                    percent: review.analysis.discipline_signals,
                },
            ],
            failure_reasons: review.failure_reasons.clone(),
            improvement_hints: review.improvement_hints.clone(),
            next_task: outcome.next_task.clone(),
            completion_note: format!(
                "Evaluation complete in {}ms using {} mode.",
                review.meta.evaluation_time_ms, review.meta.mode
            ),
        }
    }
}

pub fn health_badge(status: HealthStatus, version: Option<&str>) -> String {
    match (status, version) {
        (HealthStatus::Online, Some(version)) => format!("Backend Online (v{version})"),
        (status, _) => format!("Backend {}", status.label()),
    }
}

pub fn theme_toggle_hint(current: ThemePreference) -> String {
    format!("Switch to {} mode", current.toggled())
}

pub fn submit_button_label(in_flight: bool) -> &'static str {
    if in_flight {
        "Analyzing..."
    } else {
        "Analyze Submission"
    }
}

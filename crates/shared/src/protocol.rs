use serde::{Deserialize, Serialize};

use crate::domain::ReviewStatus;

pub const DEFAULT_NEXT_TASK_TITLE: &str = "Proceed to Next Step";
pub const DEFAULT_NEXT_TASK_OBJECTIVE: &str = "General follow-up.";
pub const DEFAULT_NEXT_TASK_DIFFICULTY: &str = "medium";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewAnalysis {
    pub technical_quality: f64,
    pub clarity: f64,
    pub discipline_signals: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewMeta {
    pub evaluation_time_ms: f64,
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextTask {
    pub title: String,
    pub objective: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl NextTask {
    /// Stand-in shown when the service does not recommend a next task.
    pub fn fallback() -> Self {
        Self {
            title: DEFAULT_NEXT_TASK_TITLE.to_string(),
            objective: DEFAULT_NEXT_TASK_OBJECTIVE.to_string(),
            focus_area: None,
            difficulty: Some(DEFAULT_NEXT_TASK_DIFFICULTY.to_string()),
        }
    }
}

/// Success body of `POST {base}/review`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub status: ReviewStatus,
    pub score: f64,
    pub readiness_percent: f64,
    pub analysis: ReviewAnalysis,
    #[serde(default)]
    pub failure_reasons: Vec<String>,
    #[serde(default)]
    pub improvement_hints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_task: Option<NextTask>,
    pub meta: ReviewMeta,
}

/// A verdict paired with the next task to present, defaulted if absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOutcome {
    pub review: ReviewResult,
    pub next_task: NextTask,
}

impl From<ReviewResult> for ReviewOutcome {
    fn from(review: ReviewResult) -> Self {
        let next_task = review.next_task.clone().unwrap_or_else(NextTask::fallback);
        Self { review, next_task }
    }
}

/// Body of `GET /health`. Every field is optional; only the status code
/// decides availability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

//! Plain-text rendering of session state.

use std::fmt::Write;

use client_core::{
    presenter::{NO_FAILURES_TEXT, NO_HINTS_TEXT},
    PresentedReview, Scenario,
};

pub const BAR_WIDTH: usize = 30;

/// Draws a fixed-width bar. Values outside 0..=100 fill or empty the bar.
pub fn bar(percent: f64, width: usize) -> String {
    let filled = if percent.is_nan() {
        0
    } else {
        ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize
    };
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn render_scenarios<'a>(scenarios: impl Iterator<Item = &'a Scenario>, active: &str) -> String {
    let mut out = String::new();
    for scenario in scenarios {
        let marker = if scenario.name == active { "*" } else { " " };
        let lock = if scenario.locked { " (locked)" } else { "" };
        let _ = writeln!(out, "{marker} {}{lock}", scenario.name);
    }
    out
}

pub fn render_review(review: &PresentedReview) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Status: {} [{}]",
        review.status_label,
        review.status_color.hex()
    );
    let _ = writeln!(out, "Score: {}", review.score_label);
    let _ = writeln!(out, "Readiness: {}", review.readiness_label);
    let _ = writeln!(out, "Eval Time: {}", review.eval_time_label);

    let _ = writeln!(out, "\nAnalysis");
    for progress in &review.progress {
        let _ = writeln!(
            out,
            "  {:<26} [{}] {}%",
            progress.label,
            bar(progress.percent, BAR_WIDTH),
            progress.percent
        );
    }

    let _ = writeln!(out, "\nFailure Reasons");
    write_list(&mut out, &review.failure_reasons, NO_FAILURES_TEXT);
    let _ = writeln!(out, "\nImprovement Hints");
    write_list(&mut out, &review.improvement_hints, NO_HINTS_TEXT);

    let next = &review.next_task;
    let _ = writeln!(out, "\nRecommended Next Task");
    let _ = writeln!(out, "  {}", next.title);
    let _ = writeln!(out, "  {}", next.objective);
    if let Some(focus) = &next.focus_area {
        let _ = writeln!(out, "  Focus: {focus}");
    }
    if let Some(difficulty) = &next.difficulty {
        let _ = writeln!(out, "  Difficulty: {difficulty}");
    }

    let _ = writeln!(out, "\n{}", review.completion_note);
    out
}

fn write_list(out: &mut String, items: &[String], empty: &str) {
    if items.is_empty() {
        let _ = writeln!(out, "  {empty}");
        return;
    }
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

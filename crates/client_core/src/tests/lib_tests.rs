use super::*;
use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use shared::domain::{HealthStatus, ReviewStatus};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone, PartialEq)]
struct CapturedField {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl CapturedField {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[derive(Clone)]
struct ReviewServerState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<Vec<CapturedField>>>>,
}

const REVIEW_BODY: &str = r#"{
    "status": "pass",
    "score": 88,
    "readiness_percent": 91,
    "analysis": {"technical_quality": 90, "clarity": 86, "discipline_signals": 72},
    "failure_reasons": [],
    "improvement_hints": ["Document the retry policy"],
    "next_task": {
        "title": "Add chaos testing",
        "objective": "Verify recovery paths",
        "focus_area": "resilience",
        "difficulty": "hard"
    },
    "meta": {"evaluation_time_ms": 37, "mode": "hybrid"}
}"#;

async fn capture_review(
    State(state): State<ReviewServerState>,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        fields.push(CapturedField {
            name,
            file_name,
            content_type,
            bytes,
        });
    }
    state.requests.lock().await.push(fields);
    tokio::time::sleep(state.delay).await;
    (state.status, state.body.clone())
}

async fn health_ok() -> (StatusCode, &'static str) {
    (StatusCode::OK, r#"{"status":"healthy","version":"1.1.0"}"#)
}

async fn health_unavailable() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn health_slow() -> StatusCode {
    tokio::time::sleep(Duration::from_millis(500)).await;
    StatusCode::OK
}

async fn spawn_router(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn spawn_review_server(
    status: StatusCode,
    body: &str,
    delay: Duration,
) -> (Endpoints, Arc<Mutex<Vec<Vec<CapturedField>>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = ReviewServerState {
        status,
        body: body.to_string(),
        delay,
        requests: Arc::clone(&requests),
    };
    let app = Router::new()
        .route("/api/v1/task/review", post(capture_review))
        .route("/health", get(health_ok))
        .with_state(state);
    let base = spawn_router(app).await;
    (Endpoints::from_raw(&base).expect("endpoints"), requests)
}

fn orchestrator(endpoints: &Endpoints) -> SubmissionOrchestrator {
    SubmissionOrchestrator::new(reqwest::Client::new(), endpoints.review.clone())
}

fn live_form() -> FormState {
    FormState::new(ScenarioCatalog::builtin().default_scenario())
}

#[tokio::test]
async fn submit_sends_only_non_empty_fields() {
    let (endpoints, requests) =
        spawn_review_server(StatusCode::OK, REVIEW_BODY, Duration::ZERO).await;
    let mut form = live_form();
    form.set_description("Build a rate limiter with token buckets");

    orchestrator(&endpoints)
        .submit(&form.to_submission())
        .await
        .expect("review");

    let requests = requests.lock().await;
    assert_eq!(requests.len(), 1);
    let names: Vec<&str> = requests[0].iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["description", "submitted_by"]);
    assert_eq!(requests[0][1].text(), "Demo Professional");
}

#[tokio::test]
async fn submit_attaches_document_part() {
    let (endpoints, requests) =
        spawn_review_server(StatusCode::OK, REVIEW_BODY, Duration::ZERO).await;
    let catalog = ScenarioCatalog::builtin();
    let mut form = FormState::new(catalog.default_scenario());
    form.set_title("Cache layer");
    form.set_github_url("https://github.com/example/cache");
    form.select_document([DocumentUpload::new("design.pdf", b"%PDF-1.7".to_vec())]);
    form.set_submitted_by("Riya");

    orchestrator(&endpoints)
        .submit(&form.to_submission())
        .await
        .expect("review");

    let requests = requests.lock().await;
    let fields = &requests[0];
    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["title", "github_url", "pdf_file", "submitted_by"]);

    let document = &fields[2];
    assert_eq!(document.file_name.as_deref(), Some("design.pdf"));
    assert_eq!(document.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(document.bytes, b"%PDF-1.7".to_vec());
    assert_eq!(fields[3].text(), "Riya");
}

#[tokio::test]
async fn successful_review_is_decoded() {
    let (endpoints, _) = spawn_review_server(StatusCode::OK, REVIEW_BODY, Duration::ZERO).await;

    let outcome = orchestrator(&endpoints)
        .submit(&live_form().to_submission())
        .await
        .expect("review");

    assert_eq!(outcome.review.status, ReviewStatus::Pass);
    assert_eq!(outcome.review.score, 88.0);
    assert_eq!(outcome.review.meta.mode, "hybrid");
    assert_eq!(outcome.next_task.title, "Add chaos testing");
    assert_eq!(outcome.next_task.focus_area.as_deref(), Some("resilience"));
}

#[tokio::test]
async fn missing_next_task_is_defaulted() {
    let body = r#"{"status":"fail","score":20,"readiness_percent":10,
        "analysis":{"technical_quality":0,"clarity":25,"discipline_signals":0},
        "failure_reasons":["Description too short"],
        "meta":{"evaluation_time_ms":4,"mode":"rule"}}"#;
    let (endpoints, _) = spawn_review_server(StatusCode::OK, body, Duration::ZERO).await;

    let outcome = orchestrator(&endpoints)
        .submit(&live_form().to_submission())
        .await
        .expect("review");

    assert_eq!(outcome.next_task.title, "Proceed to Next Step");
    assert_eq!(outcome.next_task.objective, "General follow-up.");
    assert_eq!(outcome.next_task.difficulty.as_deref(), Some("medium"));
}

#[tokio::test]
async fn validation_detail_list_is_joined() {
    let (endpoints, _) = spawn_review_server(
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"detail":[{"loc":["body","submitted_by"],"msg":"a"},{"msg":"b"}]}"#,
        Duration::ZERO,
    )
    .await;

    let err = orchestrator(&endpoints)
        .submit(&live_form().to_submission())
        .await
        .expect_err("validation failure");

    assert_eq!(err.user_message(), "a, b");
}

#[tokio::test]
async fn server_detail_string_is_verbatim() {
    let (endpoints, _) = spawn_review_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        r#"{"detail":"System encountered an error. Please contact the demo team."}"#,
        Duration::ZERO,
    )
    .await;

    let err = orchestrator(&endpoints)
        .submit(&live_form().to_submission())
        .await
        .expect_err("server failure");

    assert_eq!(
        err,
        SubmissionError::Server("System encountered an error. Please contact the demo team.".into())
    );
}

#[tokio::test]
async fn error_without_detail_reports_status_code() {
    let (endpoints, _) =
        spawn_review_server(StatusCode::NOT_FOUND, "not found", Duration::ZERO).await;

    let err = orchestrator(&endpoints)
        .submit(&live_form().to_submission())
        .await
        .expect_err("unclassified failure");

    assert_eq!(err.user_message(), "Request failed with status code 404");
}

#[tokio::test]
async fn malformed_success_body_shows_generic_message() {
    let (endpoints, _) =
        spawn_review_server(StatusCode::OK, r#"{"status":"pass"}"#, Duration::ZERO).await;

    let err = orchestrator(&endpoints)
        .submit(&live_form().to_submission())
        .await
        .expect_err("undecodable review");

    assert_eq!(err, SubmissionError::Unknown(None));
    assert_eq!(err.user_message(), "An error occurred during analysis");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let endpoints = Endpoints::from_raw(&format!("http://{addr}")).expect("endpoints");
    let err = orchestrator(&endpoints)
        .submit(&live_form().to_submission())
        .await
        .expect_err("transport failure");

    assert!(matches!(err, SubmissionError::Transport(_)));
    assert_eq!(err.user_message(), "An error occurred during analysis");
}

#[tokio::test]
async fn health_probe_reports_online_with_version() {
    let (endpoints, _) = spawn_review_server(StatusCode::OK, REVIEW_BODY, Duration::ZERO).await;
    let probe = HealthProbe::new(reqwest::Client::new(), endpoints.health.clone());

    let reading = probe.check_report().await;
    assert_eq!(reading.status, HealthStatus::Online);
    assert_eq!(reading.version.as_deref(), Some("1.1.0"));
}

#[tokio::test]
async fn health_probe_non_success_is_offline() {
    let base = spawn_router(Router::new().route("/health", get(health_unavailable))).await;
    let endpoints = Endpoints::from_raw(&base).expect("endpoints");
    let probe = HealthProbe::new(reqwest::Client::new(), endpoints.health);

    assert_eq!(probe.check().await, HealthStatus::Offline);
}

#[tokio::test]
async fn health_probe_timeout_is_offline() {
    let base = spawn_router(Router::new().route("/health", get(health_slow))).await;
    let endpoints = Endpoints::from_raw(&base).expect("endpoints");
    let probe = HealthProbe::new(reqwest::Client::new(), endpoints.health)
        .with_timeout(Duration::from_millis(50));

    assert_eq!(probe.check().await, HealthStatus::Offline);
}

#[tokio::test]
async fn health_probe_unreachable_is_offline() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let probe = HealthProbe::new(reqwest::Client::new(), format!("http://{addr}/health"));
    assert_eq!(probe.check().await, HealthStatus::Offline);
}

#[tokio::test]
async fn controller_runs_probe_and_submission_end_to_end() {
    let (endpoints, requests) =
        spawn_review_server(StatusCode::OK, REVIEW_BODY, Duration::from_millis(50)).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let backend = HttpReviewBackend::from_endpoints(reqwest::Client::new(), &endpoints);
    let mut controller = ReviewController::start(
        ScenarioCatalog::builtin(),
        Arc::new(backend),
        ThemePersistence::new(JsonThemeStore::in_dir(dir.path())),
    );

    controller.dispatch(SessionEvent::ScenarioSelected("Good Submission".into()));
    controller.dispatch(SessionEvent::SubmitRequested);
    controller.dispatch(SessionEvent::SubmitRequested);
    assert!(controller.session().is_in_flight());

    controller.settle().await;

    let session = controller.session();
    assert_eq!(session.health(), HealthStatus::Online);
    assert!(!session.is_in_flight());
    assert!(session.error().is_none());
    assert_eq!(
        session.result().map(|r| r.review.status.clone()),
        Some(ReviewStatus::Pass)
    );
    assert_eq!(requests.lock().await.len(), 1);
}

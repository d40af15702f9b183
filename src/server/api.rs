//! REST handlers for planning, execution and report lookup

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::context::AppContext;
use crate::parser::types::TestCase;
use crate::report::{junit, TestReport};

/// Response for plan generation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResponse {
    pub total_tests: usize,
    pub tests: Vec<TestCase>,
}

/// Response for test execution
#[derive(Debug, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub executed_tests: Vec<TestReport>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub reports: Vec<String>,
}

/// Error payload. Also returned with 200 by `/report` for unknown names.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query params for execute endpoint
#[derive(Debug, Deserialize)]
pub struct ExecuteQuery {
    pub top_n: Option<usize>,
}

/// Any pipeline fault, rendered as a 500
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("{:#}", self.0),
            }),
        )
            .into_response()
    }
}

/// Build API router
pub fn api_router() -> Router<Arc<AppContext>> {
    Router::new()
        .route("/generate_plan", post(generate_plan))
        .route("/execute_tests", post(execute_tests))
        .route("/report/:test_name", get(get_report))
        .route("/reports", get(list_reports))
        .route("/reports/junit", get(export_junit))
}

/// POST /generate_plan - Plan a fresh batch of test cases
async fn generate_plan(State(ctx): State<Arc<AppContext>>) -> Json<PlanResponse> {
    let tests = ctx.planner.generate(ctx.config.plan_size);
    Json(PlanResponse {
        total_tests: tests.len(),
        tests,
    })
}

/// POST /execute_tests?top_n=3 - Plan, rank and execute the top tests
async fn execute_tests(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<ExecuteQuery>,
) -> Result<Json<ExecuteResponse>, ApiError> {
    let top_n = params.top_n.unwrap_or(ctx.config.default_top_n);

    let tests = ctx.planner.generate(ctx.config.plan_size);
    let selected = ctx.ranker.select(tests, top_n);
    log::info!("Executing {} test(s)", selected.len());

    let executed_tests = ctx.orchestrator.run_all(&selected).await?;
    Ok(Json(ExecuteResponse { executed_tests }))
}

/// GET /report/:test_name - Stored report, or a not-found payload
async fn get_report(
    State(ctx): State<Arc<AppContext>>,
    Path(test_name): Path<String>,
) -> Result<Response, ApiError> {
    match ctx.store().load(&test_name)? {
        Some(report) => Ok(Json(report).into_response()),
        None => Ok(Json(ErrorResponse {
            error: "Report not found".to_string(),
        })
        .into_response()),
    }
}

/// GET /reports - Names of all stored reports
async fn list_reports(State(ctx): State<Arc<AppContext>>) -> Json<ReportListResponse> {
    Json(ReportListResponse {
        reports: ctx.store().list(),
    })
}

/// GET /reports/junit - All stored reports as JUnit XML
async fn export_junit(State(ctx): State<Arc<AppContext>>) -> Result<Response, ApiError> {
    let reports = ctx.store().load_all()?;
    let xml = junit::generate_junit_xml(&reports, &crate::report::timestamp())?;
    Ok(([(header::CONTENT_TYPE, "application/xml")], xml).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::recording::RecordingLauncher;
    use crate::runner::EventEmitter;
    use crate::server::server::build_router;
    use crate::utils::Config;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn app(dir: &std::path::Path, launcher: RecordingLauncher) -> Router {
        let config = Config {
            target_url: "http://localhost:3000/".to_string(),
            artifacts_dir: dir.to_path_buf(),
            plan_size: 20,
            default_top_n: 3,
            ..Config::default()
        };
        let ctx = AppContext::with_launcher(config, Arc::new(launcher), EventEmitter::default());
        build_router(Arc::new(ctx))
    }

    async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_generate_plan() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), RecordingLauncher::new());

        let (status, body) = send(&app, "POST", "/generate_plan").await;
        assert_eq!(status, StatusCode::OK);

        let plan: PlanResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(plan.total_tests, 20);
        assert_eq!(plan.tests.first().unwrap().name, "Test-1");
        assert_eq!(plan.tests.last().unwrap().name, "Test-20");
    }

    #[tokio::test]
    async fn test_execute_then_fetch_report() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), RecordingLauncher::new());

        let (status, body) = send(&app, "POST", "/execute_tests").await;
        assert_eq!(status, StatusCode::OK);

        let executed: ExecuteResponse = serde_json::from_slice(&body).unwrap();
        let names: Vec<&str> = executed
            .executed_tests
            .iter()
            .map(|r| r.test_case.as_str())
            .collect();
        assert_eq!(names, vec!["Test-1", "Test-2", "Test-3"]);
        assert!(executed
            .executed_tests
            .iter()
            .all(|r| r.verdict == "Pass" && r.reproducibility == 100));

        for name in &names {
            assert!(dir.path().join(format!("screenshots/{}.png", name)).exists());
            assert!(dir.path().join(format!("reports/{}.json", name)).exists());
        }

        let (status, body) = send(&app, "GET", "/report/Test-1").await;
        assert_eq!(status, StatusCode::OK);
        let report: TestReport = serde_json::from_slice(&body).unwrap();
        assert_eq!(report, executed.executed_tests[0]);

        let (_, body) = send(&app, "GET", "/reports").await;
        let listed: ReportListResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed.reports, vec!["Test-1", "Test-2", "Test-3"]);
    }

    #[tokio::test]
    async fn test_execute_with_top_n() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), RecordingLauncher::new());

        let (_, body) = send(&app, "POST", "/execute_tests?top_n=5").await;
        let executed: ExecuteResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(executed.executed_tests.len(), 5);

        let (_, body) = send(&app, "POST", "/execute_tests?top_n=0").await;
        let executed: ExecuteResponse = serde_json::from_slice(&body).unwrap();
        assert!(executed.executed_tests.is_empty());

        let (_, body) = send(&app, "POST", "/execute_tests?top_n=100").await;
        let executed: ExecuteResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(executed.executed_tests.len(), 20);
    }

    #[tokio::test]
    async fn test_missing_report_is_not_an_http_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), RecordingLauncher::new());

        let (status, body) = send(&app, "GET", "/report/Test-42").await;
        assert_eq!(status, StatusCode::OK);

        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload, serde_json::json!({"error": "Report not found"}));
    }

    #[tokio::test]
    async fn test_browser_fault_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(
            dir.path(),
            RecordingLauncher::new().with_missing_selector("#submit"),
        );

        let (status, body) = send(&app, "POST", "/execute_tests").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(payload.error.contains("Test-1"));
        assert!(!dir.path().join("reports/Test-1.json").exists());
    }

    #[tokio::test]
    async fn test_junit_export_and_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), RecordingLauncher::new());

        send(&app, "POST", "/execute_tests?top_n=2").await;

        let (status, body) = send(&app, "GET", "/reports/junit").await;
        assert_eq!(status, StatusCode::OK);
        let xml = String::from_utf8(body).unwrap();
        assert!(xml.contains(r#"tests="2" failures="0""#));

        let (status, _) = send(&app, "GET", "/artifacts/screenshots/Test-2.png").await;
        assert_eq!(status, StatusCode::OK);
    }
}

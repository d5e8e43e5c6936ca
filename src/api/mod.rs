mod cli;

use axum::{
    Router,
    extract::{Json, Query},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    AlignedRow, Projection, ScenarioId, ScenarioParameters, ScenarioResult, Workbench,
    default_scenarios, try_project,
};

pub use cli::{Cli, CliFrequency, Command, ProjectArgs, ServeArgs, build_parameters, run_project};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ScenarioPayload {
    id: Option<u32>,
    principal: Option<f64>,
    #[serde(alias = "annualRatePercent")]
    rate: Option<f64>,
    #[serde(alias = "horizonYears", alias = "time")]
    years: Option<u32>,
    #[serde(alias = "compoundingFrequency")]
    frequency: Option<u32>,
    #[serde(alias = "recurringContribution")]
    monthly_contribution: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ComparePayload {
    scenarios: Vec<ScenarioPayload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScenarioSummary {
    id: ScenarioId,
    summary: ScenarioResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareResponse {
    results: Vec<ScenarioSummary>,
    rows: Vec<AlignedRow>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route(
            "/api/compare",
            get(compare_get_handler).post(compare_post_handler),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "compound HTTP API listening");
    axum::serve(listener, router()).await
}

async fn health_handler() -> Response {
    json_response(StatusCode::OK, HealthResponse { status: "ok" })
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(Query(payload): Query<ScenarioPayload>) -> Response {
    project_handler_impl(payload)
}

async fn project_post_handler(Json(payload): Json<ScenarioPayload>) -> Response {
    project_handler_impl(payload)
}

fn project_handler_impl(payload: ScenarioPayload) -> Response {
    match projection_from_payload(payload) {
        Ok(projection) => json_response(StatusCode::OK, projection),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

async fn compare_get_handler() -> Response {
    json_response(StatusCode::OK, build_compare_response(&Workbench::with_defaults()))
}

async fn compare_post_handler(Json(payload): Json<ComparePayload>) -> Response {
    match workbench_from_payload(payload) {
        Ok(workbench) => json_response(StatusCode::OK, build_compare_response(&workbench)),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    tracing::debug!(status = status.as_u16(), error = msg, "request rejected");
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

fn default_parameters() -> ScenarioParameters {
    default_scenarios()[0].1
}

fn parameters_from_payload(payload: &ScenarioPayload) -> ScenarioParameters {
    let mut params = default_parameters();
    if let Some(v) = payload.principal {
        params.principal = v;
    }
    if let Some(v) = payload.rate {
        params.annual_rate_percent = v;
    }
    if let Some(v) = payload.years {
        params.horizon_years = v;
    }
    if let Some(v) = payload.frequency {
        params.compounding_frequency = v;
    }
    if let Some(v) = payload.monthly_contribution {
        params.recurring_contribution = v;
    }
    params
}

fn projection_from_payload(payload: ScenarioPayload) -> Result<Projection, String> {
    let params = parameters_from_payload(&payload);
    let projection = try_project(&params).map_err(|e| e.to_string())?;
    tracing::debug!(
        horizon_years = params.horizon_years,
        final_balance = projection.summary.final_balance,
        "projection served"
    );
    Ok(projection)
}

fn workbench_from_payload(payload: ComparePayload) -> Result<Workbench, String> {
    if payload.scenarios.is_empty() {
        return Err("at least one scenario is required".to_string());
    }

    let mut seen = BTreeSet::new();
    let mut workbench = Workbench::new();
    for (index, scenario) in payload.scenarios.iter().enumerate() {
        let id = ScenarioId(scenario.id.unwrap_or(index as u32 + 1));
        if id.0 == 0 {
            return Err("scenario ids must be >= 1".to_string());
        }
        if !seen.insert(id) {
            return Err(format!("duplicate scenario id {id}"));
        }
        workbench
            .set_scenario(id, parameters_from_payload(scenario))
            .map_err(|e| e.to_string())?;
    }
    tracing::debug!(scenarios = workbench.len(), "comparison built");
    Ok(workbench)
}

fn build_compare_response(workbench: &Workbench) -> CompareResponse {
    let comparison = workbench.comparison();
    CompareResponse {
        results: comparison
            .results
            .into_iter()
            .map(|(id, summary)| ScenarioSummary { id, summary })
            .collect(),
        rows: comparison.rows,
    }
}

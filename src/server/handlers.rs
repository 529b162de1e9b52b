// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::extract::{ApiPath, ApiQuery, Payload};
use super::routes::AppState;
use crate::analytics::{self, DashboardSummary, Predictions};
use crate::error::{ApiError, Result};
use crate::integrations::{self, IntegrationStatus};
use crate::metrics;
use crate::models::{
    parse_id, AddPointsRequest, ApiResponse, CreateProjectRequest, HealthResponse, HealthStatus,
    ProjectQuery, SensorQuery, SubmitReadingRequest,
};
use crate::store::{LoyaltyAccount, Project, SensorReading, User};
use axum::extract::{OriginalUri, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use tracing::info;

type ApiResult<T> = Result<Json<ApiResponse<T>>>;

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        timestamp: now_iso(),
        uptime: state.uptime_seconds(),
        environment: state.config.environment.to_string(),
    })
}

pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}

pub async fn dashboard_handler(State(state): State<AppState>) -> Json<ApiResponse<DashboardSummary>> {
    Json(ApiResponse::ok(state.store.dashboard(Utc::now())))
}

pub async fn list_projects_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProjectQuery>,
) -> Json<ApiResponse<Vec<Project>>> {
    let projects = state.store.projects(&query.into());
    Json(ApiResponse::list(projects))
}

pub async fn get_project_handler(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Project> {
    let id = parse_id(&id, "id")?;
    let project = state
        .store
        .project(id)
        .ok_or_else(|| ApiError::NotFound("Project not found".to_string()))?;
    Ok(Json(ApiResponse::ok(project)))
}

pub async fn create_project_handler(
    State(state): State<AppState>,
    Payload(request): Payload<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Project>>)> {
    let project = state.store.create_project(request.validate()?);
    info!("Project {} created: {} ({})", project.id, project.name, project.sector);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(project))))
}

/// Readings with simulated live noise. The stored values are left untouched.
pub async fn list_sensors_handler(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SensorQuery>,
) -> Json<ApiResponse<Vec<SensorReading>>> {
    let now = Utc::now();
    let readings = state
        .store
        .readings(query.sensor_type())
        .into_iter()
        .map(|reading| SensorReading {
            value: reading.value + state.jitter.offset(),
            timestamp: now,
            ..reading
        })
        .collect();
    Json(ApiResponse::list(readings))
}

pub async fn submit_reading_handler(
    State(state): State<AppState>,
    Payload(request): Payload<SubmitReadingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SensorReading>>)> {
    let reading = state.store.record_reading(request.validate()?);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(reading))))
}

pub async fn get_loyalty_handler(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> ApiResult<LoyaltyAccount> {
    let user_id = parse_id(&user_id, "userId")?;
    let account = state
        .store
        .loyalty(user_id)
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(Json(ApiResponse::ok(account)))
}

pub async fn add_points_handler(
    State(state): State<AppState>,
    Payload(request): Payload<AddPointsRequest>,
) -> ApiResult<LoyaltyAccount> {
    let award = request.validate()?;
    let message = format!("Added {} points for {}", award.points, award.activity);
    let account = state.store.add_points(award);
    Ok(Json(ApiResponse::ok(account).with_message(Some(message))))
}

pub async fn predictions_handler() -> Json<ApiResponse<Predictions>> {
    Json(ApiResponse::ok(analytics::predictions()).with_generated_at(now_iso()))
}

pub async fn list_users_handler(State(state): State<AppState>) -> Json<ApiResponse<Vec<User>>> {
    Json(ApiResponse::list(state.store.users()))
}

pub async fn integrations_handler() -> Json<ApiResponse<Vec<IntegrationStatus>>> {
    Json(ApiResponse::ok(integrations::statuses(Utc::now())))
}

pub async fn not_found_handler(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::failure("Route not found").with_path(uri.path())),
    )
}

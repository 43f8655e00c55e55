use crate::infra::AppState;
use crate::openapi::{openapi_endpoint, OPENAPI_PATH};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use job_tracker::applications::{
    job_application_router, Clock, JobApplicationRepository, JobApplicationService,
};
use job_tracker::config::PaginationConfig;
use serde_json::json;
use std::sync::Arc;

/// CRUD routes plus the operational endpoints. The OpenAPI document is served at the
/// root and at [`OPENAPI_PATH`].
pub(crate) fn with_application_routes<R, C>(
    service: Arc<JobApplicationService<R, C>>,
    pagination: PaginationConfig,
) -> axum::Router
where
    R: JobApplicationRepository + 'static,
    C: Clock + 'static,
{
    job_application_router(service, pagination)
        .route("/", axum::routing::get(move || openapi_endpoint(pagination)))
        .route(
            OPENAPI_PATH,
            axum::routing::get(move || openapi_endpoint(pagination)),
        )
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

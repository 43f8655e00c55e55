use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::clock::Clock;
use super::domain::{JobApplication, JobApplicationId, NewJobApplication, PaginatedResult};
use super::repository::JobApplicationRepository;
use super::service::JobApplicationService;
use super::validation::{JobApplicationPayload, JobApplicationValidator};
use crate::config::PaginationConfig;
use crate::error::AppError;

pub const COLLECTION_PATH: &str = "/jobapplications";

/// Shared handler state: the service plus the request-side policies applied before it.
pub struct JobApplicationApi<R, C> {
    service: Arc<JobApplicationService<R, C>>,
    validator: JobApplicationValidator,
    pagination: PaginationConfig,
}

impl<R, C> Clone for JobApplicationApi<R, C> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            validator: self.validator,
            pagination: self.pagination,
        }
    }
}

impl<R, C> JobApplicationApi<R, C>
where
    R: JobApplicationRepository + 'static,
    C: Clock + 'static,
{
    pub fn new(service: Arc<JobApplicationService<R, C>>, pagination: PaginationConfig) -> Self {
        Self {
            service,
            validator: JobApplicationValidator::new(),
            pagination,
        }
    }

    fn draft(&self, payload: JobApplicationPayload) -> Result<NewJobApplication, AppError> {
        let today = self.service.clock().local_today();
        Ok(self.validator.into_draft(payload, today)?)
    }
}

/// Query string accepted by the list endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

/// Router builder exposing the CRUD endpoints.
pub fn job_application_router<R, C>(
    service: Arc<JobApplicationService<R, C>>,
    pagination: PaginationConfig,
) -> Router
where
    R: JobApplicationRepository + 'static,
    C: Clock + 'static,
{
    Router::new()
        .route(
            COLLECTION_PATH,
            get(list_handler::<R, C>).post(create_handler::<R, C>),
        )
        .route(
            "/jobapplications/:id",
            get(get_handler::<R, C>)
                .put(update_handler::<R, C>)
                .delete(delete_handler::<R, C>),
        )
        .with_state(JobApplicationApi::new(service, pagination))
}

pub fn location_for(id: JobApplicationId) -> String {
    format!("{COLLECTION_PATH}/{id}")
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<JobApplicationId, AppError> {
    let Path(id) = path.map_err(|rejection| AppError::InvalidArgument(rejection.body_text()))?;
    Ok(JobApplicationId(id))
}

fn body(
    payload: Result<Json<JobApplicationPayload>, JsonRejection>,
) -> Result<JobApplicationPayload, AppError> {
    let Json(payload) =
        payload.map_err(|rejection| AppError::InvalidArgument(rejection.body_text()))?;
    Ok(payload)
}

pub(crate) async fn list_handler<R, C>(
    State(api): State<JobApplicationApi<R, C>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PaginatedResult<JobApplication>>, AppError>
where
    R: JobApplicationRepository + 'static,
    C: Clock + 'static,
{
    let Query(query) =
        query.map_err(|rejection| AppError::InvalidArgument(rejection.body_text()))?;
    let (page_number, page_size) = api.pagination.resolve(query.page_number, query.page_size);
    let page = api.service.list_page(page_number, page_size)?;
    Ok(Json(page))
}

pub(crate) async fn get_handler<R, C>(
    State(api): State<JobApplicationApi<R, C>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<JobApplication>, AppError>
where
    R: JobApplicationRepository + 'static,
    C: Clock + 'static,
{
    let id = path_id(path)?;
    let application = api.service.get(id)?;
    Ok(Json(application))
}

pub(crate) async fn create_handler<R, C>(
    State(api): State<JobApplicationApi<R, C>>,
    payload: Result<Json<JobApplicationPayload>, JsonRejection>,
) -> Result<Response, AppError>
where
    R: JobApplicationRepository + 'static,
    C: Clock + 'static,
{
    let draft = api.draft(body(payload)?)?;
    let created = api.service.create(draft)?;
    let location = location_for(created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    )
        .into_response())
}

pub(crate) async fn update_handler<R, C>(
    State(api): State<JobApplicationApi<R, C>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<JobApplicationPayload>, JsonRejection>,
) -> Result<Response, AppError>
where
    R: JobApplicationRepository + 'static,
    C: Clock + 'static,
{
    let id = path_id(path)?;
    let payload = body(payload)?;
    let body_id = payload.id;
    let draft = api.draft(payload)?;

    if body_id != Some(id.0) {
        return Err(AppError::InvalidArgument("ID mismatch.".to_string()));
    }

    match api.service.update(id, draft)? {
        Some(updated) => Ok((StatusCode::OK, Json(updated)).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

pub(crate) async fn delete_handler<R, C>(
    State(api): State<JobApplicationApi<R, C>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError>
where
    R: JobApplicationRepository + 'static,
    C: Clock + 'static,
{
    let id = path_id(path)?;
    if api.service.delete(id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

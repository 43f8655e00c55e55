use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use chrono::{Days, NaiveDate};
use serde_json::Value;

use crate::applications::clock::FixedClock;
use crate::applications::domain::{
    ApplicationStatus, JobApplication, JobApplicationId, NewJobApplication, PaginatedResult,
};
use crate::applications::repository::{
    InMemoryJobApplicationRepository, JobApplicationRepository, RepositoryError,
};
use crate::applications::service::JobApplicationService;
use crate::applications::validation::JobApplicationPayload;
use crate::applications::{job_application_router, JobApplicationApi};
use crate::config::PaginationConfig;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 15).expect("valid date")
}

pub(super) fn days_ago(days: u64) -> NaiveDate {
    today()
        .checked_sub_days(Days::new(days))
        .expect("valid date")
}

pub(super) fn tomorrow() -> NaiveDate {
    today().checked_add_days(Days::new(1)).expect("valid date")
}

pub(super) fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(today()))
}

pub(super) fn draft() -> NewJobApplication {
    NewJobApplication {
        company_name: "Globex".to_string(),
        position: "Backend Engineer".to_string(),
        status: ApplicationStatus::Applied,
        date_applied: days_ago(3),
    }
}

pub(super) fn payload() -> JobApplicationPayload {
    JobApplicationPayload {
        id: None,
        company_name: Some("Globex".to_string()),
        position: Some("Backend Engineer".to_string()),
        status: Some("Interviewing".into()),
        date_applied: Some(days_ago(3).format("%Y-%m-%d").to_string()),
    }
}

pub(super) type TestService = JobApplicationService<CountingRepository, FixedClock>;

pub(super) fn build_service() -> (TestService, Arc<CountingRepository>) {
    let repository = Arc::new(CountingRepository::default());
    let service = JobApplicationService::new(repository.clone(), clock());
    (service, repository)
}

pub(super) fn api(service: TestService) -> JobApplicationApi<CountingRepository, FixedClock> {
    JobApplicationApi::new(Arc::new(service), PaginationConfig::default())
}

pub(super) fn router(service: TestService) -> axum::Router {
    job_application_router(Arc::new(service), PaginationConfig::default())
}

/// Seed `count` applications, one per day going back from yesterday.
pub(super) fn seed(repository: &CountingRepository, count: u64) -> Vec<JobApplication> {
    (1..=count)
        .map(|offset| {
            repository
                .inner
                .insert(NewJobApplication {
                    company_name: format!("Company {offset}"),
                    position: "Engineer".to_string(),
                    status: ApplicationStatus::Applied,
                    date_applied: days_ago(offset),
                })
                .expect("seed insert")
        })
        .collect()
}

/// In-memory repository that counts lookups and mutations.
#[derive(Default)]
pub(super) struct CountingRepository {
    pub(super) inner: InMemoryJobApplicationRepository,
    fetches: AtomicUsize,
    mutations: AtomicUsize,
    pages: AtomicUsize,
}

impl CountingRepository {
    pub(super) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub(super) fn mutations(&self) -> usize {
        self.mutations.load(Ordering::SeqCst)
    }

    pub(super) fn pages(&self) -> usize {
        self.pages.load(Ordering::SeqCst)
    }
}

impl JobApplicationRepository for CountingRepository {
    fn page(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<PaginatedResult<JobApplication>, RepositoryError> {
        self.pages.fetch_add(1, Ordering::SeqCst);
        self.inner.page(page_number, page_size)
    }

    fn fetch(&self, id: JobApplicationId) -> Result<Option<JobApplication>, RepositoryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(id)
    }

    fn insert(&self, draft: NewJobApplication) -> Result<JobApplication, RepositoryError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(draft)
    }

    fn update(&self, application: JobApplication) -> Result<(), RepositoryError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.inner.update(application)
    }

    fn delete(&self, id: JobApplicationId) -> Result<(), RepositoryError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id)
    }
}

/// Removes the target record right before every write, as a concurrent delete would.
#[derive(Default)]
pub(super) struct DeletedBeforeWriteRepository {
    pub(super) inner: InMemoryJobApplicationRepository,
}

impl JobApplicationRepository for DeletedBeforeWriteRepository {
    fn page(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<PaginatedResult<JobApplication>, RepositoryError> {
        self.inner.page(page_number, page_size)
    }

    fn fetch(&self, id: JobApplicationId) -> Result<Option<JobApplication>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn insert(&self, draft: NewJobApplication) -> Result<JobApplication, RepositoryError> {
        self.inner.insert(draft)
    }

    fn update(&self, application: JobApplication) -> Result<(), RepositoryError> {
        self.inner.delete(application.id)?;
        self.inner.update(application)
    }

    fn delete(&self, id: JobApplicationId) -> Result<(), RepositoryError> {
        self.inner.delete(id)
    }
}

pub(super) struct UnavailableRepository;

impl JobApplicationRepository for UnavailableRepository {
    fn page(
        &self,
        _page_number: u32,
        _page_size: u32,
    ) -> Result<PaginatedResult<JobApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: JobApplicationId) -> Result<Option<JobApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _draft: NewJobApplication) -> Result<JobApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _application: JobApplication) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: JobApplicationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_body_len(response: Response) -> usize {
    axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body")
        .len()
}

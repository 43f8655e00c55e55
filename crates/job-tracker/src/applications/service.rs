use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::clock::Clock;
use super::domain::{JobApplication, JobApplicationId, NewJobApplication, PaginatedResult};
use super::repository::{JobApplicationRepository, RepositoryError};

const FUTURE_DATE_MESSAGE: &str = "DateApplied cannot be in the future";

/// Service enforcing the business rules around the job application repository.
pub struct JobApplicationService<R, C> {
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> JobApplicationService<R, C>
where
    R: JobApplicationRepository + 'static,
    C: Clock + 'static,
{
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Fetch one page, newest applications first. Page values reach the repository as given.
    pub fn list_page(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<PaginatedResult<JobApplication>, ApplicationServiceError> {
        let page = self.repository.page(page_number, page_size)?;
        debug!(
            page_number,
            page_size,
            total_count = page.total_count,
            returned = page.data.len(),
            "listed job applications"
        );
        Ok(page)
    }

    /// Fetch a single application, failing when the id is unknown.
    pub fn get(&self, id: JobApplicationId) -> Result<JobApplication, ApplicationServiceError> {
        self.repository.fetch(id)?.ok_or_else(|| {
            ApplicationServiceError::NotFound(format!("Job application with ID {id} is not found."))
        })
    }

    pub fn create(
        &self,
        draft: NewJobApplication,
    ) -> Result<JobApplication, ApplicationServiceError> {
        self.ensure_not_future(draft.date_applied)?;
        let stored = self.repository.insert(draft)?;
        info!(id = %stored.id, company = %stored.company_name, "created job application");
        Ok(stored)
    }

    /// Replace every mutable field of an existing application.
    ///
    /// Returns `Ok(None)` when the id is unknown instead of failing, unlike [`Self::get`].
    pub fn update(
        &self,
        id: JobApplicationId,
        draft: NewJobApplication,
    ) -> Result<Option<JobApplication>, ApplicationServiceError> {
        let Some(mut existing) = self.repository.fetch(id)? else {
            debug!(%id, "update skipped; job application not found");
            return Ok(None);
        };

        self.ensure_not_future(draft.date_applied)?;
        existing.apply(draft);
        match self.repository.update(existing.clone()) {
            Ok(()) => {}
            Err(RepositoryError::NotFound) => {
                debug!(%id, "update skipped; job application removed before write");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        }
        info!(%id, status = %existing.status, "updated job application");
        Ok(Some(existing))
    }

    /// Remove an application. Returns `false` when there was nothing to remove.
    pub fn delete(&self, id: JobApplicationId) -> Result<bool, ApplicationServiceError> {
        if self.repository.fetch(id)?.is_none() {
            debug!(%id, "delete skipped; job application not found");
            return Ok(false);
        }

        self.repository.delete(id)?;
        info!(%id, "deleted job application");
        Ok(true)
    }

    fn ensure_not_future(&self, date_applied: NaiveDate) -> Result<(), ApplicationServiceError> {
        if date_applied > self.clock.utc_today() {
            return Err(ApplicationServiceError::InvalidArgument(
                FUTURE_DATE_MESSAGE.to_string(),
            ));
        }
        Ok(())
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::domain::{JobApplication, JobApplicationId, NewJobApplication, PaginatedResult};

/// Storage abstraction so the service module can be exercised in isolation.
pub trait JobApplicationRepository: Send + Sync {
    /// Return one page ordered by `date_applied`, newest first.
    fn page(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<PaginatedResult<JobApplication>, RepositoryError>;
    fn fetch(&self, id: JobApplicationId) -> Result<Option<JobApplication>, RepositoryError>;
    /// Persist a draft, assigning its id.
    fn insert(&self, draft: NewJobApplication) -> Result<JobApplication, RepositoryError>;
    fn update(&self, application: JobApplication) -> Result<(), RepositoryError>;
    fn delete(&self, id: JobApplicationId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    records: BTreeMap<JobApplicationId, JobApplication>,
}

/// Process-local repository used by the server and the demo command.
#[derive(Debug, Default)]
pub struct InMemoryJobApplicationRepository {
    store: Mutex<Store>,
}

impl InMemoryJobApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, RepositoryError> {
        self.store
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.records.is_empty())
    }
}

impl JobApplicationRepository for InMemoryJobApplicationRepository {
    fn page(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<PaginatedResult<JobApplication>, RepositoryError> {
        let guard = self.lock()?;
        let total_count = guard.records.len() as u64;

        let mut ordered: Vec<&JobApplication> = guard.records.values().collect();
        // Ties on date keep insertion order.
        ordered.sort_by_key(|application| (Reverse(application.date_applied), application.id));

        let skip = (page_number.max(1) as usize - 1).saturating_mul(page_size as usize);
        let data = ordered
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .cloned()
            .collect();

        Ok(PaginatedResult::new(data, page_number, page_size, total_count))
    }

    fn fetch(&self, id: JobApplicationId) -> Result<Option<JobApplication>, RepositoryError> {
        Ok(self.lock()?.records.get(&id).cloned())
    }

    fn insert(&self, draft: NewJobApplication) -> Result<JobApplication, RepositoryError> {
        let mut guard = self.lock()?;
        guard.last_id += 1;
        let id = JobApplicationId(guard.last_id);
        let application = JobApplication::from_draft(id, draft);
        guard.records.insert(id, application.clone());
        Ok(application)
    }

    fn update(&self, application: JobApplication) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        match guard.records.get_mut(&application.id) {
            Some(slot) => {
                *slot = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: JobApplicationId) -> Result<(), RepositoryError> {
        self.lock()?.records.remove(&id);
        Ok(())
    }
}

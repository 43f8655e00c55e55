//! Job application records: field validation, storage, the service enforcing the
//! business rules, and the HTTP routes in front of it.

pub mod clock;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::{
    ApplicationStatus, JobApplication, JobApplicationId, NewJobApplication, PaginatedResult,
    UnknownStatus,
};
pub use repository::{InMemoryJobApplicationRepository, JobApplicationRepository, RepositoryError};
pub use router::{job_application_router, JobApplicationApi, PageQuery};
pub use service::{ApplicationServiceError, JobApplicationService};
pub use validation::{
    FieldError, JobApplicationPayload, JobApplicationValidator, StatusInput, ValidationErrors,
};

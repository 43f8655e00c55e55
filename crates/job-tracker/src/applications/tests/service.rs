use super::common::*;
use crate::applications::clock::FixedClock;
use crate::applications::domain::{ApplicationStatus, JobApplicationId, NewJobApplication};
use crate::applications::repository::{JobApplicationRepository, RepositoryError};
use crate::applications::service::{ApplicationServiceError, JobApplicationService};
use std::sync::Arc;

#[test]
fn list_page_passes_values_through_to_repository() {
    let (service, repository) = build_service();
    seed(&repository, 25);

    let page = service.list_page(2, 10).expect("page loads");

    assert_eq!(repository.pages(), 1);
    assert_eq!(page.page_number, 2);
    assert_eq!(page.page_size, 10);
    assert_eq!(page.total_count, 25);
    assert_eq!(page.total_pages, 3);
    let companies: Vec<String> = page.data.iter().map(|a| a.company_name.clone()).collect();
    let expected: Vec<String> = (11..=20).map(|n| format!("Company {n}")).collect();
    assert_eq!(companies, expected);
}

#[test]
fn list_page_tolerates_zero_page_size() {
    let (service, repository) = build_service();
    seed(&repository, 3);

    let page = service.list_page(1, 0).expect("page loads");

    assert!(page.data.is_empty());
    assert_eq!(page.page_size, 0);
    assert_eq!(page.total_count, 3);
    assert_eq!(page.total_pages, 0);
}

#[test]
fn list_page_treats_page_zero_as_first() {
    let (service, repository) = build_service();
    seed(&repository, 3);

    let page = service.list_page(0, 2).expect("page loads");

    assert_eq!(page.page_number, 0);
    assert_eq!(page.total_pages, 2);
    let companies: Vec<&str> = page.data.iter().map(|a| a.company_name.as_str()).collect();
    assert_eq!(companies, vec!["Company 1", "Company 2"]);
}

#[test]
fn list_page_orders_newest_first() {
    let (service, repository) = build_service();
    seed(&repository, 5);

    let page = service.list_page(1, 10).expect("page loads");

    let dates: Vec<_> = page.data.iter().map(|a| a.date_applied).collect();
    let mut sorted = dates.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(dates, sorted);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn create_then_get_returns_equal_entity() {
    let (service, repository) = build_service();

    let created = service.create(draft()).expect("create succeeds");
    let fetched = service.get(created.id).expect("created record is present");

    assert_eq!(fetched, created);
    assert_eq!(fetched.company_name, draft().company_name);
    assert_eq!(fetched.position, draft().position);
    assert_eq!(fetched.status, draft().status);
    assert_eq!(fetched.date_applied, draft().date_applied);
    assert_eq!(repository.mutations(), 1);
}

#[test]
fn create_assigns_increasing_ids() {
    let (service, _) = build_service();

    let first = service.create(draft()).expect("first");
    let second = service.create(draft()).expect("second");

    assert_eq!(first.id, JobApplicationId(1));
    assert_eq!(second.id, JobApplicationId(2));
}

#[test]
fn create_accepts_today() {
    let (service, _) = build_service();
    let mut draft = draft();
    draft.date_applied = today();

    assert!(service.create(draft).is_ok());
}

#[test]
fn create_rejects_future_date_without_persisting() {
    let (service, repository) = build_service();
    let draft = NewJobApplication {
        company_name: "A".to_string(),
        position: "Dev".to_string(),
        status: ApplicationStatus::Applied,
        date_applied: tomorrow(),
    };

    match service.create(draft) {
        Err(ApplicationServiceError::InvalidArgument(message)) => {
            assert_eq!(message, "DateApplied cannot be in the future");
        }
        other => panic!("expected invalid argument, got {other:?}"),
    }
    assert_eq!(repository.mutations(), 0);
    assert!(repository.inner.is_empty().expect("repository readable"));
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service();

    match service.get(JobApplicationId(42)) {
        Err(ApplicationServiceError::NotFound(message)) => {
            assert_eq!(message, "Job application with ID 42 is not found.");
        }
        other => panic!("expected not found error, got {other:?}"),
    }
}

#[test]
fn update_overwrites_fields_and_keeps_id() {
    let (service, repository) = build_service();
    let created = service.create(draft()).expect("create succeeds");
    let mutations_before = repository.mutations();
    let fetches_before = repository.fetches();

    let replacement = NewJobApplication {
        company_name: "Initech".to_string(),
        position: "Staff Engineer".to_string(),
        status: ApplicationStatus::Offered,
        date_applied: days_ago(1),
    };
    let updated = service
        .update(created.id, replacement.clone())
        .expect("update succeeds")
        .expect("record exists");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.company_name, replacement.company_name);
    assert_eq!(updated.position, replacement.position);
    assert_eq!(updated.status, ApplicationStatus::Offered);
    assert_eq!(updated.date_applied, replacement.date_applied);
    assert_eq!(repository.fetches() - fetches_before, 1);
    assert_eq!(repository.mutations() - mutations_before, 1);

    let stored = repository
        .inner
        .fetch(created.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, updated);
}

#[test]
fn update_returns_none_for_missing_id_while_get_fails() {
    let (service, repository) = build_service();
    let missing = JobApplicationId(99);

    let result = service
        .update(missing, draft())
        .expect("soft miss is not an error");
    assert!(result.is_none());
    assert_eq!(repository.mutations(), 0);

    assert!(matches!(
        service.get(missing),
        Err(ApplicationServiceError::NotFound(_))
    ));
}

#[test]
fn update_treats_record_removed_before_write_as_soft_miss() {
    let repository = Arc::new(DeletedBeforeWriteRepository::default());
    let service = JobApplicationService::new(repository.clone(), clock());
    let created = service.create(draft()).expect("create succeeds");

    let result = service
        .update(created.id, draft())
        .expect("concurrent delete is not an error");

    assert!(result.is_none());
    assert!(repository.inner.is_empty().expect("repository readable"));
}

#[test]
fn update_rejects_future_date_without_persisting() {
    let (service, repository) = build_service();
    let created = service.create(draft()).expect("create succeeds");
    let mutations_before = repository.mutations();

    let mut replacement = draft();
    replacement.company_name = "New Company".to_string();
    replacement.date_applied = tomorrow();

    assert!(matches!(
        service.update(created.id, replacement),
        Err(ApplicationServiceError::InvalidArgument(_))
    ));
    assert_eq!(repository.mutations(), mutations_before);
    let stored = service.get(created.id).expect("still present");
    assert_eq!(stored.company_name, "Globex");
}

#[test]
fn delete_returns_true_then_false() {
    let (service, repository) = build_service();
    let created = service.create(draft()).expect("create succeeds");

    assert!(service.delete(created.id).expect("first delete"));
    assert!(!service.delete(created.id).expect("second delete"));

    assert_eq!(repository.fetches(), 2);
    // One insert plus one delete.
    assert_eq!(repository.mutations(), 2);
}

#[test]
fn future_rule_uses_injected_clock() {
    let repository = Arc::new(CountingRepository::default());
    let service =
        JobApplicationService::new(repository.clone(), Arc::new(FixedClock(days_ago(10))));
    let mut draft = draft();
    draft.date_applied = days_ago(5);

    assert!(matches!(
        service.create(draft),
        Err(ApplicationServiceError::InvalidArgument(_))
    ));
    assert_eq!(repository.mutations(), 0);
}

#[test]
fn repository_failures_surface_as_repository_errors() {
    let service = JobApplicationService::new(Arc::new(UnavailableRepository), clock());

    assert!(matches!(
        service.list_page(1, 10),
        Err(ApplicationServiceError::Repository(
            RepositoryError::Unavailable(_)
        ))
    ));
    assert!(matches!(
        service.delete(JobApplicationId(1)),
        Err(ApplicationServiceError::Repository(_))
    ));
}

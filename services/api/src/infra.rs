use chrono::{Days, NaiveDate};
use job_tracker::applications::{
    ApplicationServiceError, ApplicationStatus, Clock, JobApplicationRepository,
    JobApplicationService, NewJobApplication,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

const SAMPLE_COMPANIES: [&str; 8] = [
    "Globex",
    "Initech",
    "Umbrella",
    "Hooli",
    "Stark Industries",
    "Wayne Enterprises",
    "Soylent",
    "Vandelay Industries",
];

const SAMPLE_POSITIONS: [&str; 5] = [
    "Backend Engineer",
    "Platform Engineer",
    "Site Reliability Engineer",
    "Data Engineer",
    "Engineering Manager",
];

/// Deterministic sample applications, dated one per day counting back from `today`.
pub(crate) fn sample_applications(count: u32, today: NaiveDate) -> Vec<NewJobApplication> {
    (0..count)
        .map(|index| {
            let slot = index as usize;
            let date_applied = today
                .checked_sub_days(Days::new(u64::from(index)))
                .unwrap_or(today);
            NewJobApplication {
                company_name: SAMPLE_COMPANIES[slot % SAMPLE_COMPANIES.len()].to_string(),
                position: SAMPLE_POSITIONS[slot % SAMPLE_POSITIONS.len()].to_string(),
                status: ApplicationStatus::ALL[slot % ApplicationStatus::ALL.len()],
                date_applied,
            }
        })
        .collect()
}

/// Store `count` sample applications through the service so the usual rules apply.
pub(crate) fn seed_applications<R, C>(
    service: &JobApplicationService<R, C>,
    count: u32,
) -> Result<usize, ApplicationServiceError>
where
    R: JobApplicationRepository + 'static,
    C: Clock + 'static,
{
    let today = service.clock().utc_today();
    let mut stored = 0;
    for draft in sample_applications(count, today) {
        service.create(draft)?;
        stored += 1;
    }
    Ok(stored)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

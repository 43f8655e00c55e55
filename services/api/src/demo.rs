use crate::infra::seed_applications;
use chrono::{Local, NaiveDate};
use clap::Args;
use job_tracker::applications::{
    FixedClock, InMemoryJobApplicationRepository, JobApplication, JobApplicationService,
    PaginatedResult,
};
use job_tracker::config::PaginationConfig;
use job_tracker::error::AppError;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Number of sample applications to create
    #[arg(long, default_value_t = 25)]
    pub(crate) count: u32,
    /// Page to print (1-based)
    #[arg(long, default_value_t = 1)]
    pub(crate) page: i64,
    /// Applications per page
    #[arg(long, default_value_t = 10)]
    pub(crate) page_size: i64,
    /// Treat this date (YYYY-MM-DD) as today. Defaults to the local date.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the page as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        count,
        page,
        page_size,
        today,
        json,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let service = JobApplicationService::new(
        Arc::new(InMemoryJobApplicationRepository::new()),
        Arc::new(FixedClock(today)),
    );
    seed_applications(&service, count)?;

    let (page_number, page_size) = PaginationConfig::default().resolve(Some(page), Some(page_size));
    let result = service.list_page(page_number, page_size)?;

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(rendered) => println!("{rendered}"),
            Err(err) => println!("Page unavailable as JSON: {err}"),
        }
    } else {
        render_page(&result);
    }
    Ok(())
}

fn render_page(page: &PaginatedResult<JobApplication>) {
    println!(
        "Job applications: page {} of {} ({} total, {} per page)",
        page.page_number, page.total_pages, page.total_count, page.page_size
    );

    if page.data.is_empty() {
        println!("  (no applications on this page)");
        return;
    }

    println!(
        "  {:>4}  {:<10}  {:<12}  {:<22}  {}",
        "ID", "Applied", "Status", "Company", "Position"
    );
    for application in &page.data {
        println!(
            "  {:>4}  {:<10}  {:<12}  {:<22}  {}",
            application.id.0,
            application.date_applied.to_string(),
            application.status,
            application.company_name,
            application.position
        );
    }
}

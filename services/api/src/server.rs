use crate::cli::ServeArgs;
use crate::infra::{seed_applications, AppState};
use crate::routes::with_application_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_tracker::applications::{
    InMemoryJobApplicationRepository, JobApplicationService, SystemClock,
};
use job_tracker::config::AppConfig;
use job_tracker::error::AppError;
use job_tracker::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryJobApplicationRepository::new());
    let service = Arc::new(JobApplicationService::new(
        repository,
        Arc::new(SystemClock),
    ));

    if args.seed > 0 {
        let stored = seed_applications(&service, args.seed)?;
        info!(stored, "seeded sample job applications");
    }

    let app = with_application_routes(service, config.pagination)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_page_size = config.pagination.default_page_size,
        max_page_size = config.pagination.max_page_size,
        "job application tracker ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

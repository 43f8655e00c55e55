mod cli;
mod demo;
mod infra;
mod openapi;
mod routes;
mod server;

use job_tracker::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

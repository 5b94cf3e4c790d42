mod cli;
mod infra;
mod routes;
mod server;

use venue_ops::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

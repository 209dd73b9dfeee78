mod config;
mod core;
mod routes;

use telemetry::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("cars-service");

    core::start_service().await
}

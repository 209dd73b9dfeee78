use actix_web::{App, HttpServer, web};
use anyhow::Context;
use carsdb::concurrency::shutdown::create_shutdown_channel;
use carsdb::query::QueryEngine;
use carsdb::refresh::{HttpDatasetSource, ProcessLease, RefreshCoordinator, RefreshWorker};
use carsdb::store::SnapshotStore;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

use crate::config::load_service_config;
use crate::routes::{brands, fetch_cars, list_cars};

/// Wires the refresh worker and the HTTP query surface and runs until a
/// termination signal arrives.
pub async fn start_service() -> anyhow::Result<()> {
    let config = load_service_config()?;
    info!(
        "starting cars dictionary service on {}:{}",
        config.api.host, config.api.port
    );

    // The store is the single handover point between the refresh worker and
    // the query engines running inside the HTTP workers.
    let store = SnapshotStore::new();
    let engine = QueryEngine::new(store.subscribe());

    let (shutdown_tx, shutdown_rx) = create_shutdown_channel();
    let coordinator = RefreshCoordinator::new(
        config.dataset.clone(),
        config.refresh.clone(),
        ProcessLease::new(),
        HttpDatasetSource::new(config.dataset.url.clone()),
        store,
    );
    let worker_handle = RefreshWorker::new(coordinator, shutdown_rx).start();

    let engine_data = web::Data::new(engine);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(engine_data.clone())
            .service(brands)
            .service(fetch_cars)
            .service(list_cars)
    })
    .bind((config.api.host.clone(), config.api.port))
    .with_context(|| format!("failed to bind {}:{}", config.api.host, config.api.port))?
    .run();

    // The server future resolves once actix has handled a termination signal.
    server.await?;

    info!("api server stopped, shutting down the refresh worker");
    if shutdown_tx.shutdown().is_err() {
        warn!("refresh worker was already gone at shutdown");
    }
    worker_handle.wait().await?;

    Ok(())
}

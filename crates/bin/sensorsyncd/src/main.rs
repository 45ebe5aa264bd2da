//! # sensorsyncd — sensorsync daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Initialise the `SQLite` connection pool, run migrations and provision
//!   the readings container
//! - Construct the ingest service, injecting the document store
//! - Build the axum router, injecting the service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use sensorsync_adapter_http_axum::state::AppState;
use sensorsync_adapter_storage_sqlite_sqlx::{Config as StoreConfig, ContainerSpec};
use sensorsync_app::services::ingest_service::IngestService;
use sensorsync_domain::document::PARTITION_KEY_PATH;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Store
    let db = StoreConfig {
        database_url: config.store.url.clone(),
    }
    .build()
    .await?;
    let store = db
        .provision(&ContainerSpec {
            database: config.store.database.clone(),
            container: config.store.container.clone(),
            partition_key_path: PARTITION_KEY_PATH.to_string(),
        })
        .await?;

    // Services
    let ingest_service = IngestService::new(store).with_max_attempts(config.ingest.max_attempts);

    // HTTP
    let app = sensorsync_adapter_http_axum::router::build_with_body_limit(
        AppState::new(ingest_service),
        config.server.max_body_bytes,
    );

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "sensorsyncd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("sensorsyncd stopped");
    Ok(())
}

/// Resolve once SIGINT (or SIGTERM on unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

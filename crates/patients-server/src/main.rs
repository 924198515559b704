//! HTTP server entry point.
//!
//! Reads the backing file location and bind address from the environment,
//! seeds an empty collection on first run, and starts the Axum server.

use std::sync::Arc;

use anyhow::Result;
use patients_server::{app, ServerState};
use patients_store::{Collection, FileStore};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let data_file = std::env::var("PATIENTS_FILE").unwrap_or_else(|_| "data/patients.json".into());
    let store = FileStore::new(&data_file);

    // First run: seed an empty document so reads don't 500 before the
    // first create.
    if !store.path().exists() {
        info!("Seeding empty patient collection at {}", data_file);
        store.save(&Collection::new())?;
    }
    info!("Serving patient records from {}", data_file);

    let state = Arc::new(ServerState::new(store));
    let app = app(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use std::net::SocketAddr;
use std::path::PathBuf;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use transit_server::catalog::{InMemoryTripStore, StopCatalog, load_dataset};
use transit_server::search::SearchConfig;
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load the catalog dataset, or start empty if none is configured.
    let (stops, trips) = match std::env::var("TRANSIT_DATA") {
        Ok(path) => {
            let path = PathBuf::from(path);
            match load_dataset(&path) {
                Ok((stops, trips)) => {
                    tracing::info!(path = %path.display(), stops = stops.len(), "loaded dataset");
                    (stops, trips)
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "failed to load dataset");
                    std::process::exit(1);
                }
            }
        }
        Err(_) => {
            tracing::warn!("TRANSIT_DATA not set, serving an empty catalog");
            (StopCatalog::new(vec![]), InMemoryTripStore::new(vec![]))
        }
    };

    let state = AppState::new(stops, trips, SearchConfig::default());
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    tracing::info!("transit search server listening on http://{addr}");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}

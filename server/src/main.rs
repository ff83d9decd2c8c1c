use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use todo_core::{DocumentStore, FileStore, MemoryStore, TodoManager};
use todo_server::{AppState, Config, StoreKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_server=debug,todo_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "configuration error");
            std::process::exit(1);
        }
    };
    tracing::info!(store = ?config.store, path = %config.store_path.display(), "configuration loaded");

    // The file store is kept separately so it can be closed after shutdown.
    let file_store = match config.store {
        StoreKind::Memory => None,
        StoreKind::File => match FileStore::connect(&config.store_path).await {
            Ok(store) => {
                tracing::info!(path = %store.path().display(), "document store opened");
                Some(Arc::new(store))
            }
            Err(error) => {
                tracing::error!(%error, "failed to open document store");
                std::process::exit(1);
            }
        },
    };
    let store: Arc<dyn DocumentStore> = match &file_store {
        Some(store) => store.clone(),
        None => Arc::new(MemoryStore::new()),
    };

    let addr = config.addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!(%error, "failed to bind to {addr}");
            std::process::exit(1);
        }
    };
    tracing::info!("listening on http://{addr}");

    let state = AppState::new(TodoManager::new(store));
    let served = todo_server::run(listener, state, shutdown_signal()).await;

    if let Some(store) = file_store {
        if let Err(error) = store.disconnect().await {
            tracing::error!(%error, "failed to close document store");
        }
    }
    if let Err(error) = served {
        tracing::error!(%error, "server error");
        std::process::exit(1);
    }
    tracing::info!("server shutdown complete");
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

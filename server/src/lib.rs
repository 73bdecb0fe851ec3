//! Todo Board Backend
//!
//! Layered architecture:
//! - domain: Todo entity, validation rules and error taxonomy
//! - repository: store handle and SQLite-backed repository
//! - service: the todo operations
//! - api: axum handlers

use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

pub mod api;
pub mod config;
pub mod domain;
pub mod repository;
pub mod service;

use api::AppState;
use repository::StoreHandle;
use service::TodoService;

pub use config::ServerConfig;

/// Build the full application router.
///
/// With a static directory, every path outside the API serves the compiled
/// front end, falling back to its `index.html`.
pub fn build_app(store: StoreHandle, static_dir: Option<&Path>) -> Router {
    let router = api::router(AppState::new(TodoService::new(store)));

    match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router,
    }
}

/// Bind and serve until ctrl-c
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let store = StoreHandle::new(config.store.clone());

    // Warm the connection in the background; requests retry if this fails
    let warmup = store.clone();
    tokio::spawn(async move {
        match warmup.connect().await {
            Ok(Some(_)) => tracing::info!("Store ready"),
            Ok(None) => tracing::warn!("Running without a store, requests will answer 503"),
            Err(e) => tracing::error!(error = %e, "Store warm-up failed"),
        }
    });

    let app = build_app(store, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

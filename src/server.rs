//! Static Host
//!
//! Serves the built browser app. Paths without a matching file get
//! `index.html`, so `/` and `/admin` are both resolved by the client router.
//! There is no server-side logic: all data comes from the remote endpoints.

use axum::Router;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Static host errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// The app has not been built
    #[error("No index.html in {0:?}; build the browser app first (trunk build)")]
    MissingDist(PathBuf),

    #[error("Invalid listen address {0}")]
    Address(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Router serving `dist_dir` with an `index.html` fallback
pub fn build_router(dist_dir: &Path) -> Router {
    let index = ServeFile::new(dist_dir.join("index.html"));
    let files = ServeDir::new(dist_dir).fallback(index);

    Router::new()
        .fallback_service(files)
        .layer(TraceLayer::new_for_http())
}

/// Start the static host
pub async fn serve(config: &ServerConfig) -> Result<(), ServerError> {
    let dist_dir = PathBuf::from(&config.dist_dir);
    if !dist_dir.join("index.html").is_file() {
        return Err(ServerError::MissingDist(dist_dir));
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|_| ServerError::Address(format!("{}:{}", config.host, config.port)))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Serving {:?} on http://{}", dist_dir, addr);

    axum::serve(listener, build_router(&dist_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Static host shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

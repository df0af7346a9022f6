//! Axum server setup
//!
//! - Tracing middleware
//! - Request timeout (a cancelled handler drops its request scope, which closes
//!   the connection)
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::Store;
use crate::state::AppState;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// Upper bound on a single request (default: 30s)
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(routes::items::router())
        .merge(routes::health::router())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let store = Store::open(Path::new("stockroll.db")).await?;
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(store: Store, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(AppState::new(store), config.request_timeout);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

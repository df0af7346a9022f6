//! Health endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Store reachable with foreign key enforcement on
    database: bool,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state
        .store()
        .scoped(|db| Box::pin(db.foreign_keys_enabled()))
        .await
    {
        Ok(enabled) => enabled,
        Err(e) => {
            tracing::warn!(error = %e, "health probe failed");
            false
        }
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

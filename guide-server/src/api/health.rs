//! Health check route
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /health | GET | liveness check |

use std::sync::OnceLock;
use std::time::Instant;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    /// Row store backend (`google` | `memory`)
    backend: &'static str,
    uptime_seconds: u64,
}

static START_TIME: OnceLock<Instant> = OnceLock::new();

pub(crate) fn mark_started() {
    START_TIME.get_or_init(Instant::now);
}

async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let uptime_seconds = START_TIME.get_or_init(Instant::now).elapsed().as_secs();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        backend: state.config.store_backend.as_str(),
        uptime_seconds,
    })
}

//! Caller identity API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/getCurrentUser", get(handler::current_user))
}

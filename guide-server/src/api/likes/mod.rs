//! Like API

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/getUserLikes", get(handler::user_likes))
        .route("/api/toggleLike", post(handler::toggle))
}

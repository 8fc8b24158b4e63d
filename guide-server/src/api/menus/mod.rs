//! Menu API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/getRestaurantMenus", get(handler::by_restaurant))
        .route("/api/getAllMenus", get(handler::list))
}

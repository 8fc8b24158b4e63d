//! Restaurant API
//!
//! | Path | Method |
//! |------|--------|
//! | /api/getRestaurants | GET |
//! | /api/addRestaurant | POST |
//! | /api/updateRestaurant | POST |
//! | /api/deleteRestaurant | POST |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/getRestaurants", get(handler::list))
        .route("/api/addRestaurant", post(handler::create))
        .route("/api/updateRestaurant", post(handler::update))
        .route("/api/deleteRestaurant", post(handler::delete))
}

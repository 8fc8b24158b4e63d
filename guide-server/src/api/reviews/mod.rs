//! Review API
//!
//! | Path | Method |
//! |------|--------|
//! | /api/getAllReviews | GET |
//! | /api/addReview | POST |
//! | /api/updateReview | POST |
//! | /api/deleteReview | POST |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/getAllReviews", get(handler::list))
        .route("/api/addReview", post(handler::create))
        .route("/api/updateReview", post(handler::update))
        .route("/api/deleteReview", post(handler::delete))
}

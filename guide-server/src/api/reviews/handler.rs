//! Review API Handlers
//!
//! Author identity always comes from the session, never from the payload.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use shared::ApiResponse;
use shared::models::{Review, ReviewForm, ReviewList};
use shared::request::IdRequest;

use crate::api::{ApiCall, json_body, params};
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// GET /api/getAllReviews - newest first, with per-restaurant counts
pub async fn list(State(state): State<ServerState>) -> ApiResponse<ReviewList> {
    let call = ApiCall::start("getAllReviews");
    call.finish(state.reviews().list().await, None)
}

/// POST /api/addReview
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Result<Json<ReviewForm>, JsonRejection>,
) -> ApiResponse<Review> {
    let payload = json_body(payload);
    let restaurant_id = payload
        .as_ref()
        .ok()
        .and_then(|f| f.restaurant_id.as_deref())
        .unwrap_or_default();
    let call = ApiCall::start_with(
        "addReview",
        &params(&[("restaurant_id", restaurant_id), ("user", user.email.as_str())]),
    );
    let result = match payload {
        Ok(form) => state.reviews().create(form, &user).await,
        Err(e) => Err(e),
    };
    call.finish(result, Some("Review added"))
}

/// POST /api/updateReview - author or admin
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Result<Json<ReviewForm>, JsonRejection>,
) -> ApiResponse<Review> {
    let payload = json_body(payload);
    let id = payload
        .as_ref()
        .ok()
        .and_then(|f| f.id.as_deref())
        .unwrap_or_default();
    let call = ApiCall::start_with(
        "updateReview",
        &params(&[("id", id), ("user", user.email.as_str())]),
    );
    let result = match payload {
        Ok(form) => state.reviews().update(form, &user).await,
        Err(e) => Err(e),
    };
    call.finish(result, Some("Review updated"))
}

/// POST /api/deleteReview - author or admin
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> ApiResponse<()> {
    let payload = json_body(payload);
    let id = payload.as_ref().map(|r| r.id.as_str()).unwrap_or_default();
    let call = ApiCall::start_with(
        "deleteReview",
        &params(&[("id", id), ("user", user.email.as_str())]),
    );
    let result = match payload {
        Ok(req) => state.reviews().delete(&req.id, &user).await,
        Err(e) => Err(e),
    };
    call.finish(result, Some("Review deleted"))
}

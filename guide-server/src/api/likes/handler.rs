//! Like API Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use shared::ApiResponse;
use shared::models::LikeToggle;
use shared::request::IdRequest;

use crate::api::{ApiCall, json_body, params};
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// GET /api/getUserLikes - restaurant ids liked by the caller
pub async fn user_likes(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> ApiResponse<Vec<String>> {
    let call = ApiCall::start_with("getUserLikes", &params(&[("user", user.email.as_str())]));
    let message = user.is_anonymous().then_some("Sign in to see your likes");
    call.finish_list(state.likes().user_likes(&user).await, message)
}

/// POST /api/toggleLike - `{ id }` is the restaurant id
pub async fn toggle(
    State(state): State<ServerState>,
    user: CurrentUser,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> ApiResponse<LikeToggle> {
    let payload = json_body(payload);
    let id = payload.as_ref().map(|r| r.id.as_str()).unwrap_or_default();
    let call = ApiCall::start_with(
        "toggleLike",
        &params(&[("id", id), ("user", user.email.as_str())]),
    );
    let result = match payload {
        Ok(req) => state.likes().toggle(&req.id, &user).await,
        Err(e) => Err(e),
    };
    let message = match &result {
        Ok(LikeToggle { liked: true }) => Some("Like added"),
        Ok(LikeToggle { liked: false }) => Some("Like removed"),
        Err(_) => None,
    };
    call.finish(result, message)
}

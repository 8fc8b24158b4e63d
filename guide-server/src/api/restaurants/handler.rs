//! Restaurant API Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use shared::ApiResponse;
use shared::models::{Restaurant, RestaurantForm};
use shared::request::IdRequest;

use crate::api::{ApiCall, json_body, params};
use crate::core::ServerState;

/// GET /api/getRestaurants - enabled restaurants with review counts
pub async fn list(State(state): State<ServerState>) -> ApiResponse<Vec<Restaurant>> {
    let call = ApiCall::start("getRestaurants");
    call.finish(state.restaurants().list().await, None)
}

/// POST /api/addRestaurant
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<RestaurantForm>, JsonRejection>,
) -> ApiResponse<Restaurant> {
    let payload = json_body(payload);
    let name = payload.as_ref().map(|f| f.name.as_str()).unwrap_or_default();
    let call = ApiCall::start_with("addRestaurant", &params(&[("name", name)]));
    let result = match payload {
        Ok(form) => state.restaurants().create(form).await,
        Err(e) => Err(e),
    };
    call.finish(result, Some("Restaurant added"))
}

/// POST /api/updateRestaurant
pub async fn update(
    State(state): State<ServerState>,
    payload: Result<Json<RestaurantForm>, JsonRejection>,
) -> ApiResponse<Restaurant> {
    let payload = json_body(payload);
    let id = payload
        .as_ref()
        .ok()
        .and_then(|f| f.id.as_deref())
        .unwrap_or_default();
    let call = ApiCall::start_with("updateRestaurant", &params(&[("id", id)]));
    let result = match payload {
        Ok(form) => state.restaurants().update(form).await,
        Err(e) => Err(e),
    };
    call.finish(result, Some("Restaurant updated"))
}

/// POST /api/deleteRestaurant - soft delete
pub async fn delete(
    State(state): State<ServerState>,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> ApiResponse<()> {
    let payload = json_body(payload);
    let id = payload.as_ref().map(|r| r.id.as_str()).unwrap_or_default();
    let call = ApiCall::start_with("deleteRestaurant", &params(&[("id", id)]));
    let result = match payload {
        Ok(req) => state.restaurants().delete(&req.id).await,
        Err(e) => Err(e),
    };
    call.finish(result, Some("Restaurant deleted"))
}
